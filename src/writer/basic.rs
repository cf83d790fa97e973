// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Writer`] implementation.

use std::ops::Deref;

use async_trait::async_trait;
use console::Term;
use itertools::Itertools as _;

use crate::{
    event, feature,
    stats::{Stats, Summary},
    writer::out::Styles,
    Config, Writer,
};

/// Default [`Writer`] implementation outputting to a terminal.
///
/// Every line is prefixed with the originating context's name in
/// parentheses, so interleaved output of concurrently running contexts stays
/// attributable.
#[derive(Clone, Debug)]
pub struct Basic {
    /// Terminal to write into.
    terminal: Term,

    /// [`Styles`] to render with.
    styles: Styles,

    /// Whether `(debug)` dumps of parsed configurations and features are
    /// rendered.
    verbose: bool,
}

#[async_trait(?Send)]
impl Writer for Basic {
    async fn handle_event(&mut self, ev: event::Run) {
        match ev {
            event::Run::Started(config) => self.run_started(&config),
            event::Run::Context(name, event::Context::Feature(f, ev)) => {
                self.feature(&name, &f, ev);
            }
            event::Run::Finished(summary) => self.run_finished(&summary),
        }
    }
}

impl Default for Basic {
    fn default() -> Self {
        Self {
            terminal: Term::stdout(),
            styles: Styles::new(),
            verbose: false,
        }
    }
}

impl Deref for Basic {
    type Target = Term;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl Basic {
    /// Creates a new [`Basic`] writer on stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables `(debug)` dumps of parsed configurations and
    /// features.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    fn run_started(&self, config: &Config) {
        if !self.verbose {
            return;
        }
        for phase in &config.phases {
            self.write_line(&format!("(debug) section \"{}\"", phase.name))
                .unwrap();
            self.write_line("(debug)").unwrap();
            for context in &phase.contexts {
                self.write_line(&format!(
                    "(debug)   context \"{}\":",
                    context.name,
                ))
                .unwrap();
                for path in &context.features {
                    self.write_line(&format!(
                        "(debug)     feature \"{}\"",
                        path.display(),
                    ))
                    .unwrap();
                }
                self.write_line("(debug)").unwrap();
            }
            self.write_line("(debug)").unwrap();
        }
    }

    fn feature(
        &self,
        context: &str,
        feature: &feature::Feature,
        ev: event::Feature,
    ) {
        match ev {
            event::Feature::Parsed => self.feature_parsed(feature),
            event::Feature::Started => self.feature_started(context, feature),
            event::Feature::Scenario(sc, ev) => {
                self.scenario(context, &sc, ev);
            }
            event::Feature::Finished => {}
        }
    }

    fn feature_parsed(&self, feature: &feature::Feature) {
        if !self.verbose {
            return;
        }
        self.write_line(&format!("(debug) feature \"{}\"", feature.title))
            .unwrap();
        for desc in &feature.description {
            self.write_line(&format!("(debug)   description \"{desc}\""))
                .unwrap();
        }
        self.write_line("(debug)").unwrap();
        for scenario in &feature.scenarios {
            self.write_line(&format!(
                "(debug)   scenario \"{}\":",
                scenario.title,
            ))
            .unwrap();
            for step in &scenario.steps {
                self.write_line(&format!("(debug)     step \"{step}\""))
                    .unwrap();
            }
            self.write_line("(debug)").unwrap();
        }
        self.write_line("(debug)").unwrap();
    }

    fn feature_started(&self, context: &str, feature: &feature::Feature) {
        self.write_line(&format!(
            "({context})  Feature: {}",
            feature.title,
        ))
        .unwrap();
        self.write_line(&format!("({context})")).unwrap();
        for desc in &feature.description {
            self.write_line(&format!("({context})    {desc}")).unwrap();
        }
        self.write_line(&format!("({context})")).unwrap();
    }

    fn scenario(
        &self,
        context: &str,
        scenario: &feature::Scenario,
        ev: event::Scenario,
    ) {
        match ev {
            event::Scenario::Started => {
                self.write_line(&format!(
                    "({context})  Scenario: {}",
                    scenario.title,
                ))
                .unwrap();
            }
            event::Scenario::Step(text, outcome) => {
                self.step(context, &text, outcome);
            }
            event::Scenario::Finished => {
                self.write_line(&format!("({context})")).unwrap();
            }
        }
    }

    fn step(&self, context: &str, text: &str, outcome: event::Step) {
        let styles = &self.styles;
        match outcome {
            event::Step::Passed => {
                self.write_line(&styles.ok(format!("({context})    {text}")))
                    .unwrap();
            }
            event::Step::Failed => {
                self.write_line(&styles.err(format!("({context})    {text}")))
                    .unwrap();
                self.write_line(
                    &styles.err(format!("({context})    Step failed!")),
                )
                .unwrap();
            }
            event::Step::Skipped => {
                self.write_line(
                    &styles.skipped(format!("({context})    {text}")),
                )
                .unwrap();
                self.write_line(
                    &styles.skipped(format!("({context})      (skipped...)")),
                )
                .unwrap();
            }
            event::Step::Unimplemented => {
                self.write_line("").unwrap();
                self.write_line(&styles.err(format!(
                    "({context}) *** Please implement step:\n   \"{text}\"",
                )))
                .unwrap();
                self.write_line("").unwrap();
            }
        }
    }

    fn run_finished(&self, summary: &Summary) {
        self.write_line("").unwrap();
        if !summary.failures.is_empty() {
            self.write_line(&self.styles.err("Failed scenarios:")).unwrap();
            let failed = summary
                .failures
                .iter()
                .map(|f| {
                    self.styles
                        .err(format!("({})  {}", f.context, f.scenario))
                })
                .join("\n");
            self.write_line(&failed).unwrap();
            self.write_line("").unwrap();
        }
        self.write_line(&self.totals_line("scenarios", &summary.scenarios))
            .unwrap();
        self.write_line(&self.totals_line("steps", &summary.steps)).unwrap();
    }

    fn totals_line(&self, noun: &str, stats: &Stats) -> String {
        format!(
            "{} {noun} ({}, {}, {})",
            stats.total(),
            self.styles.ok(format!("{} successful", stats.passed)),
            self.styles.err(format!("{} failed", stats.failed)),
            self.styles.skipped(format!("{} skipped", stats.skipped)),
        )
    }
}
