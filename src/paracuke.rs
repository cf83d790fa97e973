// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level [`Paracuke`] executor and entry points.

use std::{process, sync::Arc};

use regex::Regex;

use crate::{
    cli::{self, Parser as _},
    event,
    runner::Runner,
    stats::{Collector, Summary},
    step::{Registry, Step},
    writer::{self, out::Styles},
    Config, Result, Writer,
};

/// Executor of a whole run: registered steps plus a [`Writer`] for output.
///
/// Step registration is a build step completed before the first phase starts:
/// [`Paracuke::run()`] consumes the executor, so the [`Registry`] is frozen
/// once execution begins and never mutated afterwards.
pub struct Paracuke<W = writer::Basic> {
    /// Registered step bindings.
    registry: Registry,

    /// [`Writer`] all run events go to.
    writer: W,
}

impl Paracuke<writer::Basic> {
    /// Creates a new [`Paracuke`] executor writing to the terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            writer: writer::Basic::new(),
        }
    }

    /// Parses the [`cli::Opts`], loads the configuration, runs it and exits
    /// the process.
    ///
    /// Exits with code `0` after a completed run regardless of how many
    /// scenarios failed; fatal errors print a diagnostic to stderr and exit
    /// with their category's code (see [`Error::exit_code()`]).
    ///
    /// [`Error::exit_code()`]: crate::Error::exit_code
    pub async fn run_and_exit(mut self) {
        let opts = cli::Opts::parse();
        self.writer = self.writer.verbose(opts.debug);

        let result = match Config::load(opts.config) {
            Ok(config) => self.run(config).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(_) => process::exit(0),
            Err(e) => {
                eprintln!("{}", Styles::new().err(e.to_string()));
                process::exit(e.exit_code());
            }
        }
    }
}

impl Default for Paracuke<writer::Basic> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Writer> Paracuke<W> {
    /// Replaces the [`Writer`] of this executor.
    #[must_use]
    pub fn with_writer<W2: Writer>(self, writer: W2) -> Paracuke<W2> {
        Paracuke { registry: self.registry, writer }
    }

    /// Registers a [`Step`] matching step texts against `regex`.
    ///
    /// If several registered patterns match the same step text, the
    /// first-registered one wins.
    #[must_use]
    pub fn step(mut self, regex: Regex, step: Step) -> Self {
        self.registry = self.registry.step(regex, step);
        self
    }

    /// Registers a [`Step`] for a [Given] step.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference/#given
    #[must_use]
    pub fn given(mut self, regex: Regex, step: Step) -> Self {
        self.registry = self.registry.given(regex, step);
        self
    }

    /// Registers a [`Step`] for a [When] step.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference/#when
    #[must_use]
    pub fn when(mut self, regex: Regex, step: Step) -> Self {
        self.registry = self.registry.when(regex, step);
        self
    }

    /// Registers a [`Step`] for a [Then] step.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference/#then
    #[must_use]
    pub fn then(mut self, regex: Regex, step: Step) -> Self {
        self.registry = self.registry.then(regex, step);
        self
    }

    /// Runs the given `config` to completion.
    ///
    /// Phases execute strictly in their declared order; all contexts of a
    /// phase run concurrently, and no phase starts before every context of
    /// the previous one has finished.
    ///
    /// # Errors
    ///
    /// If the `config` violates the context-name rules, or any worker fails
    /// to read or parse a feature file. Step and scenario failures are not
    /// errors; they surface through the returned [`Summary`] only.
    pub async fn run(self, config: Config) -> Result<Summary> {
        config.validate()?;

        let Self { registry, mut writer } = self;
        let stats = Collector::new();
        let config = Arc::new(config);

        writer.handle_event(event::Run::Started(Arc::clone(&config))).await;

        let runner = Runner::new(&registry, &stats);
        for phase in config.phases.clone() {
            runner.run_phase(phase, &mut writer).await?;
        }

        let summary = stats.summarize();
        writer.handle_event(event::Run::Finished(summary.clone())).await;
        Ok(summary)
    }
}
