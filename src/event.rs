// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in the lifecycle of a run.
//!
//! The top-level enum here is [`Run`].
//!
//! Each event enum contains variants indicating what stage of execution the
//! runner is at, with nested variants carrying the detailed sub-event. Events
//! of contexts executing concurrently within one phase arrive interleaved, in
//! no guaranteed order; events of a single context are always ordered.

use std::sync::Arc;

use crate::{feature, stats::Summary, Config};

/// Top-level run event.
#[derive(Debug)]
pub enum Run {
    /// Execution started with the given, already validated, [`Config`].
    Started(Arc<Config>),

    /// Event of the named context.
    Context(String, Context),

    /// Execution finished; no more events will follow.
    Finished(Summary),
}

/// Event specific to a particular execution context.
#[derive(Debug)]
pub enum Context {
    /// [`Feature`] event.
    Feature(Arc<feature::Feature>, Feature),
}

/// Event specific to a particular [`Feature`].
///
/// [`Feature`]: feature::Feature
#[derive(Debug)]
pub enum Feature {
    /// The [`Feature`] was parsed, but its execution has not begun.
    ///
    /// [`Feature`]: feature::Feature
    Parsed,

    /// Execution of the [`Feature`] started.
    ///
    /// [`Feature`]: feature::Feature
    Started,

    /// [`Scenario`] event.
    Scenario(Arc<feature::Scenario>, Scenario),

    /// Execution of the [`Feature`] finished.
    ///
    /// [`Feature`]: feature::Feature
    Finished,
}

/// Event specific to a particular [`Scenario`].
///
/// [`Scenario`]: feature::Scenario
#[derive(Debug)]
pub enum Scenario {
    /// Execution of the [`Scenario`] started.
    ///
    /// [`Scenario`]: feature::Scenario
    Started,

    /// Outcome of the given step line.
    Step(String, Step),

    /// Execution of the [`Scenario`] finished.
    ///
    /// [`Scenario`]: feature::Scenario
    Finished,
}

/// Outcome of a single step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Handler matched and returned `true`.
    Passed,

    /// Handler matched and returned `false`.
    Failed,

    /// Step was not executed because an earlier step of its scenario failed.
    Skipped,

    /// No registered pattern matched the step text.
    ///
    /// Propagates like [`Step::Failed`], but is reported distinctly.
    Unimplemented,
}

impl Run {
    /// Constructs an event of a parsed [`Feature`].
    ///
    /// [`Feature`]: feature::Feature
    #[must_use]
    pub fn feature_parsed(
        context: String,
        feature: Arc<feature::Feature>,
    ) -> Self {
        Self::Context(context, Context::Feature(feature, Feature::Parsed))
    }

    /// Constructs an event of a [`Feature`] being started.
    ///
    /// [`Feature`]: feature::Feature
    #[must_use]
    pub fn feature_started(
        context: String,
        feature: Arc<feature::Feature>,
    ) -> Self {
        Self::Context(context, Context::Feature(feature, Feature::Started))
    }

    /// Constructs an event of a finished [`Feature`].
    ///
    /// [`Feature`]: feature::Feature
    #[must_use]
    pub fn feature_finished(
        context: String,
        feature: Arc<feature::Feature>,
    ) -> Self {
        Self::Context(context, Context::Feature(feature, Feature::Finished))
    }

    /// Constructs a [`Scenario`] event within the given [`Feature`].
    ///
    /// [`Feature`]: feature::Feature
    #[must_use]
    pub fn scenario(
        context: String,
        feature: Arc<feature::Feature>,
        scenario: Arc<feature::Scenario>,
        event: Scenario,
    ) -> Self {
        Self::Context(
            context,
            Context::Feature(feature, Feature::Scenario(scenario, event)),
        )
    }
}
