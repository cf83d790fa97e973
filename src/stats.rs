// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Concurrency-safe statistics of a single run.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// Live statistics collector shared by every phase worker.
///
/// The only structure mutated concurrently during a run: counters are
/// atomics and the failure list is mutex-guarded, so every recording
/// operation is safe from any worker. Lives for exactly one run and is read
/// only after the final phase barrier.
#[derive(Debug, Default)]
pub struct Collector {
    /// Number of passed scenarios.
    scenarios_passed: AtomicUsize,

    /// Number of skipped scenarios.
    ///
    /// The built-in executor never skips whole scenarios (only remaining
    /// steps of a failed one), so it leaves this at zero.
    scenarios_skipped: AtomicUsize,

    /// Number of passed steps.
    steps_passed: AtomicUsize,

    /// Number of failed steps (unimplemented ones included).
    steps_failed: AtomicUsize,

    /// Number of skipped steps.
    steps_skipped: AtomicUsize,

    /// Failed scenarios, in completion order.
    ///
    /// Their count doubles as the failed-scenario counter.
    failures: Mutex<Vec<Failure>>,
}

impl Collector {
    /// Creates an empty [`Collector`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a passed step.
    pub fn step_passed(&self) {
        self.steps_passed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed (or unimplemented) step.
    pub fn step_failed(&self) {
        self.steps_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a step skipped after an earlier failure in its scenario.
    pub fn step_skipped(&self) {
        self.steps_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a passed scenario.
    pub fn scenario_passed(&self) {
        self.scenarios_passed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a skipped scenario.
    pub fn scenario_skipped(&self) {
        self.scenarios_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed scenario of the named context.
    pub fn scenario_failed(&self, context: &str, scenario: &str) {
        self.failures.lock().unwrap().push(Failure {
            context: context.to_owned(),
            scenario: scenario.to_owned(),
        });
    }

    /// Snapshots these statistics into a [`Summary`].
    #[must_use]
    pub fn summarize(&self) -> Summary {
        let failures = self.failures.lock().unwrap().clone();
        Summary {
            scenarios: Stats {
                passed: self.scenarios_passed.load(Ordering::Relaxed),
                failed: failures.len(),
                skipped: self.scenarios_skipped.load(Ordering::Relaxed),
            },
            steps: Stats {
                passed: self.steps_passed.load(Ordering::Relaxed),
                failed: self.steps_failed.load(Ordering::Relaxed),
                skipped: self.steps_skipped.load(Ordering::Relaxed),
            },
            failures,
        }
    }
}

/// Execution statistics of steps (or scenarios).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of passed steps (or scenarios).
    pub passed: usize,

    /// Number of failed steps (or scenarios).
    pub failed: usize,

    /// Number of skipped steps (or scenarios).
    pub skipped: usize,
}

impl Stats {
    /// Returns the total number of steps (or scenarios) these [`Stats`] have
    /// been collected for.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Record of a single failed scenario.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    /// Name of the context the scenario ran in.
    pub context: String,

    /// Title of the failed scenario.
    pub scenario: String,
}

/// Final, immutable summary of a whole run.
///
/// Ordering of [`Summary::failures`] depends on worker completion order and
/// is non-deterministic across runs; rely on it for presentation only.
#[derive(Clone, Debug)]
pub struct Summary {
    /// Scenario-level [`Stats`].
    pub scenarios: Stats,

    /// Step-level [`Stats`].
    pub steps: Stats,

    /// Failed scenarios, in completion order.
    pub failures: Vec<Failure>,
}
