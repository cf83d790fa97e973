// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scenario executor and phased scheduler.

use std::{mem, sync::Arc};

use futures::{channel::mpsc, future, StreamExt as _};

use crate::{
    config::Phase,
    event,
    feature::{self, Feature},
    future::yield_now,
    stats::Collector,
    step::Registry,
    Context, Writer,
};

/// Alias for the sending side of the per-phase event channel.
type Sender = mpsc::UnboundedSender<event::Run>;

/// Executor of [`Phase`]s against a frozen [`Registry`].
///
/// Borrows the [`Registry`] and the [`Collector`] immutably, as both are
/// reached concurrently by every worker of a phase.
pub(crate) struct Runner<'run> {
    /// Step bindings to dispatch against; read-only during the run.
    registry: &'run Registry,

    /// Statistics collector shared by all workers.
    stats: &'run Collector,
}

impl<'run> Runner<'run> {
    /// Creates a new [`Runner`].
    pub(crate) fn new(
        registry: &'run Registry,
        stats: &'run Collector,
    ) -> Self {
        Self { registry, stats }
    }

    /// Executes a single [`Phase`]: one worker per context, all concurrent.
    ///
    /// Returns only once every worker has finished, forming the full barrier
    /// between consecutive phases. Workers' events are funneled into the
    /// given `writer` while they execute.
    ///
    /// # Errors
    ///
    /// If any worker fails to read or parse a feature file. The remaining
    /// workers of the phase are dropped and the whole run aborts.
    pub(crate) async fn run_phase<W: Writer>(
        &self,
        phase: Phase,
        writer: &mut W,
    ) -> Result<(), feature::Error> {
        let (sender, mut receiver) = mpsc::unbounded();

        let execute = async move {
            let workers = phase
                .contexts
                .into_iter()
                .map(|spec| self.run_context(spec.into(), sender.clone()))
                .collect::<Vec<_>>();
            future::try_join_all(workers).await.map(drop)
        };
        let consume = async {
            while let Some(ev) = receiver.next().await {
                writer.handle_event(ev).await;
            }
        };

        let (result, ()) = future::join(execute, consume).await;
        result
    }

    /// Walks the `context`'s feature files in order, parsing and executing
    /// each one.
    ///
    /// The worker owns its [`Context`] exclusively; the next file is executed
    /// regardless of the previous file's scenario outcomes.
    async fn run_context(
        &self,
        mut context: Context,
        sender: Sender,
    ) -> Result<(), feature::Error> {
        for path in mem::take(&mut context.features) {
            let feature = Arc::new(Feature::parse_path(path)?);
            drop(sender.unbounded_send(event::Run::feature_parsed(
                context.name().to_owned(),
                Arc::clone(&feature),
            )));
            self.run_feature(&mut context, &feature, &sender).await;
        }
        Ok(())
    }

    /// Executes every scenario of the `feature`, in order.
    async fn run_feature(
        &self,
        context: &mut Context,
        feature: &Arc<Feature>,
        sender: &Sender,
    ) {
        drop(sender.unbounded_send(event::Run::feature_started(
            context.name().to_owned(),
            Arc::clone(feature),
        )));
        for scenario in &feature.scenarios {
            let scenario = Arc::new(scenario.clone());
            self.run_scenario(context, feature, &scenario, sender).await;
        }
        drop(sender.unbounded_send(event::Run::feature_finished(
            context.name().to_owned(),
            Arc::clone(feature),
        )));
    }

    /// Executes a single scenario's steps, in order.
    ///
    /// Once a step fails or is unimplemented, every remaining step is
    /// recorded as skipped without invoking its handler, but the loop still
    /// visits them all. A failed scenario never affects its siblings.
    async fn run_scenario(
        &self,
        context: &mut Context,
        feature: &Arc<Feature>,
        scenario: &Arc<feature::Scenario>,
        sender: &Sender,
    ) {
        let name = context.name().to_owned();
        drop(sender.unbounded_send(event::Run::scenario(
            name.clone(),
            Arc::clone(feature),
            Arc::clone(scenario),
            event::Scenario::Started,
        )));

        let mut failed = false;
        for step in &scenario.steps {
            let outcome = if failed {
                event::Step::Skipped
            } else {
                self.run_step(context, step).await
            };
            match outcome {
                event::Step::Passed => self.stats.step_passed(),
                event::Step::Failed | event::Step::Unimplemented => {
                    self.stats.step_failed();
                    failed = true;
                }
                event::Step::Skipped => self.stats.step_skipped(),
            }
            drop(sender.unbounded_send(event::Run::scenario(
                name.clone(),
                Arc::clone(feature),
                Arc::clone(scenario),
                event::Scenario::Step(step.clone(), outcome),
            )));

            // Allow a context switch after the step.
            yield_now().await;
        }

        if failed {
            self.stats.scenario_failed(&name, &scenario.title);
        } else {
            self.stats.scenario_passed();
        }
        drop(sender.unbounded_send(event::Run::scenario(
            name,
            Arc::clone(feature),
            Arc::clone(scenario),
            event::Scenario::Finished,
        )));
    }

    /// Dispatches a single step line through the [`Registry`].
    async fn run_step(
        &self,
        context: &mut Context,
        text: &str,
    ) -> event::Step {
        let Some((step, matched)) = self.registry.find(text) else {
            return event::Step::Unimplemented;
        };
        if step(context, matched).await {
            event::Step::Passed
        } else {
            event::Step::Failed
        }
    }
}
