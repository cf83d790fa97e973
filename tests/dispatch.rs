use std::{
    cell::RefCell,
    fs,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use futures::{future::LocalBoxFuture, FutureExt as _};
use paracuke::{event, Config, Context, Match, Paracuke, Regex, Writer};

static GENERAL_CALLS: AtomicUsize = AtomicUsize::new(0);
static SPECIFIC_CALLS: AtomicUsize = AtomicUsize::new(0);
static AFTER_UNIMPLEMENTED_CALLS: AtomicUsize = AtomicUsize::new(0);

fn general(_: &mut Context, _: Match) -> LocalBoxFuture<'_, bool> {
    async {
        GENERAL_CALLS.fetch_add(1, Ordering::SeqCst);
        true
    }
    .boxed_local()
}

fn specific(_: &mut Context, _: Match) -> LocalBoxFuture<'_, bool> {
    async {
        SPECIFIC_CALLS.fetch_add(1, Ordering::SeqCst);
        true
    }
    .boxed_local()
}

fn after_unimplemented(_: &mut Context, _: Match) -> LocalBoxFuture<'_, bool> {
    async {
        AFTER_UNIMPLEMENTED_CALLS.fetch_add(1, Ordering::SeqCst);
        true
    }
    .boxed_local()
}

/// [`Writer`] keeping only step outcomes.
#[derive(Clone, Debug, Default)]
struct StepOutcomes(Rc<RefCell<Vec<(String, event::Step)>>>);

#[async_trait(?Send)]
impl Writer for StepOutcomes {
    async fn handle_event(&mut self, ev: event::Run) {
        if let event::Run::Context(
            _,
            event::Context::Feature(
                _,
                event::Feature::Scenario(_, event::Scenario::Step(text, outcome)),
            ),
        ) = ev
        {
            self.0.borrow_mut().push((text, outcome));
        }
    }
}

fn single_context_config(dir: &std::path::Path, feature: &str) -> Config {
    serde_yaml::from_str(&format!(
        "phases:\n\
         \x20 - name: parallel\n\
         \x20   contexts:\n\
         \x20     - name: solo\n\
         \x20       features: [\"{}\"]\n",
        dir.join(feature).display(),
    ))
    .unwrap()
}

#[tokio::test]
async fn first_registered_binding_wins_over_later_ones() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("overlap.feature"),
        "Feature: Overlapping patterns\n\
         Scenario: Ambiguous step\n\
         \x20 When I add 2 and 3\n",
    )
    .unwrap();

    let summary = Paracuke::new()
        .when(Regex::new(r"^I add .*$").unwrap(), general)
        .when(Regex::new(r"^I add (\d+) and (\d+)$").unwrap(), specific)
        .run(single_context_config(dir.path(), "overlap.feature"))
        .await
        .unwrap();

    assert_eq!(summary.steps.passed, 1);
    assert_eq!(GENERAL_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(SPECIFIC_CALLS.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unimplemented_step_fails_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("missing.feature"),
        "Feature: Missing binding\n\
         Scenario: Nothing matches\n\
         \x20 When nobody implemented this\n\
         \x20 Then an implemented step\n",
    )
    .unwrap();

    let writer = StepOutcomes::default();
    let outcomes = Rc::clone(&writer.0);

    let summary = Paracuke::new()
        .with_writer(writer)
        .then(
            Regex::new(r"^an implemented step$").unwrap(),
            after_unimplemented,
        )
        .run(single_context_config(dir.path(), "missing.feature"))
        .await
        .unwrap();

    // Unimplemented propagates like a failure, but is reported distinctly.
    assert_eq!(
        *outcomes.borrow(),
        [
            (
                "When nobody implemented this".to_owned(),
                event::Step::Unimplemented,
            ),
            ("Then an implemented step".to_owned(), event::Step::Skipped),
        ],
    );
    assert_eq!(summary.steps.failed, 1);
    assert_eq!(summary.steps.skipped, 1);
    assert_eq!(summary.scenarios.failed, 1);
    assert_eq!(AFTER_UNIMPLEMENTED_CALLS.load(Ordering::SeqCst), 0);
}
