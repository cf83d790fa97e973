use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
};

use futures::{future::LocalBoxFuture, FutureExt as _};
use paracuke::{feature, Config, Context, Error, Match, Paracuke, Regex};

/// Counts steps executed from files that must never be run.
static EXECUTED: AtomicUsize = AtomicUsize::new(0);

fn counts(_: &mut Context, _: Match) -> LocalBoxFuture<'_, bool> {
    async {
        EXECUTED.fetch_add(1, Ordering::SeqCst);
        true
    }
    .boxed_local()
}

fn single_context_config(path: &std::path::Path) -> Config {
    serde_yaml::from_str(&format!(
        "phases:\n\
         \x20 - name: parallel\n\
         \x20   contexts:\n\
         \x20     - name: solo\n\
         \x20       features: [\"{}\"]\n",
        path.display(),
    ))
    .unwrap()
}

#[tokio::test]
async fn step_before_scenario_is_fatal_and_executes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("broken.feature"),
        "Feature: Broken\n\
         Given a counted step\n\
         Scenario: Never reached\n\
         \x20 Given a counted step\n",
    )
    .unwrap();

    let err = Paracuke::new()
        .given(Regex::new(r"^a counted step$").unwrap(), counts)
        .run(single_context_config(&dir.path().join("broken.feature")))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 6);
    assert!(matches!(
        err,
        Error::Feature(feature::Error::Syntax {
            num: 2,
            kind: feature::SyntaxError::StepWithoutScenario,
            ..
        }),
    ));
    assert_eq!(EXECUTED.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreadable_feature_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let err = Paracuke::new()
        .run(single_context_config(&dir.path().join("nowhere.feature")))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 5);
    assert!(matches!(err, Error::Feature(feature::Error::Read { .. })));
}
