use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
};

use futures::{future::LocalBoxFuture, FutureExt as _};
use paracuke::{Config, Context, Error, Match, Paracuke, Regex};

/// Counts steps executed by runs that must never start.
static EXECUTED: AtomicUsize = AtomicUsize::new(0);

fn counts(_: &mut Context, _: Match) -> LocalBoxFuture<'_, bool> {
    async {
        EXECUTED.fetch_add(1, Ordering::SeqCst);
        true
    }
    .boxed_local()
}

#[tokio::test]
async fn duplicate_context_name_aborts_before_any_execution() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("some.feature"),
        "Feature: Some\n\
         Scenario: Counted\n\
         \x20 Given a counted step\n",
    )
    .unwrap();

    let config: Config = serde_yaml::from_str(&format!(
        "phases:\n\
         \x20 - name: init\n\
         \x20   contexts:\n\
         \x20     - name: twin\n\
         \x20       features: [\"{0}\"]\n\
         \x20 - name: parallel\n\
         \x20   contexts:\n\
         \x20     - name: twin\n\
         \x20       features: [\"{0}\"]\n",
        dir.path().join("some.feature").display(),
    ))
    .unwrap();

    let err = Paracuke::new()
        .given(Regex::new(r"^a counted step$").unwrap(), counts)
        .run(config)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 4);
    assert!(err.to_string().contains("twin"));
    assert_eq!(EXECUTED.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreadable_configuration_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load(dir.path().join("nowhere.yaml")).unwrap_err();
    assert_eq!(Error::from(err).exit_code(), 2);
}

#[tokio::test]
async fn malformed_configuration_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.yaml"), "phases: [not: [valid\n")
        .unwrap();

    let err = Config::load(dir.path().join("broken.yaml")).unwrap_err();
    assert_eq!(Error::from(err).exit_code(), 3);
}

#[tokio::test]
async fn loader_rejects_duplicate_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("dup.yaml"),
        "phases:\n\
         \x20 - name: parallel\n\
         \x20   contexts:\n\
         \x20     - name: twin\n\
         \x20     - name: twin\n",
    )
    .unwrap();

    let err = Config::load(dir.path().join("dup.yaml")).unwrap_err();
    assert_eq!(Error::from(err).exit_code(), 4);
}
