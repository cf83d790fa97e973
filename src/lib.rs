// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parallel Cucumber-style testing framework.
//!
//! Plain-text Gherkin feature files are executed against named [`Context`]s:
//! isolated execution lanes carrying their own data bag and feature list.
//! Contexts are grouped into ordered phases (initialization, parallel body,
//! teardown, or any ordered list of batches); all contexts of a phase run
//! concurrently, while the phases themselves execute strictly in sequence.
//! Independent test suites thus run in parallel without losing the ability
//! to set up and tear down shared environment state safely.
//!
//! Step handlers are bound to [`Regex`] patterns in a [`Registry`]; each step
//! line resolves to the first-registered matching binding. A failing (or
//! unmatched) step fails its scenario and skips the scenario's remaining
//! steps, never affecting sibling scenarios or other contexts.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::FutureExt as _;
//! use paracuke::{Match, Context, Paracuke, Regex};
//!
//! fn add(context: &mut Context, m: Match) -> futures::future::LocalBoxFuture<'_, bool> {
//!     async move {
//!         let (Ok(a), Ok(b)) =
//!             (m.matches[1].parse::<i64>(), m.matches[2].parse::<i64>())
//!         else {
//!             return false;
//!         };
//!         context.data.insert("result".into(), (a + b).to_string());
//!         true
//!     }
//!     .boxed_local()
//! }
//!
//! fn check(context: &mut Context, m: Match) -> futures::future::LocalBoxFuture<'_, bool> {
//!     async move { context.data.get("result") == Some(&m.matches[1]) }
//!         .boxed_local()
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! Paracuke::new()
//!     .when(Regex::new(r"^I add (\d+) and (\d+)$").unwrap(), add)
//!     .then(Regex::new(r"^I should get (\d+)$").unwrap(), check)
//!     .run_and_exit()
//!     .await;
//! # }
//! ```

pub mod cli;
pub mod config;
mod context;
pub mod error;
pub mod event;
pub mod feature;
mod future;
mod paracuke;
mod runner;
pub mod stats;
pub mod step;
pub mod writer;

pub use regex::Regex;

pub use self::{
    config::Config,
    context::Context,
    error::{Error, Result},
    feature::Feature,
    paracuke::Paracuke,
    stats::Summary,
    step::{Match, Registry, Step},
    writer::Writer,
};
