// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions for [`Registry`] which is used to store [`Step`] [`Fn`]s and
//! corresponding [`Regex`] patterns.

use std::fmt::{self, Debug, Formatter};

use futures::future::LocalBoxFuture;
use regex::Regex;

use crate::{feature::STEP_KEYWORDS, Context};

/// Alias for a step handler returning a [`LocalBoxFuture`].
///
/// The `bool` is the sole failure signal: `false` fails the step (and so the
/// scenario), while ordinary work happens through mutating the [`Context`]'s
/// data bag.
pub type Step =
    for<'a> fn(&'a mut Context, Match) -> LocalBoxFuture<'a, bool>;

/// Ordered collection of [`Step`]s bound to [`Regex`] patterns.
///
/// Bindings are append-only and the registry is frozen once execution starts.
/// Lookup is a linear scan in registration order, and the first matching
/// pattern wins: registering a more specific pattern after a more general one
/// that also matches makes the specific one unreachable. This is deliberate,
/// a first-match policy rather than a best-match one.
#[derive(Default)]
pub struct Registry {
    /// Registered `(pattern, handler)` bindings, in registration order.
    steps: Vec<(Regex, Step)>,
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field(
                "steps",
                &self
                    .steps
                    .iter()
                    .map(|(re, step)| (re.as_str(), format!("{:p}", *step)))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Registry {
    /// Creates an empty [`Registry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a [`Step`] binding matching step texts against `regex`.
    #[must_use]
    pub fn step(mut self, regex: Regex, step: Step) -> Self {
        self.steps.push((regex, step));
        self
    }

    /// Appends a [`Step`] binding for a [Given] step.
    ///
    /// Keywords are interchangeable on dispatch, so this is an alias of
    /// [`Registry::step()`] kept for readable registration code.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference/#given
    #[must_use]
    pub fn given(self, regex: Regex, step: Step) -> Self {
        self.step(regex, step)
    }

    /// Appends a [`Step`] binding for a [When] step.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference/#when
    #[must_use]
    pub fn when(self, regex: Regex, step: Step) -> Self {
        self.step(regex, step)
    }

    /// Appends a [`Step`] binding for a [Then] step.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference/#then
    #[must_use]
    pub fn then(self, regex: Regex, step: Step) -> Self {
        self.step(regex, step)
    }

    /// Returns the first-registered [`Step`] whose pattern matches the given
    /// step `text`, if any, along with its captured [`Match`].
    ///
    /// The leading step keyword is stripped and surrounding whitespace
    /// trimmed before matching.
    #[must_use]
    pub(crate) fn find(&self, text: &str) -> Option<(Step, Match)> {
        let normalized = normalize(text);
        self.steps.iter().find_map(|(re, step)| {
            re.captures(normalized).map(|captures| {
                let matches = captures
                    .iter()
                    .map(|c| {
                        c.map(|c| c.as_str().to_owned()).unwrap_or_default()
                    })
                    .collect();
                (*step, Match { matches })
            })
        })
    }
}

/// Captures of a [`Step`]'s pattern against a step text.
#[derive(Clone, Debug)]
pub struct Match {
    /// [`Regex`] matches of the normalized step text: the full match first,
    /// then every capture group (empty for non-participating groups).
    pub matches: Vec<String>,
}

/// Strips the leading step keyword from `text` and trims whitespace.
fn normalize(text: &str) -> &str {
    let trimmed = text.trim();
    STEP_KEYWORDS
        .iter()
        .find_map(|kw| trimmed.strip_prefix(kw))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod spec {
    use futures::FutureExt as _;
    use regex::Regex;

    use super::{normalize, Match, Registry};
    use crate::Context;

    fn yes(_: &mut Context, _: Match) -> futures::future::LocalBoxFuture<'_, bool> {
        async { true }.boxed_local()
    }

    fn no(_: &mut Context, _: Match) -> futures::future::LocalBoxFuture<'_, bool> {
        async { false }.boxed_local()
    }

    #[test]
    fn normalizes_keywords() {
        assert_eq!(normalize("Given a precondition"), "a precondition");
        assert_eq!(normalize("  When I add 2 and 3  "), "I add 2 and 3");
        assert_eq!(normalize("Then I should get 5"), "I should get 5");
        assert_eq!(normalize("And something else"), "something else");
    }

    #[test]
    fn first_registered_binding_wins() {
        let registry = Registry::new()
            .when(Regex::new(r"^I add (\d+) and (\d+)$").unwrap(), no)
            .when(Regex::new(r"^I add .*$").unwrap(), yes);

        let (step, matched) = registry.find("When I add 2 and 3").unwrap();
        assert_eq!(matched.matches, ["I add 2 and 3", "2", "3"]);

        // `no` was registered first, so it must be the resolved handler.
        let mut context = Context::from(crate::config::ContextSpec {
            name: "test".into(),
            features: vec![],
        });
        assert!(!futures::executor::block_on(step(&mut context, matched)));
    }

    #[test]
    fn unmatched_text_resolves_to_none() {
        let registry =
            Registry::new().given(Regex::new(r"^a precondition$").unwrap(), yes);

        assert!(registry.find("Given something undefined").is_none());
    }
}
