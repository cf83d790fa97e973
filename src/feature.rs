// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Feature`] tree and the line-oriented parser producing it.
//!
//! The grammar is deliberately small: one `Feature:` header, optional
//! free-text description lines, then any number of `Scenario:` blocks each
//! holding `Given`/`When`/`Then`/`And` step lines. Blank lines and
//! `#`-prefixed comments are ignored everywhere.

use std::{fs, io, path::PathBuf};

use derive_more::{Display, Error};

/// Step keywords opening a step line.
///
/// Dispatch strips whichever of these prefixes the step text carries, so for
/// matching purposes the keywords are interchangeable.
pub(crate) const STEP_KEYWORDS: [&str; 4] = ["Given", "When", "Then", "And"];

/// Parsed feature file: a title, its description block and its [`Scenario`]s.
///
/// Built fresh per file and per run, never shared between execution contexts,
/// so the same file may be parsed concurrently by multiple workers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Feature {
    /// Title following the `Feature:` header.
    pub title: String,

    /// Free-text description lines preceding the first [`Scenario`].
    pub description: Vec<String>,

    /// [`Scenario`]s in file order.
    pub scenarios: Vec<Scenario>,
}

/// Single scenario: a title and its raw step lines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Scenario {
    /// Title following the `Scenario:` header.
    pub title: String,

    /// Step lines in file order, each still carrying its keyword.
    pub steps: Vec<String>,
}

impl Feature {
    /// Reads and parses the feature file at the given `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read, or any line violates the grammar.
    pub fn parse_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .map_err(|source| Error::Read { path: path.clone(), source })?;
        Self::parse_str(path, &content)
    }

    /// Parses the given feature file `content`, with `path` used for error
    /// reporting only.
    ///
    /// # Errors
    ///
    /// If any line violates the grammar.
    pub fn parse_str(
        path: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Self, Error> {
        let path = path.into();
        let mut feature = Self::default();
        for (num, line) in content.lines().enumerate() {
            feature.append_line(line).map_err(|kind| Error::Syntax {
                path: path.clone(),
                num: num + 1,
                line: line.trim().to_owned(),
                kind,
            })?;
        }
        Ok(feature)
    }

    /// Classifies a single logical `line` and folds it into this [`Feature`].
    fn append_line(&mut self, line: &str) -> Result<(), SyntaxError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some(title) = line.strip_prefix("Feature:") {
            if !self.scenarios.is_empty() {
                return Err(SyntaxError::FeatureAfterScenarios);
            }
            self.title = title.trim().to_owned();
            return Ok(());
        }

        if let Some(title) = line.strip_prefix("Scenario:") {
            self.scenarios.push(Scenario {
                title: title.trim().to_owned(),
                steps: Vec::new(),
            });
            return Ok(());
        }

        if STEP_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
            let Some(scenario) = self.scenarios.last_mut() else {
                return Err(SyntaxError::StepWithoutScenario);
            };
            scenario.steps.push(line.to_owned());
            return Ok(());
        }

        if !self.scenarios.is_empty() {
            return Err(SyntaxError::DescriptionAfterScenarios);
        }
        self.description.push(line.to_owned());
        Ok(())
    }
}

/// Error of reading or parsing a feature file.
///
/// Any of these is fatal to the whole run.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to read the feature file.
    #[display(fmt = "Unable to read feature file \"{}\": {}", "path.display()", source)]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,

        /// Original [`io::Error`].
        source: io::Error,
    },

    /// A line violating the feature grammar.
    #[display(
        fmt = "Syntax error on line {} of feature file \"{}\" ({}): \"{}\"",
        num,
        "path.display()",
        kind,
        line
    )]
    Syntax {
        /// Path of the offending file.
        path: PathBuf,

        /// 1-based number of the offending line.
        num: usize,

        /// The offending line, trimmed.
        line: String,

        /// Which grammar rule was violated.
        kind: SyntaxError,
    },
}

/// Grammar violation inside a feature file.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum SyntaxError {
    /// `Feature:` header encountered after a `Scenario:` was already opened.
    #[display(fmt = "\"Feature:\" header after the first \"Scenario:\"")]
    FeatureAfterScenarios,

    /// Step line encountered before any `Scenario:` was opened.
    #[display(fmt = "step line before the first \"Scenario:\"")]
    StepWithoutScenario,

    /// Description line encountered after a `Scenario:` was already opened.
    #[display(fmt = "description line after the first \"Scenario:\"")]
    DescriptionAfterScenarios,
}
