// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run configuration: ordered [`Phase`]s of named execution contexts.
//!
//! The on-disk encoding is YAML:
//!
//! ```yaml
//! phases:
//!   - name: init
//!     contexts:
//!       - name: setup
//!         features: [features/setup.feature]
//!   - name: parallel
//!     contexts:
//!       - name: desktop
//!         features: [features/a.feature, features/b.feature]
//!       - name: server
//!         features: [features/c.feature]
//!   - name: end
//!     contexts: []
//! ```
//!
//! Context names must be unique across the *whole* file, not merely within
//! their phase, and every context must carry a non-empty name. Both rules are
//! checked before any phase starts executing.

use std::{collections::HashSet, fs, io, path::PathBuf};

use derive_more::{Display, Error};
use serde::Deserialize;

/// Whole run configuration: [`Phase`]s in execution order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// [`Phase`]s to execute, strictly one after another.
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// Ordered stage of the run.
///
/// All contexts of a [`Phase`] run concurrently, with no ordering guarantee
/// relative to each other; the next [`Phase`] starts only once every context
/// of this one has finished.
#[derive(Clone, Debug, Deserialize)]
pub struct Phase {
    /// Name of this [`Phase`], used for reporting only.
    pub name: String,

    /// Contexts executed concurrently within this [`Phase`].
    #[serde(default)]
    pub contexts: Vec<ContextSpec>,
}

/// Declaration of a single execution context.
#[derive(Clone, Debug, Deserialize)]
pub struct ContextSpec {
    /// Unique name of the context.
    pub name: String,

    /// Feature files the context executes, in order.
    #[serde(default)]
    pub features: Vec<PathBuf>,
}

impl Config {
    /// Loads and validates the configuration at the given `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or parsed, or violates the context-name
    /// rules (see [`Config::validate()`]).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .map_err(|source| Error::Read { path: path.clone(), source })?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|source| Error::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every context has a non-empty name and that no two
    /// contexts across the whole configuration share one.
    ///
    /// # Errors
    ///
    /// With [`Error::MissingName`] or [`Error::DuplicateName`] accordingly.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for phase in &self.phases {
            for context in &phase.contexts {
                if context.name.is_empty() {
                    return Err(Error::MissingName {
                        phase: phase.name.clone(),
                    });
                }
                if !seen.insert(context.name.as_str()) {
                    return Err(Error::DuplicateName {
                        name: context.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Error of loading or validating a [`Config`].
///
/// Any of these aborts before the first phase runs.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to read the configuration file.
    #[display(fmt = "Unable to read contexts file \"{}\": {}", "path.display()", source)]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,

        /// Original [`io::Error`].
        source: io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape.
    #[display(fmt = "Malformed contexts file \"{}\": {}", "path.display()", source)]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,

        /// Original [`serde_yaml::Error`].
        source: serde_yaml::Error,
    },

    /// A context is declared without a name.
    #[display(fmt = "Context without a name in phase \"{}\"", phase)]
    MissingName {
        /// Name of the phase holding the nameless context.
        #[error(not(source))]
        phase: String,
    },

    /// Two contexts share the same name somewhere in the configuration.
    #[display(fmt = "Duplicate context name \"{}\"", name)]
    DuplicateName {
        /// The non-unique name.
        #[error(not(source))]
        name: String,
    },
}

#[cfg(test)]
mod spec {
    use super::{Config, Error};

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn deserializes_ordered_phases() {
        let config = parse(
            "phases:\n\
             \x20 - name: init\n\
             \x20   contexts:\n\
             \x20     - name: setup\n\
             \x20       features: [a.feature]\n\
             \x20 - name: parallel\n\
             \x20   contexts:\n\
             \x20     - name: c1\n\
             \x20       features: [f1.feature]\n\
             \x20     - name: c2\n\
             \x20       features: [f2.feature, f3.feature]\n\
             \x20 - name: end\n",
        );

        assert_eq!(
            config.phases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            ["init", "parallel", "end"],
        );
        assert_eq!(config.phases[1].contexts[1].features.len(), 2);
        assert!(config.phases[2].contexts.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn rejects_duplicate_names_across_phases() {
        let config = parse(
            "phases:\n\
             \x20 - name: init\n\
             \x20   contexts:\n\
             \x20     - name: shared\n\
             \x20 - name: parallel\n\
             \x20   contexts:\n\
             \x20     - name: shared\n",
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::DuplicateName { name } if name == "shared"));
    }

    #[test]
    fn rejects_empty_name() {
        let config = parse(
            "phases:\n\
             \x20 - name: parallel\n\
             \x20   contexts:\n\
             \x20     - name: \"\"\n",
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::MissingName { phase } if phase == "parallel"));
    }
}
