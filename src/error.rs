// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consolidated error handling types.
//!
//! Only the errors here are fatal to a run: configuration problems abort
//! before any phase starts, feature problems abort the run upon detection in
//! any worker. Step failures and unimplemented steps are never errors; they
//! are absorbed into the run's [`Summary`].
//!
//! [`Summary`]: crate::stats::Summary

use derive_more::{Display, Error, From};

use crate::{config, feature};

/// Top-level fatal error of a run.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Configuration loading or validation failure.
    #[display(fmt = "{}", _0)]
    Config(config::Error),

    /// Feature file reading or parsing failure.
    #[display(fmt = "{}", _0)]
    Feature(feature::Error),
}

impl Error {
    /// Returns the process exit code of this [`Error`]'s category.
    ///
    /// Code `0` is reserved for a completed run, however many scenarios
    /// failed; every fatal category gets its own non-zero code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(config::Error::Read { .. }) => 2,
            Self::Config(config::Error::Parse { .. }) => 3,
            Self::Config(
                config::Error::MissingName { .. }
                | config::Error::DuplicateName { .. },
            ) => 4,
            Self::Feature(feature::Error::Read { .. }) => 5,
            Self::Feature(feature::Error::Syntax { .. }) => 6,
        }
    }
}

/// Result of a run, failing only on fatal [`Error`]s.
pub type Result<T> = std::result::Result<T, Error>;
