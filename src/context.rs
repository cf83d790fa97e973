// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named execution lane owned by a single phase worker.

use std::{collections::HashMap, path::PathBuf};

use crate::config::ContextSpec;

/// Isolated execution lane: the unit of concurrency within a phase.
///
/// A [`Context`] is constructed once from its [`ContextSpec`] and moved into
/// exactly one worker for its whole lifetime. No two workers ever observe the
/// same [`Context`], so its [`data`] bag needs no synchronization.
///
/// [`data`]: Context::data
#[derive(Clone, Debug)]
pub struct Context {
    /// Name of this [`Context`], unique across the whole configuration.
    name: String,

    /// Key/value bag for passing derived values between steps of the same
    /// scenario (an arithmetic result, for example).
    pub data: HashMap<String, String>,

    /// Feature files to execute, in order.
    pub(crate) features: Vec<PathBuf>,
}

impl Context {
    /// Returns the unique name of this [`Context`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<ContextSpec> for Context {
    fn from(spec: ContextSpec) -> Self {
        Self {
            name: spec.name,
            data: HashMap::new(),
            features: spec.features,
        }
    }
}
