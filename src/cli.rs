// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for composing CLI options.

use std::path::PathBuf;

pub use clap::Parser;

/// CLI (command line interface) of a top-level [`Paracuke`] executor.
///
/// [`Paracuke`]: crate::Paracuke
#[derive(clap::Parser, Clone, Debug)]
#[command(
    name = "paracuke",
    version,
    about = "Run Gherkin features in parallel contexts"
)]
pub struct Opts {
    /// Outputs debug details of parsed contexts and features.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Path to the contexts configuration file.
    #[arg(value_name = "contexts", default_value = "features/default.yaml")]
    pub config: PathBuf,
}
