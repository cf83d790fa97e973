// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting [`Run`] events.
//!
//! [`Run`]: crate::event::Run

pub mod basic;
pub mod out;

use async_trait::async_trait;

use crate::event;

#[doc(inline)]
pub use self::{basic::Basic, out::Styles};

/// Writer of [`Run`] events to some output.
///
/// Handles events of all contexts of a phase, so they arrive interleaved in
/// worker completion order; events belonging to one context are ordered.
///
/// [`Run`]: crate::event::Run
#[async_trait(?Send)]
pub trait Writer {
    /// Handles the given [`Run`] event.
    ///
    /// [`Run`]: crate::event::Run
    async fn handle_event(&mut self, ev: event::Run);
}
