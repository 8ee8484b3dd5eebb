// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised by the crate itself
//!
//! Failure reasons of a `Future` are the caller's own `E` and never pass
//! through these types.

use std::time::Duration;

use thiserror::Error;

/// Failure to observe a settlement by blocking the current thread
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("future did not settle within {0:?}")]
    Timeout(Duration),
    #[error("wait lock poisoned by a panicking reaction")]
    Poisoned,
}
