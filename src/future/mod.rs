// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Most parts of this module use a certain pattern to describe template parameters.
//
// To => The Ok(To) value a Future settles with
// Eo => The Err(Eo) reason a Future settles with
// Tc, Ec => The same for the c(ontinuation) created by attaching to it

//! Single-settlement futures
//!
//! A `Future` starts out pending and settles exactly once, either fulfilled
//! with a value or rejected with a reason. Reactions attached with `then`,
//! `and_then`, `catch` and friends each produce a new `Future`, and always
//! run from the future's task queue, never on the stack that attached or
//! settled them.

mod combinators;
mod cores;
mod future;
mod promise;
mod resolution;

pub use self::combinators::{all, race};
pub use self::future::Future;
pub use self::promise::Promise;
pub use self::resolution::{IntoResolution, Resolution};

use crate::queue::Queue;

use self::cores::Core;

/// Settlement status of a `Future`. Once it leaves `Pending` it never
/// changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Fulfilled,
    Rejected,
}

/// A pending future together with its settlement functions
pub fn make<To, Eo>(queue: &Queue) -> (Promise<To, Eo>, Future<To, Eo>)
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    let core = Core::new(queue.clone());
    (Promise::with_core(core.clone()), Future(core))
}
