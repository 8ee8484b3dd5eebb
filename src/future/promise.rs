// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::sync::Arc;

use super::cores::{Core, Reaction};
use super::{Future, Resolution};

/// The settlement functions of one `Future`.
///
/// Handed to the executor in `Future::new` (or returned by `make`). Clones
/// all settle the same future; only the first settlement has any effect.
pub struct Promise<To, Eo>(Arc<Core<To, Eo>>);

impl<To, Eo> Promise<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    pub(crate) fn with_core(core: Arc<Core<To, Eo>>) -> Promise<To, Eo> {
        Promise(core)
    }

    /// Fulfill the future with `val`
    pub fn resolve(&self, val: To) {
        self.0.settle(Ok(val));
    }

    /// Reject the future with `err`. The reason is stored as-is.
    pub fn reject(&self, err: Eo) {
        self.0.settle(Err(err));
    }

    /// Fulfill or reject depending on `val`
    pub fn settle(&self, val: Result<To, Eo>) {
        self.0.settle(val);
    }

    /// Resolve with a value or make the future follow another future.
    ///
    /// Following a future locks this one: later `resolve`/`reject` calls are
    /// ignored and the adopted future's outcome becomes this one's, once it
    /// is known. Chains of futures flatten transitively.
    pub fn resolve_with(&self, resolution: Resolution<To, Eo>) {
        match resolution {
            Resolution::Value(val) => self.resolve(val),
            Resolution::Future(fut) => self.adopt(fut),
        }
    }

    fn adopt(&self, fut: Future<To, Eo>) {
        if !self.0.begin_adoption() {
            return;
        }

        if Arc::ptr_eq(&fut.0, &self.0) {
            warn!("future resolved with itself, it will never settle");
            return;
        }

        let core = self.0.clone();
        fut.0.subscribe(Reaction::new(move |val| {
            core.complete_adoption(val);
        }));
    }
}

impl<To, Eo> Clone for Promise<To, Eo> {
    fn clone(&self) -> Promise<To, Eo> {
        Promise(self.0.clone())
    }
}

impl<To, Eo> fmt::Debug for Promise<To, Eo> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Promise").field(&self.0).finish()
    }
}
