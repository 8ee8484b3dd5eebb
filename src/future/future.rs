// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::cores::{Core, Reaction};
use super::{IntoResolution, Promise, Resolution, Status};
use crate::error::WaitError;
use crate::queue::Queue;

/// The eventual outcome of an operation: a value of type `To` or a failure
/// reason of type `Eo`.
///
/// Cloning a `Future` gives another handle to the same outcome.
pub struct Future<To, Eo>(pub(crate) Arc<Core<To, Eo>>);

impl<To, Eo> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    /// Create a future and run `executor` right away, on the current stack.
    ///
    /// The executor receives the future's `Promise`. Returning `Err(reason)`
    /// rejects the future, unless the executor already settled it.
    pub fn new<X>(queue: &Queue, executor: X) -> Future<To, Eo>
        where X: FnOnce(Promise<To, Eo>) -> Result<(), Eo>
    {
        let core = Core::new(queue.clone());
        let promise = Promise::with_core(core.clone());

        if let Err(err) = executor(promise.clone()) {
            promise.reject(err);
        }

        Future(core)
    }

    /// A future fulfilled with `val`
    pub fn resolved(queue: &Queue, val: To) -> Future<To, Eo> {
        Future::new(queue, move |p| {
            p.resolve(val);
            Ok(())
        })
    }

    /// A future settled through the resolution procedure: a value fulfills
    /// it, a future hands over its outcome.
    pub fn resolve(queue: &Queue, resolution: Resolution<To, Eo>) -> Future<To, Eo> {
        Future::new(queue, move |p| {
            p.resolve_with(resolution);
            Ok(())
        })
    }

    /// A future rejected with `err`
    pub fn rejected(queue: &Queue, err: Eo) -> Future<To, Eo> {
        Future::new(queue, move |p| {
            p.reject(err);
            Ok(())
        })
    }

    pub fn queue(&self) -> &Queue {
        self.0.queue()
    }

    pub fn status(&self) -> Status {
        self.0.status()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Status::Pending
    }

    /// A copy of the outcome, or `None` while pending
    pub fn result(&self) -> Option<Result<To, Eo>> {
        self.0.outcome()
    }

    /// Attach a success and a failure callback.
    ///
    /// Returns a new future right away. Whichever callback runs decides how
    /// it settles: `Ok` fulfills it, `Err` rejects it, and a returned future
    /// is followed until it settles.
    pub fn then<S, SR, F, FR>(&self, on_success: S, on_failure: F) -> Future<SR::Value, SR::Error>
        where S: FnOnce(To) -> SR + Send + 'static,
              F: FnOnce(Eo) -> FR + Send + 'static,
              SR: IntoResolution,
              FR: IntoResolution<Value = SR::Value, Error = SR::Error>,
              SR::Value: Clone + Send + 'static,
              SR::Error: Clone + Send + 'static
    {
        self.attach(move |val| {
            match val {
                Ok(val) => on_success(val).into_resolution(),
                Err(err) => on_failure(err).into_resolution(),
            }
        })
    }

    /// Attach a success callback only. Failures pass through unchanged.
    pub fn and_then<S, SR>(&self, on_success: S) -> Future<SR::Value, Eo>
        where S: FnOnce(To) -> SR + Send + 'static,
              SR: IntoResolution<Error = Eo>,
              SR::Value: Clone + Send + 'static
    {
        self.attach(move |val| {
            match val {
                Ok(val) => on_success(val).into_resolution(),
                Err(err) => Err(err),
            }
        })
    }

    /// Attach a failure callback only. Values pass through unchanged.
    pub fn catch<F, FR>(&self, on_failure: F) -> Future<To, FR::Error>
        where F: FnOnce(Eo) -> FR + Send + 'static,
              FR: IntoResolution<Value = To>,
              FR::Error: Clone + Send + 'static
    {
        self.attach(move |val| {
            match val {
                Ok(val) => Ok(Resolution::Value(val)),
                Err(err) => on_failure(err).into_resolution(),
            }
        })
    }

    /// Run `f` with the whole outcome
    pub fn chain<F, FR>(&self, f: F) -> Future<FR::Value, FR::Error>
        where F: FnOnce(Result<To, Eo>) -> FR + Send + 'static,
              FR: IntoResolution,
              FR::Value: Clone + Send + 'static,
              FR::Error: Clone + Send + 'static
    {
        self.attach(move |val| f(val).into_resolution())
    }

    /// A new future with the same outcome, settled one turn of the queue later
    pub fn forward(&self) -> Future<To, Eo> {
        self.attach(|val| val.map(Resolution::Value))
    }

    /// Look at the outcome without changing it
    pub fn finally<F>(&self, f: F) -> Future<To, Eo>
        where F: FnOnce(&Result<To, Eo>) + Send + 'static
    {
        self.attach(move |val| {
            f(&val);
            val.map(Resolution::Value)
        })
    }

    /// Block the current thread until the future settles.
    ///
    /// Another thread has to drive the queue, e.g. a `WorkerQueue`;
    /// waiting on a pending future of a `ManualQueue` from the thread that
    /// runs it never returns.
    pub fn wait(&self) -> Result<Result<To, Eo>, WaitError> {
        match self.0.outcome() {
            Some(val) => Ok(val),
            None => self.0.latch().wait(),
        }
    }

    /// Like `wait`, giving up after `timeout`
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Result<To, Eo>, WaitError> {
        match self.0.outcome() {
            Some(val) => Ok(val),
            None => self.0.latch().wait_timeout(timeout),
        }
    }

    fn attach<Tc, Ec, H>(&self, handler: H) -> Future<Tc, Ec>
        where Tc: Clone + Send + 'static,
              Ec: Clone + Send + 'static,
              H: FnOnce(Result<To, Eo>) -> Result<Resolution<Tc, Ec>, Ec> + Send + 'static
    {
        let core = Core::new(self.0.queue().clone());
        let promise = Promise::with_core(core.clone());

        self.0.subscribe(Reaction::new(move |val| {
            match handler(val) {
                Ok(resolution) => promise.resolve_with(resolution),
                Err(err) => promise.reject(err),
            }
        }));

        Future(core)
    }
}

impl<To, Eo> Clone for Future<To, Eo> {
    fn clone(&self) -> Future<To, Eo> {
        Future(self.0.clone())
    }
}

impl<To, Eo> fmt::Debug for Future<To, Eo> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Future").field(&self.0).finish()
    }
}
