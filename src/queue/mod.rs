// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deferred task queues
//!
//! Every reaction of a `Future` is dispatched through a `TaskQueue`. The
//! queue contract is small:
//!
//! * `enqueue` must never run the task before it returns,
//! * tasks enqueued by one caller run in FIFO order,
//! * one task runs to completion before the next one starts.
//!
//! The queue is injected into each future rather than looked up globally,
//! which is what lets tests drive futures step by step with a `ManualQueue`.

use std::sync::Arc;

pub use self::manual::ManualQueue;
pub use self::worker::WorkerQueue;

mod manual;
mod worker;

/// A zero-argument callback waiting on a queue
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Shared handle to a task queue, stored by every future
pub type Queue = Arc<dyn TaskQueue>;

pub trait TaskQueue: Send + Sync {
    /// Schedule `task` to run after the caller's current stack has unwound
    fn enqueue(&self, task: Task);
}

impl<F> TaskQueue for F
    where F: Fn(Task) + Send + Sync
{
    fn enqueue(&self, task: Task) {
        self(task)
    }
}
