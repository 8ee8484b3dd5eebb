// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

//  Permission is hereby granted, free of charge, to any person obtaining a
//  copy of this software and associated documentation files (the "Software"),
//  to deal in the Software without restriction, including without limitation
//  the rights to use, copy, modify, merge, publish, distribute, sublicense,
//  and/or sell copies of the Software, and to permit persons to whom the
//  Software is furnished to do so, subject to the following conditions:
//
//  The above copyright notice and this permission notice shall be included in
//  all copies or substantial portions of the Software.
//
//  THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
//  OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
//  FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
//  DEALINGS IN THE SOFTWARE.

//! Single-settlement futures with deferred reactions
//!
//! ```
//! use deferred::{Future, ManualQueue};
//!
//! let manual = ManualQueue::new();
//! let queue = manual.queue();
//!
//! let fut: Future<u32, String> = Future::new(&queue, |p| {
//!     p.resolve(20);
//!     Ok(())
//! });
//!
//! let doubled = fut.and_then(|v| Ok(v * 2));
//! assert!(doubled.is_pending());
//!
//! manual.run();
//! assert_eq!(doubled.result(), Some(Ok(40)));
//! ```

#[macro_use]
extern crate log;

pub use crate::error::WaitError;
pub use crate::future::{all, make, race, Future, IntoResolution, Promise, Resolution, Status};
pub use crate::options::Options;
pub use crate::queue::{ManualQueue, Queue, Task, TaskQueue, WorkerQueue};

pub mod error;
pub mod future;
pub mod options;
pub mod queue;
pub mod sync;

/// Spawn a `WorkerQueue` with default options
#[inline]
pub fn worker() -> std::io::Result<WorkerQueue> {
    WorkerQueue::spawn(Options::default())
}

/// Spawn a named `WorkerQueue`
#[inline]
pub fn worker_named(name: &str) -> std::io::Result<WorkerQueue> {
    let mut opts = Options::new();
    opts.name(name.to_owned());
    WorkerQueue::spawn(opts)
}
