// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::error::WaitError;

/// A single-value barrier: one side `set`s a value, any thread may block
/// until it arrives.
pub struct Latch<T> {
    lock: Mutex<Option<T>>,
    cond: Condvar,
}

impl<T> Latch<T> {
    /// Create a new, empty `Latch`
    pub fn new() -> Latch<T> {
        Latch {
            lock: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    /// Store the value and wake up every waiter. Only the first value is kept.
    pub fn set(&self, value: T) {
        let mut guard = match self.lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if guard.is_none() {
            *guard = Some(value);
        }

        self.cond.notify_all();
    }

    pub fn is_set(&self) -> bool {
        self.lock.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }
}

impl<T: Clone> Latch<T> {
    /// Block until a value is set
    pub fn wait(&self) -> Result<T, WaitError> {
        let mut guard = self.lock.lock().map_err(|_| WaitError::Poisoned)?;

        loop {
            if let Some(ref value) = *guard {
                return Ok(value.clone());
            }

            guard = self.cond.wait(guard).map_err(|_| WaitError::Poisoned)?;
        }
    }

    /// Block until a value is set or `timeout` elapses
    pub fn wait_timeout(&self, timeout: Duration) -> Result<T, WaitError> {
        let deadline = Instant::now() + timeout;
        let mut guard = self.lock.lock().map_err(|_| WaitError::Poisoned)?;

        loop {
            if let Some(ref value) = *guard {
                return Ok(value.clone());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(WaitError::Timeout(timeout));
            }

            guard = self
                .cond
                .wait_timeout(guard, deadline - now)
                .map_err(|_| WaitError::Poisoned)?
                .0;
        }
    }
}

impl<T> Default for Latch<T> {
    fn default() -> Latch<T> {
        Latch::new()
    }
}

impl<T> fmt::Debug for Latch<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_set() {
            write!(f, "Latch(Set)")
        } else {
            write!(f, "Latch(Empty)")
        }
    }
}
