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

//! The lock guarding every future's settlement state

use std::cell::UnsafeCell;
use std::cmp;
use std::fmt;
use std::hint;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

// Spins between two reads of a contended lock
const BACKOFF_MIN: u32 = 1 << 4;
const BACKOFF_MAX: u32 = 1 << 10;

/// A simple, unfair spinlock.
///
/// Critical sections in this crate only move a few words around (push a
/// reaction, swap a state), and user callbacks are never invoked while it is
/// held, so contention stays short even when a `WorkerQueue` thread and the
/// attaching thread race on the same future.
pub struct Spinlock<T: ?Sized> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

unsafe impl<T: ?Sized + Send> Send for Spinlock<T> {}
unsafe impl<T: ?Sized + Send> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub fn new(data: T) -> Spinlock<T> {
        Spinlock {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> Spinlock<T> {
    fn acquire(&self) -> bool {
        self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub fn try_lock(&self) -> Option<SpinlockGuard<T>> {
        // A spurious failure of the weak exchange is retried only while unlocked
        while !self.locked.load(Ordering::Relaxed) {
            if self.acquire() {
                return Some(SpinlockGuard {
                    lock: self,
                    _marker: PhantomData,
                });
            }
        }
        None
    }

    pub fn lock(&self) -> SpinlockGuard<T> {
        let mut backoff = BACKOFF_MIN;

        while !self.acquire() {
            while self.locked.load(Ordering::Relaxed) {
                for _ in 0..backoff {
                    hint::spin_loop();
                }
                backoff = cmp::min(backoff * 2, BACKOFF_MAX);
            }
        }

        SpinlockGuard {
            lock: self,
            _marker: PhantomData,
        }
    }
}

impl<T: Default> Default for Spinlock<T> {
    fn default() -> Spinlock<T> {
        Spinlock::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Spinlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.try_lock() {
            Some(guard) => f.debug_struct("Spinlock").field("data", &&*guard).finish(),
            None => write!(f, "Spinlock {{ <locked> }}"),
        }
    }
}

/// Exclusive access to the data of a `Spinlock`, released on drop
pub struct SpinlockGuard<'a, T: ?Sized + 'a> {
    lock: &'a Spinlock<T>,
    // Send/Sync follow `&mut T`
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: ?Sized> Drop for SpinlockGuard<'a, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

impl<'a, T: ?Sized> Deref for SpinlockGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'a, T: ?Sized> DerefMut for SpinlockGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}
