// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use super::Future;

/// What a future is resolved with: either a final value, or another future
/// whose outcome it should take over.
pub enum Resolution<T, E> {
    Value(T),
    Future(Future<T, E>),
}

impl<T, E> From<Future<T, E>> for Resolution<T, E> {
    fn from(fut: Future<T, E>) -> Resolution<T, E> {
        Resolution::Future(fut)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Resolution<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Resolution::Value(ref val) => write!(f, "Value({:?})", val),
            Resolution::Future(ref fut) => write!(f, "{:?}", fut),
        }
    }
}

/// Anything a reaction callback may return.
///
/// * `Ok(value)` fulfills the downstream future,
/// * `Err(reason)` rejects it directly,
/// * a `Future` (or `Resolution::Future`) makes it follow that future.
pub trait IntoResolution {
    type Value;
    type Error;

    fn into_resolution(self) -> Result<Resolution<Self::Value, Self::Error>, Self::Error>;
}

impl<T, E> IntoResolution for Result<T, E> {
    type Value = T;
    type Error = E;

    fn into_resolution(self) -> Result<Resolution<T, E>, E> {
        self.map(Resolution::Value)
    }
}

impl<T, E> IntoResolution for Future<T, E> {
    type Value = T;
    type Error = E;

    fn into_resolution(self) -> Result<Resolution<T, E>, E> {
        Ok(Resolution::Future(self))
    }
}

impl<T, E> IntoResolution for Resolution<T, E> {
    type Value = T;
    type Error = E;

    fn into_resolution(self) -> Result<Resolution<T, E>, E> {
        Ok(self)
    }
}
