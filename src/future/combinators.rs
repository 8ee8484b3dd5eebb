// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use super::cores::Reaction;
use super::{make, Future, Resolution};
use crate::queue::Queue;
use crate::sync::Spinlock;

struct Collect<To> {
    values: Vec<Option<To>>,
    remaining: usize,
}

fn into_futures<To, Eo, I>(queue: &Queue, inputs: I) -> Vec<Future<To, Eo>>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static,
          I: IntoIterator,
          I::Item: Into<Resolution<To, Eo>>
{
    inputs.into_iter()
          .map(|input| {
              let input: Resolution<To, Eo> = input.into();
              match input {
                  Resolution::Future(fut) => fut,
                  Resolution::Value(val) => Future::resolved(queue, val),
              }
          })
          .collect()
}

/// Wait for every input to fulfill.
///
/// The returned future fulfills with the values in input order, no matter
/// in which order the inputs settle, or rejects with the first rejection.
/// Inputs still pending at that point keep running; their outcomes are
/// ignored. No inputs at all fulfills with an empty `Vec`.
pub fn all<To, Eo, I>(queue: &Queue, inputs: I) -> Future<Vec<To>, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static,
          I: IntoIterator,
          I::Item: Into<Resolution<To, Eo>>
{
    let inputs = into_futures(queue, inputs);
    let (promise, output) = make(queue);

    if inputs.is_empty() {
        promise.resolve(Vec::new());
        return output;
    }

    let collect = Arc::new(Spinlock::new(Collect {
        values: inputs.iter().map(|_| None).collect(),
        remaining: inputs.len(),
    }));

    for (index, input) in inputs.into_iter().enumerate() {
        let promise = promise.clone();
        let collect = collect.clone();

        input.0.subscribe(Reaction::new(move |val| {
            match val {
                Ok(val) => {
                    let values = {
                        let mut collect = collect.lock();
                        collect.values[index] = Some(val);
                        collect.remaining -= 1;

                        if collect.remaining > 0 {
                            return;
                        }

                        collect.values.drain(..).flatten().collect()
                    };

                    promise.resolve(values);
                }
                Err(err) => promise.reject(err),
            }
        }));
    }

    output
}

/// Settle like whichever input settles first.
///
/// With no inputs the returned future stays pending forever.
pub fn race<To, Eo, I>(queue: &Queue, inputs: I) -> Future<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static,
          I: IntoIterator,
          I::Item: Into<Resolution<To, Eo>>
{
    let inputs = into_futures(queue, inputs);
    let (promise, output) = make(queue);

    if inputs.is_empty() {
        debug!("race over no inputs never settles");
    }

    for input in inputs {
        let promise = promise.clone();
        input.0.subscribe(Reaction::new(move |val| promise.settle(val)));
    }

    output
}
