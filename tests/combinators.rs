// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate deferred;
extern crate env_logger;
extern crate rand;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use deferred::{all, make, race, Future, ManualQueue, Promise, Status};

type Fut<T> = Future<T, String>;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_all_fulfills_in_order() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let inputs: Vec<Fut<u32>> = vec![Future::resolved(&queue, 1),
                                     Future::resolved(&queue, 2),
                                     Future::resolved(&queue, 3)];
    let fut: Fut<Vec<u32>> = all(&queue, inputs);

    manual.run();
    assert_eq!(fut.result(), Some(Ok(vec![1, 2, 3])));
}

#[test]
fn test_all_rejects_with_first_reason() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let inputs: Vec<Fut<u32>> = vec![Future::resolved(&queue, 1),
                                     Future::rejected(&queue, "x".to_owned()),
                                     Future::resolved(&queue, 3)];
    let fut: Fut<Vec<u32>> = all(&queue, inputs);

    manual.run();
    assert_eq!(fut.result(), Some(Err("x".to_owned())));
}

#[test]
fn test_all_ignores_later_rejections() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let (first, a) = make::<u32, String>(&queue);
    let (second, b) = make::<u32, String>(&queue);
    let fut: Fut<Vec<u32>> = all(&queue, vec![a, b]);

    first.reject("first".to_owned());
    manual.run();
    second.reject("second".to_owned());
    manual.run();

    assert_eq!(fut.result(), Some(Err("first".to_owned())));
}

#[test]
fn test_all_empty_fulfills() {
    init();

    let manual = ManualQueue::new();
    let fut: Fut<Vec<u32>> = all(&manual.queue(), Vec::<Fut<u32>>::new());

    assert_eq!(fut.result(), Some(Ok(Vec::new())));
}

#[test]
fn test_all_keeps_input_order_under_any_settle_order() {
    init();

    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let manual = ManualQueue::new();
        let queue = manual.queue();

        let pairs: Vec<(Promise<usize, String>, Fut<usize>)> = (0..16).map(|_| make(&queue)).collect();
        let fut: Fut<Vec<usize>> = all(&queue, pairs.iter().map(|&(_, ref f)| f.clone()));

        let mut order: Vec<usize> = (0..pairs.len()).collect();
        order.shuffle(&mut rng);

        for (step, &index) in order.iter().enumerate() {
            assert_eq!(fut.status(), Status::Pending, "settled early at step {}", step);
            pairs[index].0.resolve(index * 10);
            manual.run();
        }

        assert_eq!(fut.result(), Some(Ok((0..16).map(|i| i * 10).collect())));
    }
}

#[test]
fn test_race_takes_first_settled() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let (late_promise, late) = make::<u32, String>(&queue);
    let fut: Fut<u32> = race(&queue, vec![late, Future::resolved(&queue, 42)]);

    manual.run();
    assert_eq!(fut.result(), Some(Ok(42)));

    late_promise.resolve(7);
    manual.run();
    assert_eq!(fut.result(), Some(Ok(42)));
}

#[test]
fn test_race_propagates_first_rejection() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let (ok_promise, ok) = make::<u32, String>(&queue);
    let (err_promise, err) = make::<u32, String>(&queue);
    let fut: Fut<u32> = race(&queue, vec![ok, err]);

    err_promise.reject("lost".to_owned());
    ok_promise.resolve(1);
    manual.run();

    assert_eq!(fut.result(), Some(Err("lost".to_owned())));
}

#[test]
fn test_wrap_resolved_forwards_settled_future() {
    init();

    let manual = ManualQueue::new();
    let queue = manual.queue();

    let rejected: Fut<u32> = Future::rejected(&queue, "no".to_owned());
    let wrapped: Fut<u32> = Future::resolve(&queue, rejected.into());

    manual.run();
    assert_eq!(wrapped.result(), Some(Err("no".to_owned())));
}
