// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate deferred;
extern crate env_logger;

use std::thread;
use std::time::Duration;

use deferred::{all, race, Future};

fn main() {
    env_logger::init();

    let worker = deferred::worker_named("demo").unwrap();
    let queue = worker.queue();

    let delayed = |ms: u64, val: f64| -> Future<f64, &'static str> {
        Future::new(&queue, move |p| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(ms));
                p.resolve(val);
            });
            Ok(())
        })
    };

    let r = delayed(20, 1.23)
        .then(|res| {
                  assert_eq!(res, 1.23);
                  Ok::<_, &'static str>(34.0)
              },
              |err| {
                  assert_eq!(err, "Final error");
                  Ok(35.0)
              })
        .wait()
        .unwrap();
    println!("then: {:?}", r);

    let every: Future<Vec<f64>, &'static str> = all(&queue, vec![delayed(30, 1.0), delayed(10, 2.0), delayed(20, 3.0)]);
    println!("all: {:?}", every.wait().unwrap());

    let first: Future<f64, &'static str> = race(&queue, vec![delayed(50, 1.0), delayed(5, 2.0)]);
    println!("race: {:?}", first.wait().unwrap());

    worker.shutdown().unwrap();
}
