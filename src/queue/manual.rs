// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::{Queue, Task, TaskQueue};
use crate::sync::Spinlock;

struct Tasks {
    pending: Spinlock<VecDeque<Task>>,
}

impl TaskQueue for Tasks {
    fn enqueue(&self, task: Task) {
        self.pending.lock().push_back(task);
    }
}

/// A queue that only runs tasks when told to.
///
/// Nothing happens until `run_one` or `run` is called on the owning thread,
/// which makes every interleaving of reactions deterministic.
#[derive(Clone)]
pub struct ManualQueue {
    tasks: Arc<Tasks>,
}

impl ManualQueue {
    pub fn new() -> ManualQueue {
        ManualQueue {
            tasks: Arc::new(Tasks {
                pending: Spinlock::new(VecDeque::new()),
            }),
        }
    }

    /// Handle to pass to futures
    pub fn queue(&self) -> Queue {
        self.tasks.clone()
    }

    /// Run the oldest task, returning `false` if there was none
    pub fn run_one(&self) -> bool {
        // The lock is released before the task runs, so it may enqueue more
        let task = self.tasks.pending.lock().pop_front();

        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty, including tasks enqueued along the
    /// way. Returns how many ran.
    pub fn run(&self) -> usize {
        let mut count = 0;
        while self.run_one() {
            count += 1;
        }
        trace!("ManualQueue ran {} tasks", count);
        count
    }

    pub fn len(&self) -> usize {
        self.tasks.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ManualQueue {
    fn default() -> ManualQueue {
        ManualQueue::new()
    }
}

impl fmt::Debug for ManualQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ManualQueue {{ pending: {} }}", self.len())
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_manual_queue_fifo() {
        let manual = ManualQueue::new();
        let queue = manual.queue();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            queue.enqueue(Box::new(move || order.lock().unwrap().push(i)));
        }

        assert_eq!(manual.len(), 5);
        assert!(order.lock().unwrap().is_empty());

        assert_eq!(manual.run(), 5);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        assert!(manual.is_empty());
    }

    #[test]
    fn test_manual_queue_nested_enqueue() {
        let manual = ManualQueue::new();
        let queue = manual.queue();
        let order = Arc::new(Mutex::new(Vec::new()));

        {
            let order = order.clone();
            let inner_queue = queue.clone();
            queue.enqueue(Box::new(move || {
                order.lock().unwrap().push("outer");
                let order = order.clone();
                inner_queue.enqueue(Box::new(move || order.lock().unwrap().push("inner")));
            }));
        }

        assert!(manual.run_one());
        assert_eq!(*order.lock().unwrap(), vec!["outer"]);
        assert_eq!(manual.len(), 1);

        assert_eq!(manual.run(), 1);
        assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
        assert!(!manual.run_one());
    }
}
