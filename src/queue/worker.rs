// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A task queue drained by one dedicated thread

use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, Builder, JoinHandle};

use super::{Queue, Task, TaskQueue};
use crate::options::Options;

struct Remote {
    name: String,
    // `None` once the worker has been told to shut down
    sender: Mutex<Option<Sender<Task>>>,
}

impl TaskQueue for Remote {
    fn enqueue(&self, task: Task) {
        let guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match *guard {
            Some(ref sender) => {
                if sender.send(task).is_err() {
                    warn!("{}: worker is gone, dropping task", self.name);
                }
            }
            None => warn!("{}: enqueue after shutdown, dropping task", self.name),
        }
    }
}

/// Runs every enqueued task, in order, on its own thread.
///
/// Futures may be created and attached to from any thread; their reactions
/// all run on the worker. A panicking task is logged and does not take the
/// worker down with it.
pub struct WorkerQueue {
    remote: Arc<Remote>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerQueue {
    /// Spawn the worker thread
    pub fn spawn(opts: Options) -> io::Result<WorkerQueue> {
        let name = opts.thread_name().to_owned();
        let (tx, rx) = mpsc::channel();

        let handle = {
            let name = name.clone();
            Builder::new()
                .name(name.clone())
                .stack_size(opts.stack_size)
                .spawn(move || WorkerQueue::work(name, rx))?
        };

        debug!("{}: started", name);

        Ok(WorkerQueue {
            remote: Arc::new(Remote {
                name: name,
                sender: Mutex::new(Some(tx)),
            }),
            handle: Some(handle),
        })
    }

    /// Handle to pass to futures
    pub fn queue(&self) -> Queue {
        self.remote.clone()
    }

    pub fn name(&self) -> &str {
        &self.remote.name
    }

    /// Stop accepting tasks, let the worker finish the ones already queued
    /// and wait for it to exit.
    pub fn shutdown(mut self) -> thread::Result<()> {
        self.close()
    }

    fn close(&mut self) -> thread::Result<()> {
        {
            let mut guard = match self.remote.sender.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.take();
        }

        match self.handle.take() {
            Some(handle) if handle.thread().id() != thread::current().id() => handle.join(),
            // Dropped from one of its own tasks; the worker exits on its own
            // once the channel is drained.
            _ => Ok(()),
        }
    }

    fn work(name: String, rx: Receiver<Task>) {
        let mut count = 0usize;

        for task in rx.iter() {
            if let Err(err) = panic::catch_unwind(AssertUnwindSafe(task)) {
                error!("{}: task panicked: {}", name, panic_message(&*err));
            }
            count += 1;
        }

        debug!("{}: stopped after {} tasks", name, count);
    }
}

impl Drop for WorkerQueue {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!("{}: worker panicked: {}", self.remote.name, panic_message(&*err));
        }
    }
}

impl fmt::Debug for WorkerQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WorkerQueue({})", self.remote.name)
    }
}

fn panic_message(err: &(dyn Any + Send)) -> &str {
    if let Some(s) = err.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = err.downcast_ref::<String>() {
        &s[..]
    } else {
        "Box<Any>"
    }
}

#[cfg(test)]
mod test {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_worker_queue_fifo() {
        let worker = WorkerQueue::spawn(Options::default()).unwrap();
        let queue = worker.queue();
        let (tx, rx) = mpsc::channel();

        for i in 0..10 {
            let tx = tx.clone();
            queue.enqueue(Box::new(move || tx.send(i).unwrap()));
        }

        let received: Vec<_> = (0..10).map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap()).collect();
        assert_eq!(received, (0..10).collect::<Vec<_>>());

        worker.shutdown().unwrap();
    }

    #[test]
    fn test_worker_queue_survives_panic() {
        let mut opts = Options::new();
        opts.name("panicky".to_owned());

        let worker = WorkerQueue::spawn(opts).unwrap();
        assert_eq!(worker.name(), "panicky");

        let queue = worker.queue();
        let (tx, rx) = mpsc::channel();

        queue.enqueue(Box::new(|| panic!("boom")));
        queue.enqueue(Box::new(move || tx.send("after").unwrap()));

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("after"));
        worker.shutdown().unwrap();
    }

    #[test]
    fn test_worker_queue_drains_on_shutdown() {
        let worker = WorkerQueue::spawn(Options::default()).unwrap();
        let queue = worker.queue();
        let (tx, rx) = mpsc::channel();

        for i in 0..100 {
            let tx = tx.clone();
            queue.enqueue(Box::new(move || tx.send(i).unwrap()));
        }
        drop(tx);

        worker.shutdown().unwrap();
        assert_eq!(rx.iter().count(), 100);

        // Late tasks are dropped, not run
        let (tx, rx) = mpsc::channel::<()>();
        queue.enqueue(Box::new(move || tx.send(()).unwrap()));
        assert!(rx.recv().is_err());
    }
}
