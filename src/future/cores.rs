// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::mem;
use std::sync::Arc;

use super::Status;
use crate::queue::Queue;
use crate::sync::{Latch, Spinlock};

/// A callback waiting for a `Core` to settle.
///
/// It receives its own copy of the outcome and always runs from the queue.
pub struct Reaction<To, Eo>(Box<dyn FnOnce(Result<To, Eo>) + Send + 'static>);

impl<To, Eo> Reaction<To, Eo> {
    pub fn new<F>(f: F) -> Reaction<To, Eo>
        where F: FnOnce(Result<To, Eo>) + Send + 'static
    {
        Reaction(Box::new(f))
    }
}

enum State<To, Eo> {
    Pending {
        reactions: Vec<Reaction<To, Eo>>,
        // Resolved with another future whose outcome is still outstanding
        adopting: bool,
    },
    // Shared so the payload can be copied after the lock is released
    Settled(Arc<Result<To, Eo>>),
}

impl<To, Eo> State<To, Eo> {
    fn status(&self) -> Status {
        match *self {
            State::Pending { .. } => Status::Pending,
            State::Settled(ref val) if val.is_ok() => Status::Fulfilled,
            State::Settled(..) => Status::Rejected,
        }
    }
}

/// The shared settlement state of one future.
///
/// `Future` handles and the `Promise` given to its executor all point at the
/// same `Core`. The lock is never held while user code runs, `Clone` impls of
/// the payload included: reactions are moved out of the state first, and the
/// outcome is copied only after the guard is dropped.
pub struct Core<To, Eo> {
    queue: Queue,
    state: Spinlock<State<To, Eo>>,
    // Shared by every blocking waiter, subscribed at most once
    latch: Spinlock<Option<Arc<Latch<Result<To, Eo>>>>>,
}

impl<To, Eo> Core<To, Eo>
    where To: Clone + Send + 'static,
          Eo: Clone + Send + 'static
{
    pub fn new(queue: Queue) -> Arc<Core<To, Eo>> {
        Arc::new(Core {
            queue: queue,
            state: Spinlock::new(State::Pending {
                reactions: Vec::new(),
                adopting: false,
            }),
            latch: Spinlock::new(None),
        })
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn status(&self) -> Status {
        self.state.lock().status()
    }

    pub fn outcome(&self) -> Option<Result<To, Eo>> {
        self.settled().map(|val| (*val).clone())
    }

    /// Settle through the public settlement functions. A no-op once settled
    /// or while adopting another future.
    pub fn settle(&self, val: Result<To, Eo>) -> bool {
        self.transition(val, false)
    }

    /// Settle with the outcome of the adopted future.
    pub fn complete_adoption(&self, val: Result<To, Eo>) -> bool {
        self.transition(val, true)
    }

    /// Mark the core as following another future. Returns `false` if it was
    /// already settled or already adopting.
    pub fn begin_adoption(&self) -> bool {
        let mut state = self.state.lock();

        if let State::Pending { ref mut adopting, .. } = *state {
            if !*adopting {
                *adopting = true;
                return true;
            }
        }

        false
    }

    /// Register a reaction. If the core has already settled the reaction is
    /// enqueued right away, otherwise it waits for settlement.
    pub fn subscribe(&self, reaction: Reaction<To, Eo>) {
        let val = {
            let mut state = self.state.lock();

            match *state {
                State::Pending { ref mut reactions, .. } => {
                    reactions.push(reaction);
                    return;
                }
                State::Settled(ref val) => val.clone(),
            }
        };

        self.dispatch(reaction, (*val).clone());
    }

    /// The latch blocking waiters sleep on.
    ///
    /// Only the first call subscribes a reaction; later calls, timed out or
    /// not, share the same latch.
    pub fn latch(&self) -> Arc<Latch<Result<To, Eo>>> {
        let (latch, fresh) = {
            let mut slot = self.latch.lock();

            match *slot {
                Some(ref latch) => (latch.clone(), false),
                None => {
                    let latch = Arc::new(Latch::new());
                    *slot = Some(latch.clone());
                    (latch, true)
                }
            }
        };

        if fresh {
            let latch = latch.clone();
            self.subscribe(Reaction::new(move |val| latch.set(val)));
        }

        latch
    }

    fn settled(&self) -> Option<Arc<Result<To, Eo>>> {
        match *self.state.lock() {
            State::Pending { .. } => None,
            State::Settled(ref val) => Some(val.clone()),
        }
    }

    fn transition(&self, val: Result<To, Eo>, adopted: bool) -> bool {
        let val = Arc::new(val);

        let reactions = {
            let mut state = self.state.lock();

            match *state {
                State::Pending { adopting, .. } if adopting == adopted => {}
                _ => return false,
            }

            match mem::replace(&mut *state, State::Settled(val.clone())) {
                State::Pending { reactions, .. } => reactions,
                State::Settled(..) => unreachable!(),
            }
        };

        trace!("settled as {:?} with {} reactions",
               if val.is_ok() { Status::Fulfilled } else { Status::Rejected },
               reactions.len());

        for reaction in reactions {
            self.dispatch(reaction, (*val).clone());
        }

        true
    }

    fn dispatch(&self, reaction: Reaction<To, Eo>, val: Result<To, Eo>) {
        let Reaction(f) = reaction;
        self.queue.enqueue(Box::new(move || f(val)));
    }
}

impl<To, Eo> fmt::Debug for Core<To, Eo> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.state.try_lock() {
            Some(state) => write!(f, "Core({:?})", state.status()),
            None => write!(f, "Core(<locked>)"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::queue::ManualQueue;

    fn recorder() -> (Arc<Mutex<Vec<Result<u32, &'static str>>>>, impl Fn() -> Reaction<u32, &'static str>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let make = {
            let seen = seen.clone();
            move || {
                let seen = seen.clone();
                Reaction::new(move |val| seen.lock().unwrap().push(val))
            }
        };
        (seen, make)
    }

    #[test]
    fn test_core_settles_once() {
        let manual = ManualQueue::new();
        let core = Core::<u32, &'static str>::new(manual.queue());

        assert_eq!(core.status(), Status::Pending);
        assert!(core.settle(Ok(1)));
        assert!(!core.settle(Ok(2)));
        assert!(!core.settle(Err("late")));

        assert_eq!(core.status(), Status::Fulfilled);
        assert_eq!(core.outcome(), Some(Ok(1)));
    }

    #[test]
    fn test_core_dispatch_is_deferred_and_ordered() {
        let manual = ManualQueue::new();
        let core = Core::new(manual.queue());
        let (seen, reaction) = recorder();

        core.subscribe(reaction());
        core.subscribe(reaction());
        assert!(manual.is_empty());

        core.settle(Err("nope"));
        assert_eq!(manual.len(), 2);
        assert!(seen.lock().unwrap().is_empty());

        // Attaching after settlement still goes through the queue
        core.subscribe(reaction());
        assert_eq!(manual.len(), 3);
        assert!(seen.lock().unwrap().is_empty());

        manual.run();
        assert_eq!(*seen.lock().unwrap(), vec![Err("nope"); 3]);
    }

    #[test]
    fn test_core_adoption_locks_out_settle() {
        let manual = ManualQueue::new();
        let core = Core::<u32, &'static str>::new(manual.queue());

        assert!(core.begin_adoption());
        assert!(!core.begin_adoption());
        assert!(!core.settle(Ok(1)));
        assert_eq!(core.status(), Status::Pending);

        assert!(core.complete_adoption(Ok(7)));
        assert!(!core.complete_adoption(Ok(8)));
        assert_eq!(core.outcome(), Some(Ok(7)));
    }

    #[test]
    fn test_core_latch_subscribes_once() {
        let manual = ManualQueue::new();
        let core = Core::<u32, &'static str>::new(manual.queue());

        let first = core.latch();
        for _ in 0..100 {
            assert!(Arc::ptr_eq(&first, &core.latch()));
        }

        core.settle(Ok(3));
        assert_eq!(manual.len(), 1);

        manual.run();
        assert_eq!(first.wait(), Ok(Ok(3)));
    }

    #[test]
    fn test_core_payload_cloned_outside_lock() {
        // Cloning inspects the core; this would spin forever under the lock
        struct Reentrant(Arc<Spinlock<Option<Arc<Core<Reentrant, ()>>>>>);

        impl Clone for Reentrant {
            fn clone(&self) -> Reentrant {
                if let Some(ref core) = *self.0.lock() {
                    let _ = core.status();
                }
                Reentrant(self.0.clone())
            }
        }

        let manual = ManualQueue::new();
        let core = Core::<Reentrant, ()>::new(manual.queue());
        let slot = Arc::new(Spinlock::new(Some(core.clone())));

        let seen = Arc::new(Mutex::new(0));
        let count = 2;
        for _ in 0..count {
            let seen = seen.clone();
            core.subscribe(Reaction::new(move |val: Result<Reentrant, ()>| {
                assert!(val.is_ok());
                *seen.lock().unwrap() += 1;
            }));
        }

        assert!(core.settle(Ok(Reentrant(slot.clone()))));
        assert!(core.outcome().is_some());
        core.subscribe(Reaction::new(|val| assert!(val.is_ok())));
        manual.run();

        assert_eq!(*seen.lock().unwrap(), count);
        // Break the reference cycle
        slot.lock().take();
    }
}
