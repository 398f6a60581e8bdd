// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The nine named queues, drained in the published fixed order (§4.5).
//!
//! [`ue_core::Unit::queues`] carries one membership bit per queue; this is
//! the other half design note 9 calls for — "an intrusive list plus a
//! boolean flag on the unit" — with the FIFO living here in the engine and
//! the flag living on the unit in the core. `enqueue`/`dequeue` keep both
//! in lockstep so [`ue_core::queue::QueueFlags`] never drifts from what's
//! actually linked.

use std::collections::VecDeque;
use ue_core::{Queue, UnitHandle, UnitTable};

/// Owns the nine FIFOs. Order of [`Queue::ORDER`] is the drain contract;
/// this struct only stores membership, it does not itself enforce
/// ordering — [`Dispatcher::drain_to_fixpoint`] does that.
#[derive(Debug, Default)]
pub struct Dispatcher {
    fifos: [VecDeque<UnitHandle>; 9],
}

fn index(queue: Queue) -> usize {
    queue.index()
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `unit` on `queue` if it isn't already linked there. Returns
    /// `true` if this call actually enqueued it.
    pub fn enqueue(&mut self, table: &mut UnitTable, unit: UnitHandle, queue: Queue) -> bool {
        let Some(u) = table.get_mut(unit) else { return false };
        if u.queues.is_queued_on(queue) {
            return false;
        }
        u.queues.mark_queued(queue);
        self.fifos[index(queue)].push_back(unit);
        true
    }

    /// Pop the next unit off `queue`, clearing its membership flag. A unit
    /// that was re-enqueued while being processed (its flag set again
    /// before this call) stays linked for the next drain pass.
    pub fn dequeue(&mut self, table: &mut UnitTable, queue: Queue) -> Option<UnitHandle> {
        let handle = self.fifos[index(queue)].pop_front()?;
        if let Some(u) = table.get_mut(handle) {
            u.queues.mark_dequeued(queue);
        }
        Some(handle)
    }

    /// Link `unit` onto `queue`'s FIFO without touching its membership
    /// flag. For callers (like [`crate::gc`]) that consume a core
    /// function which already flipped the flag as part of its own
    /// bookkeeping (`ue_core::gc::sweep` marks `Queue::Cleanup` itself);
    /// using plain [`Dispatcher::enqueue`] there would see the flag
    /// already set and silently skip linking the FIFO.
    pub fn link_existing(&mut self, unit: UnitHandle, queue: Queue) {
        self.fifos[index(queue)].push_back(unit);
    }

    pub fn len(&self, queue: Queue) -> usize {
        self.fifos[index(queue)].len()
    }

    pub fn is_empty_all(&self) -> bool {
        self.fifos.iter().all(VecDeque::is_empty)
    }

    /// Drain every queue in `Queue::ORDER`, repeatedly, until none has any
    /// work left. `drain_one` is called once per popped unit with the
    /// queue it came off of; it may enqueue further units (including back
    /// onto the same queue), which is why this loops to a fixpoint rather
    /// than a single pass.
    pub fn drain_to_fixpoint(&mut self, table: &mut UnitTable, mut drain_one: impl FnMut(&mut Self, &mut UnitTable, Queue, UnitHandle)) {
        loop {
            let mut did_work = false;
            for &queue in &Queue::ORDER {
                while let Some(unit) = self.dequeue(table, queue) {
                    did_work = true;
                    drain_one(self, table, queue, unit);
                }
            }
            if !did_work {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
