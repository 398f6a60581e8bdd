// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The nine named queues the scheduler drains in fixed order.
//!
//! Each unit carries one membership flag per queue; the flag and the unit's presence
//! in the queue's FIFO must always be mutated together.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The queues, in the order the scheduler drains them. **This order is the
/// published contract and must never be reordered.**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    Load,
    TargetDeps,
    Gc,
    Cleanup,
    CgroupRealize,
    CgroupEmpty,
    CgroupOom,
    StopWhenUnneeded,
    DBus,
}

impl Queue {
    /// All queues, in drain order.
    pub const ORDER: [Queue; 9] = [
        Queue::Load,
        Queue::TargetDeps,
        Queue::Gc,
        Queue::Cleanup,
        Queue::CgroupRealize,
        Queue::CgroupEmpty,
        Queue::CgroupOom,
        Queue::StopWhenUnneeded,
        Queue::DBus,
    ];

    const fn flag(self) -> QueueFlags {
        match self {
            Queue::Load => QueueFlags::LOAD,
            Queue::TargetDeps => QueueFlags::TARGET_DEPS,
            Queue::Gc => QueueFlags::GC,
            Queue::Cleanup => QueueFlags::CLEANUP,
            Queue::CgroupRealize => QueueFlags::CGROUP_REALIZE,
            Queue::CgroupEmpty => QueueFlags::CGROUP_EMPTY,
            Queue::CgroupOom => QueueFlags::CGROUP_OOM,
            Queue::StopWhenUnneeded => QueueFlags::STOP_WHEN_UNNEEDED,
            Queue::DBus => QueueFlags::DBUS,
        }
    }

    /// This queue's fixed position in [`Queue::ORDER`], for callers that key
    /// per-queue storage (e.g. the dispatcher's FIFO array) by index.
    pub const fn index(self) -> usize {
        match self {
            Queue::Load => 0,
            Queue::TargetDeps => 1,
            Queue::Gc => 2,
            Queue::Cleanup => 3,
            Queue::CgroupRealize => 4,
            Queue::CgroupEmpty => 5,
            Queue::CgroupOom => 6,
            Queue::StopWhenUnneeded => 7,
            Queue::DBus => 8,
        }
    }
}

bitflags! {
    /// Per-unit queue membership flags, one bit per [`Queue`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct QueueFlags: u16 {
        const LOAD               = 1 << 0;
        const TARGET_DEPS        = 1 << 1;
        const GC                 = 1 << 2;
        const CLEANUP             = 1 << 3;
        const CGROUP_REALIZE     = 1 << 4;
        const CGROUP_EMPTY       = 1 << 5;
        const CGROUP_OOM         = 1 << 6;
        const STOP_WHEN_UNNEEDED = 1 << 7;
        const DBUS               = 1 << 8;
    }
}

impl QueueFlags {
    pub fn is_queued_on(self, queue: Queue) -> bool {
        self.contains(queue.flag())
    }

    pub fn mark_queued(&mut self, queue: Queue) {
        self.insert(queue.flag());
    }

    pub fn mark_dequeued(&mut self, queue: Queue) {
        self.remove(queue.flag());
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
