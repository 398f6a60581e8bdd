// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires [`ue_core::gc`]'s mark/sweep pass into the queue scheduler: the GC
//! queue drain runs one sweep, the cleanup queue drain actually tears
//! units down.

use crate::dispatcher::Dispatcher;
use ue_core::{Queue, UnitHandle, UnitTable, VTableRegistry};

/// Run one mark/sweep pass (§4.6), moving every unit it collects onto the
/// cleanup queue. `generation` must be bumped by the caller before each
/// sweep so `gc_marker` distinguishes this sweep's casualties from a
/// previous one.
pub fn run_sweep(table: &mut UnitTable, dispatcher: &mut Dispatcher, registry: &VTableRegistry, generation: u32) -> Vec<UnitHandle> {
    let swept = ue_core::gc::sweep(table, registry, generation);
    for &handle in &swept {
        // `sweep` already flips the unit's Cleanup membership flag; link
        // the FIFO directly rather than going through `enqueue`, which
        // would see the flag set and skip it.
        dispatcher.link_existing(handle, Queue::Cleanup);
    }
    swept
}

/// Tear a single swept unit down: unwind its edges and name, and drop it
/// from the table entirely.
pub fn run_cleanup(table: &mut UnitTable, handle: UnitHandle) {
    ue_core::gc::collect(table, handle);
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
