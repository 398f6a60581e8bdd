// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mark-and-sweep garbage collection for units nobody needs anymore.
//!
//! A unit is a GC *root* if it fails any of the universal "don't touch me"
//! checks (has a job or a nop job, is active or activating, is referenced by
//! a `UnitRef`, is flagged `perpetual`) or if its type's own [`UnitVTable::may_gc`]
//! callback refuses. Starting from the roots, reachability is traced
//! forward along the "strong" dependency kinds
//! ([`DependencyKind::is_strong`]) — anything a root needs transitively is
//! kept alive too, even if that unit's own state would otherwise make it
//! collectible. Everything left unmarked and individually eligible is
//! swept: moved onto the cleanup queue for the engine to actually tear
//! down and remove from the table.

use crate::dep_kind::DependencyKind;
use crate::queue::Queue;
use crate::table::UnitTable;
use crate::unit::{CollectMode, Unit, UnitHandle};
use crate::vtable::VTableRegistry;
use std::collections::{HashSet, VecDeque};

fn collectible_state(mode: CollectMode, state: crate::state::ActiveState) -> bool {
    use crate::state::ActiveState::*;
    match mode {
        CollectMode::Inactive => matches!(state, Inactive),
        CollectMode::InactiveOrFailed => matches!(state, Inactive | Failed),
    }
}

/// Whether, taken alone, this unit's own state would let the GC collect it.
/// Ignores whether anything still depends on it — that is the reachability
/// pass's job.
pub fn is_individually_collectible(unit: &Unit, registry: &VTableRegistry) -> bool {
    if unit.has_job || unit.has_nop_job || unit.is_referenced() || unit.flags.perpetual {
        return false;
    }
    let vtable = registry.get(unit.unit_type);
    let active_state = (vtable.active_state)(unit);
    collectible_state(unit.collect_mode, active_state) && (vtable.may_gc)(unit)
}

/// Run one full mark-and-sweep pass. `generation` is a monotonically
/// increasing counter the caller bumps before each sweep; swept units have
/// their `gc_marker` set to it. Returns the handles that were swept (moved
/// onto [`Queue::Cleanup`]); the caller still owns actually tearing them
/// down and removing them from the table.
pub fn sweep(table: &mut UnitTable, registry: &VTableRegistry, generation: u32) -> Vec<UnitHandle> {
    let handles: Vec<UnitHandle> = table.handles().collect();

    let mut roots = Vec::new();
    for &handle in &handles {
        if let Some(unit) = table.get(handle) {
            if !is_individually_collectible(unit, registry) {
                roots.push(handle);
            }
        }
    }

    let mut reachable: HashSet<UnitHandle> = HashSet::new();
    let mut queue: VecDeque<UnitHandle> = roots.into_iter().collect();
    while let Some(handle) = queue.pop_front() {
        if !reachable.insert(handle) {
            continue;
        }
        let Some(unit) = table.get(handle) else { continue };
        for kind in DependencyKind::STRONG {
            for (&peer, _mask) in unit.dependents(kind) {
                if !reachable.contains(&peer) {
                    queue.push_back(peer);
                }
            }
        }
    }

    let mut swept = Vec::new();
    for handle in handles {
        if reachable.contains(&handle) {
            continue;
        }
        let collectible = table.get(handle).is_some_and(|u| is_individually_collectible(u, registry));
        if !collectible {
            continue;
        }
        if let Some(unit) = table.get_mut(handle) {
            unit.gc_marker = generation;
            if !unit.queues.is_queued_on(Queue::Cleanup) {
                unit.queues.mark_queued(Queue::Cleanup);
            }
        }
        swept.push(handle);
    }
    swept
}

/// Remove a swept unit from the table entirely: its dependency edges and
/// name are unwound first so no dangling references remain.
pub fn collect(table: &mut UnitTable, handle: UnitHandle) {
    table.remove_all_dependencies(handle);
    if let Some(unit) = table.get(handle) {
        let names = unit.names.clone();
        for name in names {
            table_remove_name(table, &name);
        }
    }
    table.units.remove(&handle);
}

fn table_remove_name(table: &mut UnitTable, name: &crate::name::UnitName) {
    table.names.remove(name);
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
