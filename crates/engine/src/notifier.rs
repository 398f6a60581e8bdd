// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wraps [`ue_core::notify`] with the one decision the core cannot make on
//! its own: whether this transition into `failed` is about to be walked
//! back by an auto-restart (§4.4's `WILL_AUTO_RESTART` flag, §9 open
//! question (c)). The core only *carries* the flag; deciding it requires
//! consulting the per-type `will_restart` vtable callback, which lives in
//! the engine's registry, not in `notify` itself.

use crate::dispatcher::Dispatcher;
use crate::executor::Executor;
use crate::adapters::{BusAdapter, EmergencyActionAdapter, TriggerAdapter};
use crate::job::JobEngine;
use ue_core::{ActiveState, Clock, NotifyFlags, UnitHandle, UnitTable, VTableRegistry};

/// Apply a transition, deciding `WILL_AUTO_RESTART` first and then running
/// every effect `notify` hands back through `executor`.
///
/// `once_only` units (§9(c): resolved here, see `DESIGN.md`) are never
/// considered for auto-restart regardless of what `will_restart` reports —
/// a unit that can only ever activate once by definition cannot restart.
#[allow(clippy::too_many_arguments)]
pub fn transition<J, B, T, E>(
    table: &mut UnitTable,
    registry: &VTableRegistry,
    clock: &impl Clock,
    dispatcher: &mut Dispatcher,
    executor: &mut Executor<'_, J, B, T, E>,
    unit: UnitHandle,
    old: ActiveState,
    new: ActiveState,
    mut flags: NotifyFlags,
) where
    J: JobEngine + ?Sized,
    B: BusAdapter + ?Sized,
    T: TriggerAdapter + ?Sized,
    E: EmergencyActionAdapter + ?Sized,
{
    if new == ActiveState::Failed && will_auto_restart(table, registry, unit) {
        flags |= NotifyFlags::WILL_AUTO_RESTART;
    }
    let effects = ue_core::notify(table, clock, unit, old, new, flags);
    executor.run(dispatcher, effects);
}

fn will_auto_restart(table: &UnitTable, registry: &VTableRegistry, unit: UnitHandle) -> bool {
    let Some(u) = table.get(unit) else { return false };
    let vtable = registry.get(u.unit_type);
    if vtable.flags.once_only {
        return false;
    }
    (vtable.will_restart)(u)
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
