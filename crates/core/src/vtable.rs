// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! VTable registry: the only dynamic-dispatch surface in the core. Concrete
//! per-type execution (spawning processes, realizing cgroups, …) is an
//! external collaborator's job; the callbacks kept here are exactly the
//! ones the engine itself must consult to drive the generic state machine,
//! GC, and queue scheduler.
//!
//! A tagged enum (`UnitType`) selects a row of a static table built of
//! plain function pointers — there is no heap-allocated trait object and
//! no inheritance.

use crate::state::ActiveState;
use crate::unit::Unit;
use crate::unit_type::UnitType;
use std::time::Duration;

/// Per-type capability flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitVTableFlags {
    pub can_transient: bool,
    pub can_delegate: bool,
    /// Unit can only ever be activated once per manager lifetime.
    pub once_only: bool,
    /// Jobs for this unit type participate in GC (`gc_jobs`).
    pub gc_jobs: bool,
}

/// Static per-`UnitType` row. All fields are plain function
/// pointers or data — no captures, no allocation.
#[derive(Clone, Copy)]
pub struct UnitVTable {
    pub unit_type: UnitType,
    pub flags: UnitVTableFlags,

    /// Config section name consumed by the (external) loader, e.g.
    /// `"Service"`.
    pub config_section: &'static str,

    /// Map a unit's `sub_state` onto the high-level `ActiveState`. The
    /// default falls back to a simple "dead"/"active"/"failed" mapping
    /// good enough for units with no richer substate machine of their own.
    pub active_state: fn(&Unit) -> ActiveState,

    /// Render `sub_state` for display (default: the substate string as-is).
    pub sub_state_to_string: fn(&Unit) -> String,

    /// Whether the per-type code agrees the unit can be garbage collected
    /// right now; the universal conditions (no job, not
    /// active, unreferenced, not perpetual) are checked by the engine
    /// before this is consulted.
    pub may_gc: fn(&Unit) -> bool,

    /// Whether this unit, in its current state, will auto-restart rather
    /// than staying failed: `once_only` units
    /// are exempt).
    pub will_restart: fn(&Unit) -> bool,

    /// Per-type timeout override for the currently installed job, if any.
    pub get_timeout: fn(&Unit) -> Option<Duration>,

    /// Whether the unit currently needs exclusive console access.
    pub needs_console: fn(&Unit) -> bool,

    /// Whether this unit type is supported/enabled in this build/manager
    /// (e.g. a platform without cgroup v2 might report `Scope` as
    /// unsupported).
    pub supported: fn() -> bool,

    /// Whether `Manager::clean` has anything to clean for this unit right
    /// now (cache/state/logs/runtime directories — concrete cleanup itself
    /// is per-type execution, out of scope).
    pub can_clean: fn(&Unit) -> bool,
}

fn default_active_state(unit: &Unit) -> ActiveState {
    match unit.sub_state.as_str() {
        "dead" => ActiveState::Inactive,
        "failed" => ActiveState::Failed,
        "active" | "running" | "mounted" | "plugged" | "listening" | "waiting" => {
            ActiveState::Active
        }
        "activating" | "start-pre" | "start" => ActiveState::Activating,
        "deactivating" | "stop" | "stop-sigterm" => ActiveState::Deactivating,
        "reloading" => ActiveState::Reloading,
        _ => ActiveState::Inactive,
    }
}

fn default_sub_state_to_string(unit: &Unit) -> String {
    unit.sub_state.clone()
}

fn default_may_gc(_unit: &Unit) -> bool {
    true
}

fn default_will_restart(_unit: &Unit) -> bool {
    false
}

fn default_get_timeout(_unit: &Unit) -> Option<Duration> {
    None
}

fn default_needs_console(_unit: &Unit) -> bool {
    false
}

fn default_supported() -> bool {
    true
}

fn default_can_clean(_unit: &Unit) -> bool {
    false
}

impl UnitVTable {
    /// A vtable row with every callback defaulted, for types that need no
    /// specialization beyond their flags and config section.
    pub const fn default_for(unit_type: UnitType, config_section: &'static str) -> Self {
        Self {
            unit_type,
            flags: UnitVTableFlags {
                can_transient: false,
                can_delegate: false,
                once_only: false,
                gc_jobs: false,
            },
            config_section,
            active_state: default_active_state,
            sub_state_to_string: default_sub_state_to_string,
            may_gc: default_may_gc,
            will_restart: default_will_restart,
            get_timeout: default_get_timeout,
            needs_console: default_needs_console,
            supported: default_supported,
            can_clean: default_can_clean,
        }
    }
}

/// The full, static registry: one row per `UnitType`, indexed by
/// `UnitType::index()`.
pub struct VTableRegistry {
    rows: [UnitVTable; UnitType::ALL.len()],
}

impl VTableRegistry {
    pub fn new(rows: [UnitVTable; UnitType::ALL.len()]) -> Self {
        Self { rows }
    }

    /// The default registry: every type wired to `UnitVTable::default_for`
    /// with its canonical config section name and a few type-specific
    /// flags (`once_only` for the `Device`/`Scope` discovery units that
    /// can only ever activate once, `can_transient` for the types that
    /// commonly support it).
    pub fn standard() -> Self {
        let mut rows = [UnitVTable::default_for(UnitType::Service, "Service"); UnitType::ALL.len()];
        rows[UnitType::Service.index()] = UnitVTable::default_for(UnitType::Service, "Service");
        rows[UnitType::Socket.index()] = UnitVTable::default_for(UnitType::Socket, "Socket");
        rows[UnitType::Target.index()] = UnitVTable::default_for(UnitType::Target, "Target");
        rows[UnitType::Mount.index()] = UnitVTable::default_for(UnitType::Mount, "Mount");
        rows[UnitType::Swap.index()] = UnitVTable::default_for(UnitType::Swap, "Swap");
        rows[UnitType::Device.index()] = {
            let mut v = UnitVTable::default_for(UnitType::Device, "Device");
            v.flags.once_only = true;
            v
        };
        rows[UnitType::Timer.index()] = UnitVTable::default_for(UnitType::Timer, "Timer");
        rows[UnitType::Path.index()] = UnitVTable::default_for(UnitType::Path, "Path");
        rows[UnitType::Slice.index()] = {
            let mut v = UnitVTable::default_for(UnitType::Slice, "Slice");
            v.flags.can_delegate = true;
            v
        };
        rows[UnitType::Scope.index()] = {
            let mut v = UnitVTable::default_for(UnitType::Scope, "Scope");
            v.flags.can_transient = true;
            v.flags.can_delegate = true;
            v.flags.once_only = true;
            v
        };
        rows[UnitType::Automount.index()] = UnitVTable::default_for(UnitType::Automount, "Automount");
        Self::new(rows)
    }

    pub fn get(&self, unit_type: UnitType) -> &UnitVTable {
        &self.rows[unit_type.index()]
    }
}

impl Default for VTableRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "vtable_tests.rs"]
mod tests;
