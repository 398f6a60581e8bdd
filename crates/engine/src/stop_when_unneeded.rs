// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The stop-when-unneeded queue (§4.5 item 8): a unit leaving `active`
//! lands here (via [`ue_core::notify`]); draining checks whether anything
//! still needs it and, if not, submits a stop job — throttled by the
//! unit's own `auto_stop_ratelimit` so a flapping dependency can't spam
//! the job engine.

use crate::job::{JobEngine, JobMode, JobType};
use ue_core::{Clock, DependencyKind, UnitHandle, UnitTable, VTableRegistry};

/// The dependency kinds that mean "something needs `unit`" for the
/// purpose of `stop_when_unneeded`: inbound `Requires`/`Wants`/`BindsTo`
/// from a peer that is itself active or on its way there.
const NEEDED_BY: [DependencyKind; 3] = [DependencyKind::RequiredBy, DependencyKind::WantedBy, DependencyKind::BoundBy];

/// Whether any peer that actually needs `unit` is currently active or
/// activating. A unit with no such peer at all is, trivially, unneeded.
pub fn is_unneeded(table: &UnitTable, registry: &VTableRegistry, unit: UnitHandle) -> bool {
    let Some(u) = table.get(unit) else { return false };
    for kind in NEEDED_BY {
        for (&peer, _mask) in u.dependents(kind) {
            let Some(peer_unit) = table.get(peer) else { continue };
            let vtable = registry.get(peer_unit.unit_type);
            if (vtable.active_state)(peer_unit).is_active_or_activating() {
                return false;
            }
        }
    }
    true
}

/// Drain one unit off the stop-when-unneeded queue: submit a stop job if
/// `stop_when_unneeded` is set, nothing needs it, and the auto-stop rate
/// limiter has a token. Returns the installed job handle, if any.
pub fn drain_one(
    table: &mut UnitTable,
    registry: &VTableRegistry,
    clock: &impl Clock,
    jobs: &mut dyn JobEngine,
    unit: UnitHandle,
) -> Option<crate::job::JobHandle> {
    {
        let u = table.get(unit)?;
        if !u.flags.stop_when_unneeded || u.has_job {
            return None;
        }
    }
    if !is_unneeded(table, registry, unit) {
        return None;
    }
    let tripped = {
        let u = table.get_mut(unit)?;
        !u.auto_stop_ratelimit.try_consume(clock)
    };
    if tripped {
        return None;
    }
    let job = jobs.install(unit, JobType::Stop, JobMode::Replace).ok()?;
    if let Some(u) = table.get_mut(unit) {
        u.has_job = true;
    }
    Some(job)
}

#[cfg(test)]
#[path = "stop_when_unneeded_tests.rs"]
mod tests;
