// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The load queue (§4.5 item 1): resolve a unit's fragment + drop-ins via
//! the (external) [`crate::adapters::FragmentLoader`] and install the
//! result onto the unit. Unit-file parsing itself is out of scope (§1) —
//! this module only drives the `load_state` transition and installs the
//! dependencies the parsed fragment declares.

use crate::adapters::{FragmentLoader, LoadOutcome};
use ue_core::{LoadState, UnitHandle, UnitTable, UnitType};

/// Drain one unit off the load queue: ask the loader for its fragment and
/// update `load_state` accordingly. Edges the fragment declares are
/// installed with `Provenance::FILE`; a retryable I/O failure is recorded
/// in `load_error` rather than propagated (§7).
pub fn drain_one(table: &mut UnitTable, loader: &mut dyn FragmentLoader, unit: UnitHandle) {
    let Some(name) = table.get(unit).map(|u| u.id.clone()) else { return };
    match loader.load(&name) {
        LoadOutcome::NotFound => {
            table.set_load_state(unit, LoadState::NotFound);
        }
        LoadOutcome::Masked => {
            table.set_load_state(unit, LoadState::Masked);
        }
        LoadOutcome::Error(message) => {
            if let Some(u) = table.get_mut(unit) {
                u.load_error = Some(message);
            }
            table.set_load_state(unit, LoadState::Error);
        }
        LoadOutcome::Loaded(fragment) => {
            if let Some(u) = table.get_mut(unit) {
                u.description = fragment.description;
                u.documentation = fragment.documentation;
                u.flags.default_dependencies = fragment.default_dependencies;
                u.load_error = None;
            }
            for (kind, peer_name, origin, destination) in fragment.dependencies {
                let peer = resolve_or_stub(table, &peer_name);
                table.add_dependency(unit, kind, peer, origin, destination);
            }
            table.set_load_state(unit, LoadState::Loaded);
        }
    }
}

/// Resolve a dependency target by name, creating a `Stub` unit for it if
/// it hasn't been discovered yet — mirrors the source loader's behavior of
/// forward-referencing units before their own fragment has been read.
fn resolve_or_stub(table: &mut UnitTable, name: &ue_core::UnitName) -> UnitHandle {
    if let Some(h) = table.lookup_resolved(name) {
        return h;
    }
    let unit_type = UnitType::from_name(name.as_str()).unwrap_or(UnitType::Service);
    match table.new_for_name(name.clone(), unit_type) {
        Ok(handle) => handle,
        Err(_) => match table.lookup_resolved(name) {
            Some(handle) => handle,
            None => unreachable!("new_for_name only fails on a name conflict, which implies a resolvable unit"),
        },
    }
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
