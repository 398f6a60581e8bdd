// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `UnitTable`: the shared storage backing identity (§4.1), the dependency
//! graph (§4.2), and GC (§4.6). Queue scheduling, the notifier's job-layer
//! calls, and the manager façade itself live one layer up in the `engine`
//! crate; this is the data backbone they share.

use crate::name::{NameIndex, UnitName};
use crate::unit::{LoadState, Unit, UnitHandle};
use crate::unit_ref::UnitRefArena;
use crate::unit_type::UnitType;
use crate::UnitError;
use std::collections::HashMap;

/// Owns every live unit, the name→handle index, and the `UnitRef` arena.
#[derive(Debug, Default)]
pub struct UnitTable {
    pub(crate) units: HashMap<UnitHandle, Unit>,
    pub(crate) names: NameIndex,
    pub(crate) refs: UnitRefArena,
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh stub unit for `name`. Fails with `NameConflict` if `name` is already
    /// owned.
    pub fn new_for_name(&mut self, name: UnitName, unit_type: UnitType) -> Result<UnitHandle, UnitError> {
        if self.names.contains(&name) {
            return Err(UnitError::NameConflict(name));
        }
        let handle = UnitHandle::new();
        self.names.add(name.clone(), handle)?;
        self.units.insert(handle, Unit::new(name, unit_type));
        Ok(handle)
    }

    pub fn get(&self, handle: UnitHandle) -> Option<&Unit> {
        self.units.get(&handle)
    }

    pub fn get_mut(&mut self, handle: UnitHandle) -> Option<&mut Unit> {
        self.units.get_mut(&handle)
    }

    pub fn contains(&self, handle: UnitHandle) -> bool {
        self.units.contains_key(&handle)
    }

    pub fn lookup(&self, name: &UnitName) -> Option<UnitHandle> {
        self.names.get(name)
    }

    /// Look up a unit by name, following any merge chain to the survivor.
    pub fn lookup_resolved(&self, name: &UnitName) -> Option<UnitHandle> {
        self.lookup(name).map(|h| self.follow_merge(h))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitHandle, &Unit)> {
        self.units.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = UnitHandle> + '_ {
        self.units.keys().copied()
    }

    /// Chase `merged_into` to the terminal survivor. Cycle-free by
    /// construction: merged units are never merge targets.
    pub fn follow_merge(&self, mut handle: UnitHandle) -> UnitHandle {
        let mut hops = 0;
        while let Some(unit) = self.units.get(&handle) {
            match unit.merged_into {
                Some(next) if hops < self.units.len() => {
                    handle = next;
                    hops += 1;
                }
                _ => break,
            }
        }
        handle
    }

    /// `add_name(u, n)`: fails with `NameConflict` if another
    /// unit holds `n`, succeeds (no-op) if `u` already holds it.
    pub fn add_name(&mut self, handle: UnitHandle, name: UnitName) -> Result<(), UnitError> {
        if !self.units.contains_key(&handle) {
            return Err(UnitError::NotFound(name));
        }
        self.names.add(name.clone(), handle)?;
        if let Some(unit) = self.units.get_mut(&handle) {
            if !unit.names.contains(&name) {
                unit.names.push(name);
            }
        }
        Ok(())
    }

    /// `choose_id(u, n)`: `n` must already be in `u.names`.
    pub fn choose_id(&mut self, handle: UnitHandle, name: UnitName) -> Result<(), UnitError> {
        let unit = self.units.get_mut(&handle).ok_or_else(|| UnitError::NotFound(name.clone()))?;
        if !unit.names.contains(&name) {
            return Err(UnitError::BadSetting(
                name,
                "choose_id: name not in unit's names".to_string(),
            ));
        }
        unit.id = name;
        Ok(())
    }

    pub fn set_load_state(&mut self, handle: UnitHandle, state: LoadState) {
        if let Some(unit) = self.units.get_mut(&handle) {
            unit.load_state = state;
        }
    }

    /// Insert a fully-formed unit at a caller-chosen handle, claiming every
    /// name it carries. Unlike `new_for_name`, the handle is not minted
    /// fresh: this is the one seam the `reload` crate needs to rebuild a
    /// table from a serialized stream where handles must survive the
    /// reexec boundary (an embedder may be holding one across the call).
    /// Fails with `NameConflict` if any of the unit's names is already
    /// owned by a different handle.
    pub fn restore_unit(&mut self, handle: UnitHandle, unit: Unit) -> Result<(), UnitError> {
        for name in &unit.names {
            self.names.add(name.clone(), handle)?;
        }
        self.units.insert(handle, unit);
        Ok(())
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
