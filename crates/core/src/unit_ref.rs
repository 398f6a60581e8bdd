// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `UnitRef`: a named weak back-edge, and its arena.
//!
//! Modeled as an arena id with intrusive membership in the target's
//! `refs_by_target` list, so a merge can rewrite every ref
//! pointing at the losing side in O(|refs|) without chasing raw pointers.

use crate::unit::UnitHandle;
use std::collections::HashMap;

/// Arena key for a [`UnitRef`]. Not serialized — refs are a runtime-only
/// bookkeeping structure rebuilt by `coldplug` after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitRefId(u64);

/// A named weak back-edge: `source` holds a reference to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRef {
    pub source: UnitHandle,
    pub target: UnitHandle,
}

/// Arena owning every live `UnitRef`. Lives alongside `UnitTable` in the
/// manager; `Unit::refs_by_target` stores only the ids.
#[derive(Debug, Default)]
pub struct UnitRefArena {
    refs: HashMap<UnitRefId, UnitRef>,
    next: u64,
}

impl UnitRefArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: UnitHandle, target: UnitHandle) -> UnitRefId {
        let id = UnitRefId(self.next);
        self.next += 1;
        self.refs.insert(id, UnitRef { source, target });
        id
    }

    pub fn get(&self, id: UnitRefId) -> Option<&UnitRef> {
        self.refs.get(&id)
    }

    pub fn remove(&mut self, id: UnitRefId) -> Option<UnitRef> {
        self.refs.remove(&id)
    }

    /// Repoint a ref's target (used by merge rewriting).
    pub fn retarget(&mut self, id: UnitRefId, new_target: UnitHandle) {
        if let Some(r) = self.refs.get_mut(&id) {
            r.target = new_target;
        }
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

#[cfg(test)]
#[path = "unit_ref_tests.rs"]
mod tests;
