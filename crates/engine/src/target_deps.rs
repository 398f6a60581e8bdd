// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The target-deps queue (§4.2, §4.5): `add_default_target_dependency`
//! enqueues a unit; draining installs `Wants`+`After` onto its requested
//! default target, unless the unit has opted out via
//! `default_dependencies = false` in the meantime.

use crate::dispatcher::Dispatcher;
use std::collections::HashMap;
use ue_core::{DependencyKind, Provenance, Queue, UnitHandle, UnitTable};

/// Tracks which target each queued unit wants its default dependency
/// installed against. `ue_core::Unit` has no field for this — it's
/// transient request state that only matters between `request` and the
/// next drain, so it lives here rather than bloating the core struct.
#[derive(Debug, Default)]
pub struct TargetDepsQueue {
    pending: HashMap<UnitHandle, UnitHandle>,
}

impl TargetDepsQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// `add_default_target_dependency(u, target)`.
    pub fn request(&mut self, table: &mut UnitTable, dispatcher: &mut Dispatcher, unit: UnitHandle, target: UnitHandle) {
        self.pending.insert(unit, target);
        dispatcher.enqueue(table, unit, Queue::TargetDeps);
    }

    /// Drain one entry: install the default `Wants`+`After` pair unless
    /// `default_dependencies` was flipped off before this ran.
    pub fn drain_one(&mut self, table: &mut UnitTable, unit: UnitHandle) {
        let Some(target) = self.pending.remove(&unit) else { return };
        let Some(u) = table.get(unit) else { return };
        if !u.flags.default_dependencies {
            return;
        }
        table.add_dependency(unit, DependencyKind::Wants, target, Provenance::DEFAULT, Provenance::DEFAULT);
        table.add_dependency(unit, DependencyKind::After, target, Provenance::DEFAULT, Provenance::DEFAULT);
    }
}

#[cfg(test)]
#[path = "target_deps_tests.rs"]
mod tests;
