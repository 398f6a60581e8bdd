// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit merging: folding an alias unit into its survivor.
//!
//! A merge happens when two distinct load attempts resolve to the same
//! underlying unit (e.g. a unit referenced by name before its fragment was
//! loaded, then loaded for real). The loser keeps existing as a stub whose
//! `load_state` is `Merged` and whose `merged_into` points at the survivor;
//! every name, dependency edge, and back-reference it held is rewritten
//! onto the survivor first.

use crate::dep_kind::DependencyKind;
use crate::table::UnitTable;
use crate::unit::{LoadState, UnitHandle};
use crate::UnitError;

impl UnitTable {
    /// Merge `loser` into `survivor`: a no-op if they're already the same
    /// unit. Fails if either handle is unknown, or if `loser` is flagged
    /// `perpetual` (merging a perpetual unit away would strand references
    /// to something that can never be collected back out).
    pub fn merge(&mut self, survivor: UnitHandle, loser: UnitHandle) -> Result<(), UnitError> {
        if survivor == loser {
            return Ok(());
        }
        {
            let loser_unit = self.units.get(&loser).ok_or(UnitError::UnknownHandle(loser))?;
            if loser_unit.flags.perpetual {
                return Err(UnitError::BadSetting(loser_unit.id.clone(), "perpetual units cannot be merged away".into()));
            }
        }
        if !self.units.contains_key(&survivor) {
            return Err(UnitError::UnknownHandle(survivor));
        }

        self.rewrite_names(survivor, loser);
        self.rewrite_dependencies(survivor, loser);
        self.rewrite_references(survivor, loser);

        if let Some(loser_unit) = self.units.get_mut(&loser) {
            loser_unit.load_state = LoadState::Merged;
            loser_unit.merged_into = Some(survivor);
        }
        Ok(())
    }

    /// Decide which of two candidates should survive a merge: the higher
    /// [`LoadState::merge_priority`] wins; ties break on the lexicographic
    /// order of the unit id so the outcome is deterministic regardless of
    /// discovery order.
    pub fn merge_priority_winner(&self, a: UnitHandle, b: UnitHandle) -> Option<(UnitHandle, UnitHandle)> {
        let ua = self.units.get(&a)?;
        let ub = self.units.get(&b)?;
        match ua.load_state.merge_priority().cmp(&ub.load_state.merge_priority()) {
            std::cmp::Ordering::Greater => Some((a, b)),
            std::cmp::Ordering::Less => Some((b, a)),
            std::cmp::Ordering::Equal if ua.id <= ub.id => Some((a, b)),
            std::cmp::Ordering::Equal => Some((b, a)),
        }
    }

    fn rewrite_names(&mut self, survivor: UnitHandle, loser: UnitHandle) {
        let names = self.units.get(&loser).map(|u| u.names.clone()).unwrap_or_default();
        self.names.repoint_all(loser, survivor);
        if let Some(survivor_unit) = self.units.get_mut(&survivor) {
            for name in names {
                if !survivor_unit.names.contains(&name) {
                    survivor_unit.names.push(name);
                }
            }
        }
        if let Some(loser_unit) = self.units.get_mut(&loser) {
            loser_unit.names.clear();
        }
    }

    fn rewrite_dependencies(&mut self, survivor: UnitHandle, loser: UnitHandle) {
        let edges: Vec<(DependencyKind, UnitHandle, crate::provenance::EdgeMask)> = self
            .units
            .get(&loser)
            .map(|u| {
                u.dependencies
                    .iter()
                    .flat_map(|(kind, by_peer)| by_peer.iter().map(move |(peer, mask)| (*kind, *peer, *mask)))
                    .collect()
            })
            .unwrap_or_default();

        for (kind, peer, mask) in edges {
            if peer == survivor {
                // loser depended on its own survivor; dropping avoids a
                // self-loop edge post-merge.
                continue;
            }
            let swapped = crate::provenance::EdgeMask::new(mask.destination(), mask.origin());
            self.merge_edge(survivor, kind, peer, mask);
            self.merge_edge(peer, kind.inverse(), survivor, swapped);
            // The peer's old edge pointed at the loser under the same
            // key; now superseded by the one just added above.
            if let Some(peer_unit) = self.units.get_mut(&peer) {
                if let Some(by_peer) = peer_unit.dependencies.get_mut(&kind.inverse()) {
                    by_peer.remove(&loser);
                }
            }
        }
        if let Some(loser_unit) = self.units.get_mut(&loser) {
            loser_unit.dependencies.clear();
        }
    }

    fn rewrite_references(&mut self, survivor: UnitHandle, loser: UnitHandle) {
        let ref_ids = self.units.get(&loser).map(|u| u.refs_by_target.clone()).unwrap_or_default();
        for id in &ref_ids {
            self.refs.retarget(*id, survivor);
        }
        if let Some(survivor_unit) = self.units.get_mut(&survivor) {
            survivor_unit.refs_by_target.extend(ref_ids);
        }
        if let Some(loser_unit) = self.units.get_mut(&loser) {
            loser_unit.refs_by_target.clear();
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
