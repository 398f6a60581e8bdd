// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency graph operations over [`UnitTable`].
//!
//! Edges are stored symmetrically: adding `A --Requires--> B` also adds the
//! inverse `B --RequiredBy--> A`, both carrying the same provenance split
//! between origin and destination. Every public mutator here keeps that
//! invariant; nothing else is allowed to touch `Unit::dependencies`
//! directly.

use crate::dep_kind::DependencyKind;
use crate::provenance::{EdgeMask, Provenance};
use crate::table::UnitTable;
use crate::unit::UnitHandle;
use crate::unit_ref::UnitRefId;

impl UnitTable {
    /// Add (or OR-merge into) the edge `from --kind--> to`, and its
    /// symmetric inverse. Idempotent: calling this twice with the same
    /// provenance leaves the mask unchanged.
    pub fn add_dependency(
        &mut self,
        from: UnitHandle,
        kind: DependencyKind,
        to: UnitHandle,
        origin: Provenance,
        destination: Provenance,
    ) {
        let mask = EdgeMask::new(origin, destination);
        self.merge_edge(from, kind, to, mask);
        self.merge_edge(to, kind.inverse(), from, EdgeMask::new(destination, origin));
    }

    pub(crate) fn merge_edge(&mut self, from: UnitHandle, kind: DependencyKind, to: UnitHandle, mask: EdgeMask) {
        let Some(unit) = self.units.get_mut(&from) else { return };
        let by_peer = unit.dependencies.entry(kind).or_default();
        by_peer
            .entry(to)
            .and_modify(|existing| *existing = existing.merge(mask))
            .or_insert(mask);
    }

    /// Remove `bits` from the destination-side provenance of every edge
    /// `from --kind--> to` (and its inverse's origin side). An edge whose
    /// destination-side mask becomes empty is dropped entirely, regardless
    /// of what remains on its origin side.
    pub fn remove_dependency(
        &mut self,
        from: UnitHandle,
        kind: DependencyKind,
        to: UnitHandle,
        bits: Provenance,
    ) {
        self.clear_edge_destination(from, kind, to, bits);
        self.clear_edge_destination(to, kind.inverse(), from, bits);
    }

    fn clear_edge_destination(
        &mut self,
        from: UnitHandle,
        kind: DependencyKind,
        to: UnitHandle,
        bits: Provenance,
    ) {
        let Some(unit) = self.units.get_mut(&from) else { return };
        let Some(by_peer) = unit.dependencies.get_mut(&kind) else { return };
        let Some(mask) = by_peer.get_mut(&to) else { return };
        if mask.clear_destination(bits) {
            by_peer.remove(&to);
            if by_peer.is_empty() {
                unit.dependencies.remove(&kind);
            }
        }
    }

    /// Remove `bits` from the destination-side provenance of every edge
    /// touching `handle`, in either direction, across every kind. Lets a
    /// reloading config source flush only the edges it owns without
    /// enumerating peers itself. Each edge is dropped as soon as its own
    /// destination-side mask empties, along with its symmetric partner.
    pub fn remove_dependencies(&mut self, handle: UnitHandle, bits: Provenance) {
        let Some(unit) = self.units.get(&handle) else { return };
        let edges: Vec<(DependencyKind, UnitHandle)> = unit
            .dependencies
            .iter()
            .flat_map(|(kind, by_peer)| by_peer.keys().map(move |peer| (*kind, *peer)))
            .collect();
        for (kind, peer) in edges {
            self.remove_dependency(handle, kind, peer, bits);
        }
    }

    /// Remove every dependency edge (in both directions) touching `handle`,
    /// used when a unit is swept by GC.
    pub fn remove_all_dependencies(&mut self, handle: UnitHandle) {
        let Some(unit) = self.units.get(&handle) else { return };
        let peers: Vec<(DependencyKind, UnitHandle)> = unit
            .dependencies
            .iter()
            .flat_map(|(kind, by_peer)| by_peer.keys().map(move |peer| (*kind, *peer)))
            .collect();
        for (kind, peer) in peers {
            if let Some(peer_unit) = self.units.get_mut(&peer) {
                peer_unit.dependencies.remove(&kind.inverse());
            }
        }
        if let Some(unit) = self.units.get_mut(&handle) {
            unit.dependencies.clear();
        }
    }

    /// Register a `UnitRef`: `source` now holds a reference to `target`.
    pub fn add_reference(&mut self, source: UnitHandle, target: UnitHandle) -> UnitRefId {
        let id = self.refs.insert(source, target);
        if let Some(unit) = self.units.get_mut(&target) {
            unit.refs_by_target.push(id);
        }
        id
    }

    pub fn remove_reference(&mut self, id: UnitRefId) {
        if let Some(r) = self.refs.remove(id) {
            if let Some(unit) = self.units.get_mut(&r.target) {
                unit.refs_by_target.retain(|&existing| existing != id);
            }
        }
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
