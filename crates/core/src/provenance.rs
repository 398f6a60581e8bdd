// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge provenance: which configuration source asserted a dependency edge.
//!
//! Each directed edge carries two 16-bit provenance masks (one per side),
//! packed into one machine word so the adjacency map stays dense.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Reasons a dependency edge exists. 16 bits, one per origin/destination
    /// side of an [`EdgeMask`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Provenance: u16 {
        /// Declared directly in a unit's fragment file.
        const FILE               = 0b0000_0001;
        /// Added implicitly by the engine (e.g. a symmetric inverse edge).
        const IMPLICIT           = 0b0000_0010;
        /// Added by `add_default_target_dependency` / `default_dependencies`.
        const DEFAULT            = 0b0000_0100;
        /// Added by device/udev discovery.
        const UDEV               = 0b0000_1000;
        /// Added by a `.path` unit's watch target.
        const PATH               = 0b0001_0000;
        /// Added implicitly from `/proc/self/mountinfo`.
        const MOUNTINFO_IMPLICIT = 0b0010_0000;
        /// Added as the default for a discovered mount.
        const MOUNTINFO_DEFAULT  = 0b0100_0000;
        /// Added from `/proc/swaps` discovery.
        const PROC_SWAP          = 0b1000_0000;
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Provenance::empty()
    }
}

/// The provenance of a directed edge, packed from both sides into one
/// machine word: the origin side's mask in the low 16 bits, the destination
/// side's mask in the high 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeMask(u32);

impl EdgeMask {
    pub fn new(origin: Provenance, destination: Provenance) -> Self {
        Self((origin.bits() as u32) | ((destination.bits() as u32) << 16))
    }

    pub fn origin(self) -> Provenance {
        Provenance::from_bits_truncate((self.0 & 0xFFFF) as u16)
    }

    pub fn destination(self) -> Provenance {
        Provenance::from_bits_truncate((self.0 >> 16) as u16)
    }

    pub fn with_origin(self, origin: Provenance) -> Self {
        Self::new(origin, self.destination())
    }

    pub fn with_destination(self, destination: Provenance) -> Self {
        Self::new(self.origin(), destination)
    }

    /// OR-merge another edge's masks into this one (used when adding an
    /// already-existing edge, and when unioning edges during a merge).
    pub fn merge(self, other: EdgeMask) -> Self {
        Self::new(self.origin() | other.origin(), self.destination() | other.destination())
    }

    /// Clear `bits` from the destination-side mask. Returns `true` if the
    /// destination mask is now empty, in which case the caller should drop
    /// the edge entirely.
    pub fn clear_destination(&mut self, bits: Provenance) -> bool {
        let remaining = self.destination() & !bits;
        *self = Self::new(self.origin(), remaining);
        remaining.is_empty()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
#[path = "provenance_tests.rs"]
mod tests;
