// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tagged unit-type variant and its VTable index.

use serde::{Deserialize, Serialize};

/// Every unit belongs to exactly one of these types. This is the tag that
/// selects a [`crate::vtable::UnitVTable`] row and, in the engine crate, the
/// per-type behavior grafted onto the generic state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Service,
    Socket,
    Target,
    Mount,
    Swap,
    Device,
    Timer,
    Path,
    Slice,
    Scope,
    Automount,
}

impl UnitType {
    pub const ALL: [UnitType; 11] = [
        UnitType::Service,
        UnitType::Socket,
        UnitType::Target,
        UnitType::Mount,
        UnitType::Swap,
        UnitType::Device,
        UnitType::Timer,
        UnitType::Path,
        UnitType::Slice,
        UnitType::Scope,
        UnitType::Automount,
    ];

    /// Index into a `[T; 11]` VTable table, stable for the lifetime of the
    /// enum (new variants must be appended, never inserted).
    pub const fn index(self) -> usize {
        match self {
            UnitType::Service => 0,
            UnitType::Socket => 1,
            UnitType::Target => 2,
            UnitType::Mount => 3,
            UnitType::Swap => 4,
            UnitType::Device => 5,
            UnitType::Timer => 6,
            UnitType::Path => 7,
            UnitType::Slice => 8,
            UnitType::Scope => 9,
            UnitType::Automount => 10,
        }
    }

    /// The conventional unit-file suffix for this type (without the dot).
    pub const fn suffix(self) -> &'static str {
        match self {
            UnitType::Service => "service",
            UnitType::Socket => "socket",
            UnitType::Target => "target",
            UnitType::Mount => "mount",
            UnitType::Swap => "swap",
            UnitType::Device => "device",
            UnitType::Timer => "timer",
            UnitType::Path => "path",
            UnitType::Slice => "slice",
            UnitType::Scope => "scope",
            UnitType::Automount => "automount",
        }
    }

    /// Infer a unit type from a unit name's suffix, e.g. `"nginx.service"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let suffix = name.rsplit_once('.').map(|(_, s)| s)?;
        Self::ALL.into_iter().find(|t| t.suffix() == suffix)
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[cfg(test)]
#[path = "unit_type_tests.rs"]
mod tests;
