// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! High-level active state and notifier flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The high-level state every unit type's substate maps onto. `active_state`
/// is a pure function of a unit's substate; see
/// [`crate::vtable::UnitVTable::active_state`] for the per-type mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveState {
    Inactive,
    Activating,
    Active,
    Reloading,
    Deactivating,
    Failed,
    /// Derived, not a raw per-type substate: active but a condition/assert
    /// check has since failed, used for `systemctl`-style reporting. Only
    /// derived when a unit is otherwise inactive and its last
    /// condition/assert check failed, so it never shadows a genuine
    /// failure.
    Maintenance,
}

impl ActiveState {
    pub fn is_active_or_activating(self) -> bool {
        matches!(self, ActiveState::Active | ActiveState::Activating | ActiveState::Reloading)
    }

    pub fn is_terminal_inactive(self) -> bool {
        matches!(self, ActiveState::Inactive | ActiveState::Failed | ActiveState::Maintenance)
    }
}

crate::simple_display! {
    ActiveState {
        Inactive => "inactive",
        Activating => "activating",
        Active => "active",
        Reloading => "reloading",
        Deactivating => "deactivating",
        Failed => "failed",
        Maintenance => "maintenance",
    }
}

bitflags! {
    /// Flags passed to `notify()`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NotifyFlags: u8 {
        /// Downgrade the reload outcome (a reload that failed counts as a
        /// soft failure, not a hard one).
        const RELOAD_FAILURE    = 0b0000_0001;
        /// Suppress failure actions; mark the unit as about to auto-restart.
        const WILL_AUTO_RESTART = 0b0000_0010;
        /// The transition originates from a condition/assert skip; do not
        /// log it as an error.
        const SKIP_CONDITION    = 0b0000_0100;
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
