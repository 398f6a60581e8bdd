// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dual monotonic/wall-clock timestamp pairs.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};

/// A timestamp recorded as both a monotonic instant (for interval math,
/// immune to clock jumps) and a wall-clock epoch-millisecond value (for
/// serialization and display). `monotonic_ms` is relative to an arbitrary
/// per-process origin and is only meaningful for a single `Clock` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DualTimestamp {
    pub monotonic_ms: u64,
    pub epoch_ms: u64,
}

impl DualTimestamp {
    pub const ZERO: DualTimestamp = DualTimestamp { monotonic_ms: 0, epoch_ms: 0 };

    pub fn now(clock: &impl Clock) -> Self {
        Self { monotonic_ms: clock.monotonic_ms(), epoch_ms: clock.epoch_ms() }
    }

    pub fn is_set(&self) -> bool {
        self.epoch_ms != 0
    }
}

/// All timestamps a unit tracks: state-change bookkeeping plus
/// condition/assert evaluation times.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UnitTimestamps {
    pub state_change: DualTimestamp,
    pub inactive_exit: DualTimestamp,
    pub active_enter: DualTimestamp,
    pub active_exit: DualTimestamp,
    pub inactive_enter: DualTimestamp,
    pub condition: DualTimestamp,
    pub assert: DualTimestamp,
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
