// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects the engine must carry out in response to a pure state-machine
//! transition.
//!
//! [`crate::notify::notify`] and the dependency-graph operations are pure
//! functions over [`crate::table::UnitTable`] that *describe* what the
//! runtime must do next instead of doing it directly — installing a job,
//! enqueuing a unit on a queue, telling the bus layer something changed.
//! The `engine` crate's executor is the only thing that interprets these.

use crate::queue::Queue;
use crate::unit::{EmergencyAction, UnitHandle};
use serde::{Deserialize, Serialize};

/// Why the job layer should complete or fail the unit's currently
/// installed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    Complete,
    Fail,
}

/// A side effect produced by the state machine or graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Enqueue `unit` onto `queue`. The caller must also flip the unit's
    /// `QueueFlags` bit so the flag and the FIFO never disagree.
    Enqueue { unit: UnitHandle, queue: Queue },

    /// Resolve the unit's currently installed job.
    ResolveJob { unit: UnitHandle, outcome: JobOutcome },

    /// Notify every triggerer of `unit` (units pointing at it via
    /// `Triggers`) that its state changed.
    TriggerNotify { unit: UnitHandle, triggerer: UnitHandle },

    /// Run the configured emergency action.
    RunEmergencyAction { unit: UnitHandle, action: EmergencyAction, reboot_arg: Option<String> },

    /// Emit a `PropertiesChanged`-style bus signal. The D-Bus
    /// queue enqueue itself is a separate `Enqueue` effect; this is the
    /// signal emitted once the queue drains.
    EmitPropertiesChanged { unit: UnitHandle },
    EmitUnitNew { unit: UnitHandle },
    EmitUnitRemoved { unit: UnitHandle },

    /// Log a state transition at the given level.
    Log { unit: UnitHandle, level: LogLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl Effect {
    /// Effect name for log spans.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Enqueue { .. } => "enqueue",
            Effect::ResolveJob { .. } => "resolve_job",
            Effect::TriggerNotify { .. } => "trigger_notify",
            Effect::RunEmergencyAction { .. } => "run_emergency_action",
            Effect::EmitPropertiesChanged { .. } => "emit_properties_changed",
            Effect::EmitUnitNew { .. } => "emit_unit_new",
            Effect::EmitUnitRemoved { .. } => "emit_unit_removed",
            Effect::Log { .. } => "log",
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
