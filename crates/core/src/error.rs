// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the unit engine.
//!
//! Syntactic and applicability errors are returned to the caller unchanged;
//! runtime failures during start/stop drive the state machine instead of
//! propagating as call errors (see [`crate::notify`]).

use crate::name::UnitName;
use crate::unit::UnitHandle;
use thiserror::Error;

/// Errors surfaced directly to callers of the identity, graph, and manager
/// operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("invalid unit name: {0}")]
    InvalidName(String),

    #[error("name {0} is already owned by another unit")]
    NameConflict(UnitName),

    #[error("unit {0} not found")]
    NotFound(UnitName),

    #[error("unit handle {0} not found")]
    UnknownHandle(UnitHandle),

    #[error("unit {0} is masked")]
    Masked(UnitName),

    #[error("bad setting on unit {0}: {1}")]
    BadSetting(UnitName, String),

    #[error("failed to load unit {0}: {1}")]
    LoadError(UnitName, String),

    #[error("job for unit {0} conflicts with an already-installed job")]
    JobConflicts(UnitName),

    #[error("job type is not applicable to unit {0}")]
    JobNotApplicable(UnitName),

    #[error("manual start of unit {0} is refused")]
    ManualStartRefused(UnitName),

    #[error("isolate into unit {0} is refused")]
    IsolateRefused(UnitName),

    #[error("unit {0} is rate-limited")]
    RateLimited(UnitName),

    #[error("unit {0} does not allow transient units")]
    TransientNotAllowed(UnitName),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("out of memory")]
    Oom,

    #[error("operation on unit {0} timed out")]
    Timeout(UnitName),

    #[error("operation on unit {0} was cancelled")]
    Cancelled(UnitName),
}

pub type Result<T> = std::result::Result<T, UnitError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
