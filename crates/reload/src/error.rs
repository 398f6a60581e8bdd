// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the serialize/deserialize round-trip.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("unknown unit type suffix: {0}")]
    UnknownUnitType(String),

    #[error("invalid unit name in stream: {0}")]
    InvalidName(#[from] ue_core::UnitError),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ReloadError>;
