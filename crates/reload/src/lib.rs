// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ue-reload: the text serialize/deserialize stream for reload/reexec
//! (spec §4.7, §6). Round-tripping a [`ue_core::UnitTable`] through this
//! crate preserves names, dependency edges with provenance, timestamps,
//! invocation ids, and rate-limiter state; it is the one thing that must
//! survive a manager re-executing itself in place.
//!
//! `UnitRef` back-edges are deliberately not part of the stream — they are
//! runtime bookkeeping the engine's `coldplug` phase rebuilds from the
//! deserialized dependency edges (`References`/`ReferencedBy`) and from
//! whatever external state re-registers them, matching the note on
//! [`ue_core::UnitRefArena`] that refs are "rebuilt by coldplug after a
//! reload".

pub mod error;
pub mod fdset;
pub mod stream;
pub mod unit_record;

pub use error::{ReloadError, Result};
pub use fdset::{Fd, FdSet};

use stream::Record;
use ue_core::{UnitHandle, UnitTable};

/// Serialize every unit in `table` to the wire format (§4.7): one record
/// per unit, blank line between records.
pub fn serialize_table(table: &UnitTable) -> String {
    let records: Vec<Record> = table.iter().map(|(&handle, unit)| unit_record::to_record(handle, unit)).collect();
    stream::write_records(&records)
}

/// Rebuild a [`UnitTable`] from a stream previously produced by
/// [`serialize_table`]. Unit handles are restored exactly as serialized
/// (via [`UnitTable::restore_unit`]) so any `UnitHandle` an embedder held
/// onto across the reexec boundary is still valid; [`UnitTable::names`]
/// and the dependency graph are rebuilt as part of each unit's own
/// deserialization.
///
/// A single malformed record fails the whole call rather than silently
/// dropping a unit — losing a unit on reload is a correctness bug, not a
/// forward-compatibility concern (unlike the unknown-*key* case, which
/// `unit_record::from_record` already tolerates per `deserialize_skip`).
pub fn deserialize_table(data: &str) -> Result<UnitTable> {
    let mut table = UnitTable::new();
    for record in stream::read_records(data) {
        let (handle, unit) = unit_record::from_record(&record)?;
        table.restore_unit(handle, unit)?;
    }
    Ok(table)
}

/// Serialize a single unit, for callers that checkpoint incrementally
/// rather than snapshotting the whole table at once.
pub fn serialize_unit(handle: UnitHandle, unit: &ue_core::Unit) -> String {
    stream::write_records(&[unit_record::to_record(handle, unit)])
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
