// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping one [`Unit`] to and from a [`Record`] (spec §4.7): "the
//! serializer writes: per-unit id, invocation-id, load-state, last
//! timestamps, condition results, rate-limiter state, ... and per-type
//! items via `serialize`". Scalar fields each get their own key, matching
//! the published field names; compound structures (dependencies,
//! timestamps, rate limiters, behavior flags) are JSON-encoded under one
//! key apiece rather than hand-rolling a nested grammar for a line-oriented
//! format that has none — the same call the teacher makes serializing WAL
//! events as single-line JSON.
//!
//! Per-type items (the vtable's own `serialize`/`deserialize_item`) are out
//! of scope here: this crate only knows the generic `Unit` shape the core
//! owns (§1 excludes concrete per-type execution).

use crate::error::{ReloadError, Result};
use crate::stream::Record;
use std::path::PathBuf;
use ue_core::{
    CollectMode, DependencyKind, EdgeMask, EmergencyAction, Provenance, RateLimiter, Unit,
    UnitFlags, UnitHandle, UnitName, UnitTimestamps, UnitType,
};

fn json<T: serde::Serialize>(value: &T) -> String {
    // Every type passed in here is a plain data struct/enum with a derived
    // `Serialize`; this cannot fail in practice, but propagate rather than
    // unwrap in case a future field grows something serde chokes on.
    serde_json::to_string(value).unwrap_or_default()
}

fn from_json<T: serde::de::DeserializeOwned>(field: &'static str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| ReloadError::InvalidField { field, reason: e.to_string() })
}

/// Render `unit` (known internally by `handle`) as a wire record.
pub fn to_record(handle: UnitHandle, unit: &Unit) -> Record {
    let mut r = Record::new();
    r.push("handle", handle.to_string());
    r.push("id", unit.id.to_string());
    for name in &unit.names {
        r.push("name", name.to_string());
    }
    r.push("unit-type", unit.unit_type.suffix());
    r.push("load-state", json(&unit.load_state));

    if let Some(description) = &unit.description {
        r.push("description", description);
    }
    for doc in &unit.documentation {
        r.push("documentation", doc);
    }
    if let Some(p) = &unit.fragment_path {
        r.push("fragment-path", p.to_string_lossy());
    }
    if let Some(p) = &unit.source_path {
        r.push("source-path", p.to_string_lossy());
    }
    for p in &unit.dropin_paths {
        r.push("dropin-path", p.to_string_lossy());
    }

    for (kind, by_peer) in &unit.dependencies {
        for (peer, mask) in by_peer {
            r.push(
                "dependency",
                format!(
                    "{}\t{}\t{}\t{}",
                    json(kind).trim_matches('"'),
                    peer,
                    mask.origin().bits(),
                    mask.destination().bits()
                ),
            );
        }
    }
    for (path, mask) in &unit.requires_mounts_for {
        r.push(
            "requires-mounts-for",
            format!("{}\t{}\t{}", path.to_string_lossy(), mask.origin().bits(), mask.destination().bits()),
        );
    }

    r.push("condition-result", json(&unit.conditions_result));
    r.push("assert-result", json(&unit.asserts_result));
    r.push("timestamps", json(&unit.timestamps));

    if let Some(slice) = &unit.slice {
        r.push("slice", slice.to_string());
    }
    if let Some(id) = unit.invocation_id {
        r.push("invocation-id", id.to_string());
    }

    r.push("start-limit", json(&unit.start_limit));
    r.push("auto-stop-ratelimit", json(&unit.auto_stop_ratelimit));
    r.push("collect-mode", json(&unit.collect_mode));
    r.push("flags", json(&unit.flags));
    r.push("success-action", json(&unit.success_action));
    r.push("failure-action", json(&unit.failure_action));
    r.push("start-limit-action", json(&unit.start_limit_action));
    r.push("job-timeout-action", json(&unit.job_timeout_action));

    if let Some(arg) = &unit.reboot_arg {
        r.push("reboot-arg", arg);
    }
    if let Some(err) = &unit.load_error {
        r.push("load-error", err);
    }
    if let Some(m) = &unit.merged_into {
        r.push("merged-into", m.to_string());
    }

    r.push("has-job", unit.has_job.to_string());
    r.push("has-nop-job", unit.has_nop_job.to_string());
    r.push("sub-state", &unit.sub_state);
    r.push("gc-marker", unit.gc_marker.to_string());

    r
}

/// Parse a record back into `(handle, unit)`. Unknown keys are ignored
/// (forward compatibility, per `deserialize_skip` in §6); a record missing
/// a required field fails with [`ReloadError::Malformed`].
pub fn from_record(record: &Record) -> Result<(UnitHandle, Unit)> {
    let handle_str = record.get("handle").ok_or_else(|| ReloadError::Malformed("missing handle".into()))?;
    let handle = UnitHandle::from_string(handle_str);

    let id_str = record.get("id").ok_or_else(|| ReloadError::Malformed("missing id".into()))?;
    let id = UnitName::parse(id_str)?;

    let type_str = record.get("unit-type").ok_or_else(|| ReloadError::Malformed("missing unit-type".into()))?;
    let unit_type =
        UnitType::ALL.into_iter().find(|t| t.suffix() == type_str).ok_or_else(|| ReloadError::UnknownUnitType(type_str.to_string()))?;

    let mut unit = Unit::new(id, unit_type);

    unit.names = record.get_all("name").map(UnitName::parse).collect::<std::result::Result<Vec<_>, _>>()?;
    if unit.names.is_empty() {
        unit.names.push(unit.id.clone());
    }

    if let Some(s) = record.get("load-state") {
        unit.load_state = from_json("load-state", s)?;
    }
    unit.description = record.get("description").map(str::to_string);
    unit.documentation = record.get_all("documentation").map(str::to_string).collect();
    unit.fragment_path = record.get("fragment-path").map(PathBuf::from);
    unit.source_path = record.get("source-path").map(PathBuf::from);
    unit.dropin_paths = record.get_all("dropin-path").map(PathBuf::from).collect();

    for raw in record.get_all("dependency") {
        let mut parts = raw.splitn(4, '\t');
        let (Some(kind_s), Some(peer_s), Some(origin_s), Some(dest_s)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            tracing::warn!(unit = %handle, raw, "skipping malformed dependency field on reload");
            continue;
        };
        let kind: DependencyKind = from_json("dependency.kind", &format!("\"{kind_s}\""))?;
        let peer = UnitHandle::from_string(peer_s);
        let origin = Provenance::from_bits_truncate(parse_field("dependency.origin", origin_s)?);
        let destination = Provenance::from_bits_truncate(parse_field("dependency.destination", dest_s)?);
        unit.dependencies.entry(kind).or_default().insert(peer, EdgeMask::new(origin, destination));
    }

    for raw in record.get_all("requires-mounts-for") {
        let mut parts = raw.splitn(3, '\t');
        let (Some(path_s), Some(origin_s), Some(dest_s)) = (parts.next(), parts.next(), parts.next()) else {
            tracing::warn!(unit = %handle, raw, "skipping malformed requires-mounts-for field on reload");
            continue;
        };
        let origin = Provenance::from_bits_truncate(parse_field("requires-mounts-for.origin", origin_s)?);
        let destination = Provenance::from_bits_truncate(parse_field("requires-mounts-for.destination", dest_s)?);
        unit.requires_mounts_for.insert(PathBuf::from(path_s), EdgeMask::new(origin, destination));
    }

    if let Some(s) = record.get("condition-result") {
        unit.conditions_result = from_json("condition-result", s)?;
    }
    if let Some(s) = record.get("assert-result") {
        unit.asserts_result = from_json("assert-result", s)?;
    }
    if let Some(s) = record.get("timestamps") {
        unit.timestamps = from_json::<UnitTimestamps>("timestamps", s)?;
    }
    unit.slice = record.get("slice").map(UnitHandle::from_string);
    unit.invocation_id = record.get("invocation-id").and_then(|s| s.parse().ok());

    if let Some(s) = record.get("start-limit") {
        unit.start_limit = from_json::<RateLimiter>("start-limit", s)?;
    }
    if let Some(s) = record.get("auto-stop-ratelimit") {
        unit.auto_stop_ratelimit = from_json::<RateLimiter>("auto-stop-ratelimit", s)?;
    }
    if let Some(s) = record.get("collect-mode") {
        unit.collect_mode = from_json::<CollectMode>("collect-mode", s)?;
    }
    if let Some(s) = record.get("flags") {
        unit.flags = from_json::<UnitFlags>("flags", s)?;
    }
    if let Some(s) = record.get("success-action") {
        unit.success_action = from_json::<EmergencyAction>("success-action", s)?;
    }
    if let Some(s) = record.get("failure-action") {
        unit.failure_action = from_json::<EmergencyAction>("failure-action", s)?;
    }
    if let Some(s) = record.get("start-limit-action") {
        unit.start_limit_action = from_json::<EmergencyAction>("start-limit-action", s)?;
    }
    if let Some(s) = record.get("job-timeout-action") {
        unit.job_timeout_action = from_json::<EmergencyAction>("job-timeout-action", s)?;
    }
    unit.reboot_arg = record.get("reboot-arg").map(str::to_string);
    unit.load_error = record.get("load-error").map(str::to_string);
    unit.merged_into = record.get("merged-into").map(UnitHandle::from_string);
    unit.has_job = record.get("has-job").map(|s| s == "true").unwrap_or(false);
    unit.has_nop_job = record.get("has-nop-job").map(|s| s == "true").unwrap_or(false);
    unit.sub_state = record.get("sub-state").unwrap_or("dead").to_string();
    unit.gc_marker = record.get("gc-marker").and_then(|s| s.parse().ok()).unwrap_or(0);

    Ok((handle, unit))
}

fn parse_field(field: &'static str, s: &str) -> Result<u16> {
    s.parse().map_err(|_| ReloadError::InvalidField { field, reason: format!("not a u16: {s}") })
}

#[cfg(test)]
#[path = "unit_record_tests.rs"]
mod tests;
