// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ue_core::{DependencyKind, Provenance, UnitName, UnitType};

#[test]
fn round_trips_a_whole_table() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::parse("a.service").unwrap(), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::parse("b.service").unwrap(), UnitType::Target).unwrap();
    table.add_dependency(a, DependencyKind::Wants, b, Provenance::FILE, Provenance::FILE);
    table.get_mut(a).unwrap().sub_state = "running".to_string();

    let text = serialize_table(&table);
    let restored = deserialize_table(&text).unwrap();

    assert_eq!(restored.len(), table.len());
    assert_eq!(restored.lookup(&UnitName::parse("a.service").unwrap()), Some(a));
    assert_eq!(restored.lookup(&UnitName::parse("b.service").unwrap()), Some(b));
    assert_eq!(restored.get(a).unwrap().sub_state, "running");

    let mask = restored.get(a).unwrap().dependencies.get(&DependencyKind::Wants).unwrap().get(&b).unwrap();
    assert_eq!(mask.origin(), Provenance::FILE);
    let inverse_mask = restored.get(b).unwrap().dependencies.get(&DependencyKind::WantedBy).unwrap().get(&a).unwrap();
    assert_eq!(inverse_mask.origin(), Provenance::FILE);
}

#[test]
fn empty_table_round_trips_to_empty_table() {
    let table = UnitTable::new();
    let text = serialize_table(&table);
    assert!(text.is_empty());
    let restored = deserialize_table(&text).unwrap();
    assert!(restored.is_empty());
}

#[test]
fn a_single_serialized_unit_reads_back_alone() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::parse("a.service").unwrap(), UnitType::Service).unwrap();
    let text = serialize_unit(a, table.get(a).unwrap());
    let restored = deserialize_table(&text).unwrap();
    assert_eq!(restored.len(), 1);
    assert!(restored.contains(a));
}

#[test]
fn malformed_record_fails_the_whole_deserialize() {
    let text = "id=a.service\nunit-type=service\n\n";
    let err = deserialize_table(text).unwrap_err();
    assert!(matches!(err, ReloadError::Malformed(_)));
}
