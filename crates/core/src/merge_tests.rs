// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dep_kind::DependencyKind;
use crate::name::UnitName;
use crate::provenance::Provenance;
use crate::unit::LoadState;
use crate::unit_type::UnitType;

#[test]
fn merge_is_noop_for_identical_handles() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    assert!(table.merge(a, a).is_ok());
}

#[test]
fn merge_unknown_loser_fails() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let bogus = crate::unit::UnitHandle::new();
    assert!(matches!(table.merge(a, bogus), Err(UnitError::UnknownHandle(_))));
}

#[test]
fn merge_unknown_survivor_fails() {
    let mut table = UnitTable::new();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    let bogus = crate::unit::UnitHandle::new();
    assert!(matches!(table.merge(bogus, b), Err(UnitError::UnknownHandle(_))));
}

#[test]
fn merge_refuses_perpetual_loser() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    table.get_mut(b).unwrap().flags.perpetual = true;
    assert!(matches!(table.merge(a, b), Err(UnitError::BadSetting(..))));
}

#[test]
fn merge_marks_loser_merged_and_points_at_survivor() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    table.merge(a, b).unwrap();
    let loser = table.get(b).unwrap();
    assert_eq!(loser.load_state, LoadState::Merged);
    assert_eq!(loser.merged_into, Some(a));
}

#[test]
fn merge_rewrites_names_onto_survivor() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    table.merge(a, b).unwrap();
    assert_eq!(table.lookup(&UnitName::literal("b.service")), Some(a));
    assert!(table.get(a).unwrap().names.contains(&UnitName::literal("b.service")));
    assert!(table.get(b).unwrap().names.is_empty());
}

#[test]
fn merge_rewrites_dependencies_onto_survivor() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    let c = table.new_for_name(UnitName::literal("c.service"), UnitType::Service).unwrap();
    table.add_dependency(b, DependencyKind::Requires, c, Provenance::FILE, Provenance::empty());

    table.merge(a, b).unwrap();

    assert!(table.get(a).unwrap().dependencies[&DependencyKind::Requires].contains_key(&c));
    assert!(table.get(c).unwrap().dependencies[&DependencyKind::RequiredBy].contains_key(&a));
    assert!(!table.get(c).unwrap().dependencies[&DependencyKind::RequiredBy].contains_key(&b));
    assert!(table.get(b).unwrap().dependencies.is_empty());
}

#[test]
fn merge_drops_self_loop_when_loser_depended_on_survivor() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    table.add_dependency(b, DependencyKind::Requires, a, Provenance::FILE, Provenance::empty());

    table.merge(a, b).unwrap();

    assert!(!table.get(a).unwrap().dependencies.contains_key(&DependencyKind::Requires));
}

#[test]
fn merge_rewrites_references_onto_survivor() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    let source = table.new_for_name(UnitName::literal("source.service"), UnitType::Service).unwrap();
    let ref_id = table.add_reference(source, b);

    table.merge(a, b).unwrap();

    assert!(table.get(a).unwrap().refs_by_target.contains(&ref_id));
    assert!(table.get(b).unwrap().refs_by_target.is_empty());
    assert_eq!(table.refs.get(ref_id).unwrap().target, a);
}

#[test]
fn merge_priority_winner_prefers_loaded_over_stub() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    table.set_load_state(a, LoadState::Loaded);
    let (winner, loser) = table.merge_priority_winner(a, b).unwrap();
    assert_eq!(winner, a);
    assert_eq!(loser, b);
}

#[test]
fn merge_priority_winner_ties_break_lexicographically() {
    let mut table = UnitTable::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    // both Stub: equal priority, "a.service" < "b.service"
    let (winner, loser) = table.merge_priority_winner(b, a).unwrap();
    assert_eq!(winner, a);
    assert_eq!(loser, b);
}

#[test]
fn merge_priority_winner_unknown_handle_is_none() {
    let table = UnitTable::new();
    assert!(table.merge_priority_winner(crate::unit::UnitHandle::new(), crate::unit::UnitHandle::new()).is_none());
}
