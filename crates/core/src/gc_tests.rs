// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dep_kind::DependencyKind;
use crate::name::UnitName;
use crate::provenance::Provenance;
use crate::unit::CollectMode;
use crate::unit_type::UnitType;

fn unit_in(table: &mut UnitTable, name: &str) -> UnitHandle {
    table.new_for_name(UnitName::literal(name), UnitType::Service).unwrap()
}

#[test]
fn individually_collectible_requires_inactive_state() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    // fresh unit: sub_state "dead" -> Inactive, collect_mode default Inactive
    assert!(is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn unit_with_job_is_not_collectible() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    table.get_mut(handle).unwrap().has_job = true;
    assert!(!is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn unit_with_nop_job_is_not_collectible() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    table.get_mut(handle).unwrap().has_nop_job = true;
    assert!(!is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn perpetual_unit_is_not_collectible() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    table.get_mut(handle).unwrap().flags.perpetual = true;
    assert!(!is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn referenced_unit_is_not_collectible() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    let source = unit_in(&mut table, "source.service");
    table.add_reference(source, handle);
    assert!(!is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn failed_unit_collectible_only_under_inactive_or_failed_mode() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    table.get_mut(handle).unwrap().sub_state = "failed".to_string();
    assert!(!is_individually_collectible(table.get(handle).unwrap(), &registry));

    table.get_mut(handle).unwrap().collect_mode = CollectMode::InactiveOrFailed;
    assert!(is_individually_collectible(table.get(handle).unwrap(), &registry));
}

#[test]
fn sweep_collects_unreachable_inactive_unit() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let handle = unit_in(&mut table, "a.service");
    let swept = sweep(&mut table, &registry, 1);
    assert_eq!(swept, vec![handle]);
    assert!(table.get(handle).unwrap().queues.is_queued_on(crate::queue::Queue::Cleanup));
    assert_eq!(table.get(handle).unwrap().gc_marker, 1);
}

#[test]
fn sweep_keeps_units_reachable_via_strong_dependency_from_a_root() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let root = unit_in(&mut table, "root.service");
    let dep = unit_in(&mut table, "dep.service");
    table.add_dependency(root, DependencyKind::Requires, dep, Provenance::FILE, Provenance::empty());
    // root is kept alive by having an active job; dep should be spared as reachable.
    table.get_mut(root).unwrap().has_job = true;

    let swept = sweep(&mut table, &registry, 1);
    assert!(!swept.contains(&dep));
    assert!(!swept.contains(&root));
}

#[test]
fn sweep_does_not_keep_units_reachable_only_via_weak_dependency() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let root = unit_in(&mut table, "root.service");
    let dep = unit_in(&mut table, "dep.service");
    table.add_dependency(root, DependencyKind::Wants, dep, Provenance::FILE, Provenance::empty());
    table.get_mut(root).unwrap().has_job = true;

    let swept = sweep(&mut table, &registry, 1);
    assert!(swept.contains(&dep));
    assert!(!swept.contains(&root));
}

#[test]
fn collect_removes_unit_and_unwinds_edges_and_names() {
    let mut table = UnitTable::new();
    let a = unit_in(&mut table, "a.service");
    let b = unit_in(&mut table, "b.service");
    table.add_dependency(a, DependencyKind::Wants, b, Provenance::FILE, Provenance::empty());

    collect(&mut table, a);

    assert!(!table.contains(a));
    assert!(table.lookup(&UnitName::literal("a.service")).is_none());
    assert!(!table.get(b).unwrap().dependencies.contains_key(&DependencyKind::WantedBy));
}
