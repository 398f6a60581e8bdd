// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::adapters::RecordingCgroup;
use ue_core::{UnitName, UnitTable, UnitType};

fn new_unit(table: &mut UnitTable) -> UnitHandle {
    table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap()
}

#[test]
fn realize_records_path_and_marks_realized() {
    let mut table = UnitTable::new();
    let h = new_unit(&mut table);
    let mut cgroups = CgroupTable::new();
    let mut adapter = RecordingCgroup::default();

    cgroups.realize(&mut adapter, h);

    let a = cgroups.get(h).unwrap();
    assert!(a.realized);
    assert!(a.enabled);
    assert!(!a.invalidated);
    assert_eq!(adapter.realized, vec![h]);
}

#[test]
fn mark_empty_clears_members_and_reports_change_once_realized() {
    let mut table = UnitTable::new();
    let h = new_unit(&mut table);
    let mut cgroups = CgroupTable::new();
    let mut adapter = RecordingCgroup::default();
    cgroups.realize(&mut adapter, h);
    cgroups.get(h); // still realized, members defaults to 0

    let changed = cgroups.mark_empty(h);
    assert!(changed);
    assert_eq!(cgroups.get(h).unwrap().members, 0);
}

#[test]
fn mark_empty_on_unknown_unit_reports_no_change() {
    let mut table = UnitTable::new();
    let h = new_unit(&mut table);
    let mut cgroups = CgroupTable::new();
    assert!(!cgroups.mark_empty(h));
}

#[test]
fn invalidate_and_remove() {
    let mut table = UnitTable::new();
    let h = new_unit(&mut table);
    let mut cgroups = CgroupTable::new();
    let mut adapter = RecordingCgroup::default();
    cgroups.realize(&mut adapter, h);

    cgroups.invalidate(h);
    assert!(cgroups.get(h).unwrap().invalidated);

    cgroups.remove(h);
    assert!(cgroups.get(h).is_none());
}
