// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ue_core::{UnitName, UnitType};

#[test]
fn run_sweep_links_swept_units_onto_cleanup_fifo() {
    let registry = VTableRegistry::standard();
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();

    let swept = run_sweep(&mut table, &mut d, &registry, 1);
    assert_eq!(swept, vec![h]);
    assert_eq!(d.len(Queue::Cleanup), 1);
    assert_eq!(d.dequeue(&mut table, Queue::Cleanup), Some(h));
}

#[test]
fn run_cleanup_removes_the_unit_from_the_table() {
    let mut table = UnitTable::new();
    let h = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    run_cleanup(&mut table, h);
    assert!(!table.contains(h));
}
