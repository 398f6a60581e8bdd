// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ue_core::{UnitName, UnitType};

fn unit_in(table: &mut UnitTable) -> UnitHandle {
    table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap()
}

#[test]
fn enqueue_sets_flag_and_links_fifo() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = unit_in(&mut table);
    assert!(d.enqueue(&mut table, h, Queue::Gc));
    assert!(table.get(h).unwrap().queues.is_queued_on(Queue::Gc));
    assert_eq!(d.len(Queue::Gc), 1);
}

#[test]
fn enqueue_twice_is_a_no_op() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = unit_in(&mut table);
    assert!(d.enqueue(&mut table, h, Queue::Gc));
    assert!(!d.enqueue(&mut table, h, Queue::Gc));
    assert_eq!(d.len(Queue::Gc), 1);
}

#[test]
fn dequeue_clears_flag_and_unlinks() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = unit_in(&mut table);
    d.enqueue(&mut table, h, Queue::Load);
    let popped = d.dequeue(&mut table, Queue::Load).unwrap();
    assert_eq!(popped, h);
    assert!(!table.get(h).unwrap().queues.is_queued_on(Queue::Load));
    assert!(d.is_empty_all());
}

#[test]
fn fifo_order_is_preserved_within_a_queue() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let a = table.new_for_name(UnitName::literal("a.service"), UnitType::Service).unwrap();
    let b = table.new_for_name(UnitName::literal("b.service"), UnitType::Service).unwrap();
    d.enqueue(&mut table, a, Queue::DBus);
    d.enqueue(&mut table, b, Queue::DBus);
    assert_eq!(d.dequeue(&mut table, Queue::DBus), Some(a));
    assert_eq!(d.dequeue(&mut table, Queue::DBus), Some(b));
}

#[test]
fn drain_to_fixpoint_processes_in_published_queue_order() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = unit_in(&mut table);
    d.enqueue(&mut table, h, Queue::DBus);
    d.enqueue(&mut table, h, Queue::Load);

    let mut seen = Vec::new();
    d.drain_to_fixpoint(&mut table, |_d, _t, queue, _unit| seen.push(queue));
    assert_eq!(seen, vec![Queue::Load, Queue::DBus]);
}

#[test]
fn drain_to_fixpoint_follows_re_enqueues_until_dry() {
    let mut table = UnitTable::new();
    let mut d = Dispatcher::new();
    let h = unit_in(&mut table);
    d.enqueue(&mut table, h, Queue::Gc);

    let mut hops = 0;
    d.drain_to_fixpoint(&mut table, |d, t, queue, unit| {
        hops += 1;
        if queue == Queue::Gc && hops < 3 {
            d.enqueue(t, unit, Queue::Gc);
        }
    });
    assert_eq!(hops, 3);
    assert!(d.is_empty_all());
}
