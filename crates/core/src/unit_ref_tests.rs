// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn insert_then_get_round_trips() {
    let mut arena = UnitRefArena::new();
    let source = UnitHandle::new();
    let target = UnitHandle::new();
    let id = arena.insert(source, target);
    let r = arena.get(id).unwrap();
    assert_eq!(r.source, source);
    assert_eq!(r.target, target);
}

#[test]
fn distinct_inserts_get_distinct_ids() {
    let mut arena = UnitRefArena::new();
    let a = arena.insert(UnitHandle::new(), UnitHandle::new());
    let b = arena.insert(UnitHandle::new(), UnitHandle::new());
    assert_ne!(a, b);
}

#[test]
fn remove_returns_the_ref_and_clears_it() {
    let mut arena = UnitRefArena::new();
    let id = arena.insert(UnitHandle::new(), UnitHandle::new());
    assert!(arena.remove(id).is_some());
    assert!(arena.get(id).is_none());
}

#[test]
fn retarget_changes_target_only() {
    let mut arena = UnitRefArena::new();
    let source = UnitHandle::new();
    let old_target = UnitHandle::new();
    let new_target = UnitHandle::new();
    let id = arena.insert(source, old_target);
    arena.retarget(id, new_target);
    let r = arena.get(id).unwrap();
    assert_eq!(r.source, source);
    assert_eq!(r.target, new_target);
}

#[test]
fn len_and_is_empty_track_contents() {
    let mut arena = UnitRefArena::new();
    assert!(arena.is_empty());
    arena.insert(UnitHandle::new(), UnitHandle::new());
    assert_eq!(arena.len(), 1);
    assert!(!arena.is_empty());
}
