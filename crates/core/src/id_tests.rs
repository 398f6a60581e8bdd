// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("tst-");
}

#[test]
fn define_id_new_carries_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn define_id_new_is_unique() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn define_id_from_string_round_trips() {
    let id = TestId::from_string("tst-abc123");
    assert_eq!(id.as_str(), "tst-abc123");
    assert_eq!(id, "tst-abc123");
}

#[test]
fn define_id_suffix_strips_prefix() {
    let id = TestId::from_string("tst-abc123");
    assert_eq!(id.suffix(), "abc123");
}

#[test]
fn define_id_suffix_is_whole_string_without_prefix() {
    let id = TestId::from_string("no-prefix-here");
    assert_eq!(id.suffix(), "no-prefix-here");
}

#[test]
fn define_id_short_truncates_suffix() {
    let id = TestId::from_string("tst-abcdefghijklmnop");
    assert_eq!(id.short(4), "abcd");
}

#[test]
fn define_id_short_returns_full_suffix_when_shorter() {
    let id = TestId::from_string("tst-abc");
    assert_eq!(id.short(8), "abc");
}

#[test]
fn define_id_is_empty() {
    assert!(TestId::from_string("").is_empty());
    assert!(!TestId::new().is_empty());
}

#[test]
fn define_id_display_matches_as_str() {
    let id = TestId::from_string("tst-xyz");
    assert_eq!(id.to_string(), "tst-xyz");
}

#[test]
fn define_id_from_str_and_string() {
    let from_str: TestId = "tst-a".into();
    let from_string: TestId = String::from("tst-a").into();
    assert_eq!(from_str, from_string);
}

#[test]
fn define_id_hash_map_lookup_by_str() {
    let mut map: HashMap<TestId, u32> = HashMap::new();
    map.insert(TestId::from_string("tst-k"), 42);
    assert_eq!(map.get("tst-k"), Some(&42));
}

#[test]
fn define_id_default_generates_fresh_id() {
    let a = TestId::default();
    let b = TestId::default();
    assert_ne!(a, b);
}

// --- short() free function tests ---

#[test]
fn short_fn_truncates() {
    let s = "abcdefghijklmnop";
    assert_eq!(short(s, 8), "abcdefgh");
}

#[test]
fn short_fn_returns_whole_string_when_longer_limit() {
    let s = "abc";
    assert_eq!(short(s, 100), s);
}

// --- IdBuf tests ---

#[test]
fn id_buf_empty_is_empty() {
    assert!(IdBuf::empty().is_empty());
}

#[test]
fn id_buf_round_trips_as_str() {
    let buf = IdBuf::new("hello");
    assert_eq!(buf.as_str(), "hello");
}

#[test]
fn id_buf_equal_bufs_hash_equal() {
    let mut map: HashMap<IdBuf, i32> = HashMap::new();
    map.insert(IdBuf::new("k"), 1);
    assert_eq!(map.get("k"), Some(&1));
}
