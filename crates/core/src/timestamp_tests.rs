// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;

#[test]
fn zero_is_not_set() {
    assert!(!DualTimestamp::ZERO.is_set());
}

#[test]
fn now_is_set() {
    let clock = FakeClock::new();
    let ts = DualTimestamp::now(&clock);
    assert!(ts.is_set());
}

#[test]
fn now_captures_both_clock_readings() {
    let clock = FakeClock::new();
    let ts = DualTimestamp::now(&clock);
    assert_eq!(ts.monotonic_ms, clock.monotonic_ms());
    assert_eq!(ts.epoch_ms, clock.epoch_ms());
}

#[test]
fn unit_timestamps_default_is_all_zero() {
    let ts = UnitTimestamps::default();
    assert_eq!(ts.state_change, DualTimestamp::ZERO);
    assert_eq!(ts.active_enter, DualTimestamp::ZERO);
    assert!(!ts.active_enter.is_set());
}
