// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock::default();
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn system_clock_default() {
    let clock = SystemClock::default();
    let _ = clock.now();
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(30));
}

#[test]
fn fake_clock_default() {
    let clock = FakeClock::default();
    let _ = clock.now();
}

#[test]
fn fake_clock_set() {
    let clock = FakeClock::new();
    let future = Instant::now() + Duration::from_secs(3600);
    clock.set(future);
    assert!(clock.now() >= future);
}

#[test]
fn monotonic_ms_advances_with_clock() {
    let clock = FakeClock::new();
    let start = clock.monotonic_ms();
    clock.advance(Duration::from_millis(500));
    assert_eq!(clock.monotonic_ms(), start + 500);
}

#[test]
fn epoch_ms_and_monotonic_ms_advance_together() {
    let clock = FakeClock::new();
    let epoch1 = clock.epoch_ms();
    clock.advance(Duration::from_secs(1));
    assert_eq!(clock.epoch_ms(), epoch1 + 1000);
}
