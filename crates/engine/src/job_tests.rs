// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ue_core::UnitHandle;

#[test]
fn install_then_complete_removes_bookkeeping() {
    let mut stub = StubJobEngine::new();
    let unit = UnitHandle::new();
    let job = stub.install(unit, JobType::Start, JobMode::Replace).unwrap();
    assert!(stub.is_installed(job));
    assert_eq!(stub.unit_of(job), Some(unit));

    stub.complete(job);
    assert!(!stub.is_installed(job));
    assert_eq!(stub.resolutions, vec![(job, None)]);
}

#[test]
fn fail_records_the_result_kind() {
    let mut stub = StubJobEngine::new();
    let unit = UnitHandle::new();
    let job = stub.install(unit, JobType::Stop, JobMode::Fail).unwrap();
    stub.fail(job, JobResult::Failed);
    assert_eq!(stub.resolutions, vec![(job, Some(JobResult::Failed))]);
}

#[test]
fn cancel_drops_bookkeeping_without_recording_a_resolution() {
    let mut stub = StubJobEngine::new();
    let unit = UnitHandle::new();
    let job = stub.install(unit, JobType::Reload, JobMode::Replace).unwrap();
    stub.cancel(job);
    assert!(!stub.is_installed(job));
    assert!(stub.resolutions.is_empty());
}

#[test]
fn successive_installs_get_distinct_handles() {
    let mut stub = StubJobEngine::new();
    let unit = UnitHandle::new();
    let a = stub.install(unit, JobType::Start, JobMode::Replace).unwrap();
    let b = stub.install(unit, JobType::Start, JobMode::Replace).unwrap();
    assert_ne!(a, b);
}
