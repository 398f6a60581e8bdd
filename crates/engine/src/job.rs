// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between the Unit Engine and the (out-of-scope) job engine.
//!
//! spec.md §6 describes the contract the real job engine owes the Unit
//! Engine: `install(unit, job_type, mode) -> job_handle`, `complete(job,
//! result)`, `fail(job, kind)`. We model that contract as a trait so the
//! engine crate can be exercised — and its own tests written — without
//! wiring a real job scheduler, the same way the teacher seams out
//! `NotifyAdapter`/`AgentAdapter` behind a trait with a recording fake.

use serde::{Deserialize, Serialize};
use ue_core::UnitHandle;

ue_core::define_id! {
    /// Opaque handle for an installed job. Owned by the job engine; the
    /// Unit Engine only ever holds it long enough to ask for completion.
    pub struct JobHandle("job-");
}

/// The operation a job performs. Mirrors the manager façade's public
/// operations (§4.8) one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Start,
    Stop,
    Reload,
    Restart,
    TryRestart,
    Verify,
    Kill,
    Clean,
}

/// How a newly installed job should interact with whatever is already
/// queued for the same unit (or, for `Isolate`, every other unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    /// Replace an existing job for the unit; fail if doing so would
    /// require cancelling a job with a conflicting ordering dependency.
    Fail,
    /// Replace any existing job for the unit unconditionally.
    Replace,
    /// Like `Replace`, but also ignore "irreversible" jobs already queued
    /// (a job marked irreversible cannot normally be superseded).
    ReplaceIrreversibly,
    /// Stop every unit not a (transitive) dependency of the target and
    /// start the target; used by `Manager::isolate`.
    Isolate,
}

/// Why a job finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobResult {
    Done,
    Cancelled,
    Timeout,
    Failed,
    Dependency,
    Skipped,
}

/// The contract the out-of-scope job engine owes the Unit Engine (§6):
/// install a job, and let the Unit Engine resolve it once the unit's state
/// machine reaches a terminal outcome. All methods are synchronous —
/// scheduling work for later is the job engine's own problem; from the
/// Unit Engine's point of view `install` either succeeds immediately or
/// fails with an applicability error.
pub trait JobEngine: Send + Sync {
    /// Install a job of `job_type` for `unit` under `mode`. Returns the
    /// handle the Unit Engine will later pass back to `complete`/`fail`.
    fn install(&mut self, unit: UnitHandle, job_type: JobType, mode: JobMode) -> Result<JobHandle, ue_core::UnitError>;

    /// The job completed successfully.
    fn complete(&mut self, job: JobHandle);

    /// The job failed (or was downgraded to a failure, e.g. a reload that
    /// did not take).
    fn fail(&mut self, job: JobHandle, kind: JobResult);

    /// Cancel a job outright (used on unit destruction/manager shutdown),
    /// without it counting as a success or failure for the unit.
    fn cancel(&mut self, job: JobHandle);
}

/// In-memory `JobEngine` used by the engine crate's own tests, and
/// available to embedders who want the Unit Engine's observable behavior
/// (job resolution drives the state machine) without standing up a real
/// job scheduler.
#[derive(Debug, Default)]
pub struct StubJobEngine {
    next: std::sync::atomic::AtomicU64,
    installed: std::collections::HashMap<JobHandle, (UnitHandle, JobType)>,
    /// Every terminal resolution observed, in order, for test assertions.
    pub resolutions: Vec<(JobHandle, Option<JobResult>)>,
}

impl StubJobEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_installed(&self, job: JobHandle) -> bool {
        self.installed.contains_key(&job)
    }

    pub fn unit_of(&self, job: JobHandle) -> Option<UnitHandle> {
        self.installed.get(&job).map(|(u, _)| *u)
    }
}

impl JobEngine for StubJobEngine {
    fn install(&mut self, unit: UnitHandle, job_type: JobType, _mode: JobMode) -> Result<JobHandle, ue_core::UnitError> {
        let n = self.next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let handle = JobHandle::from_string(format!("{}{n}", JobHandle::PREFIX));
        self.installed.insert(handle, (unit, job_type));
        Ok(handle)
    }

    fn complete(&mut self, job: JobHandle) {
        self.installed.remove(&job);
        self.resolutions.push((job, None));
    }

    fn fail(&mut self, job: JobHandle, kind: JobResult) {
        self.installed.remove(&job);
        self.resolutions.push((job, Some(kind)));
    }

    fn cancel(&mut self, job: JobHandle) {
        self.installed.remove(&job);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
