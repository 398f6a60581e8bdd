// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The central [`Unit`] entity.

use crate::condition::CheckResult;
use crate::dep_kind::DependencyKind;
use crate::name::UnitName;
use crate::provenance::EdgeMask;
use crate::queue::QueueFlags;
use crate::ratelimit::RateLimiter;
use crate::timestamp::UnitTimestamps;
use crate::unit_ref::UnitRefId;
use crate::unit_type::UnitType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

crate::define_id! {
    /// Stable internal identity for a unit, distinct from its (renameable,
    /// mergeable) name. An embedder holds onto a `UnitHandle` across merges;
    /// `UnitTable::follow_merge` resolves it to the current survivor.
    pub struct UnitHandle("unt-");
}

/// Where a unit is in the load pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Stub,
    Loaded,
    Merged,
    NotFound,
    BadSetting,
    Error,
    Masked,
}

crate::simple_display! {
    LoadState {
        Stub => "stub",
        Loaded => "loaded",
        Merged => "merged",
        NotFound => "not-found",
        BadSetting => "bad-setting",
        Error => "error",
        Masked => "masked",
    }
}

impl LoadState {
    /// Merge survivor priority: loaded > merged > stub > others.
    /// Higher is preferred.
    pub fn merge_priority(&self) -> u8 {
        match self {
            LoadState::Loaded => 3,
            LoadState::Merged => 2,
            LoadState::Stub => 1,
            LoadState::NotFound | LoadState::BadSetting | LoadState::Error | LoadState::Masked => {
                0
            }
        }
    }
}

/// Controls which states the GC is allowed to collect from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectMode {
    #[default]
    Inactive,
    InactiveOrFailed,
}

/// Success-or-failure action taken when the unit hits a terminal outcome.
/// Concrete execution of the action is an external collaborator's job; the
/// engine only needs to know whether one is configured and schedule it via
/// [`crate::effect::Effect::RunEmergencyAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyAction {
    None,
    Reboot,
    RebootForce,
    RebootImmediate,
    PowerOff,
    PowerOffForce,
    PowerOffImmediate,
    Exit,
    ExitForce,
}

impl Default for EmergencyAction {
    fn default() -> Self {
        EmergencyAction::None
    }
}

/// Behavior flags, grouped into one struct so `Unit` doesn't carry
/// nine loose booleans.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UnitFlags {
    pub stop_when_unneeded: bool,
    pub default_dependencies: bool,
    pub refuse_manual_start: bool,
    pub refuse_manual_stop: bool,
    pub allow_isolate: bool,
    pub ignore_on_isolate: bool,
    pub transient: bool,
    /// Never collected, never a merge target; exempt from manual start/stop
    /// refusal checks on the "unit doesn't exist" path.
    pub perpetual: bool,
}

/// The central lifecycle entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitType,
    pub load_state: LoadState,
    /// Canonical name; always present in `names`.
    pub id: UnitName,
    pub names: Vec<UnitName>,

    pub description: Option<String>,
    pub documentation: Vec<String>,

    pub fragment_path: Option<PathBuf>,
    pub source_path: Option<PathBuf>,
    pub dropin_paths: Vec<PathBuf>,

    /// `dependencies[kind][peer] = provenance`.
    pub dependencies: HashMap<DependencyKind, HashMap<UnitHandle, EdgeMask>>,
    pub requires_mounts_for: HashMap<PathBuf, EdgeMask>,

    pub conditions_result: CheckResult,
    pub asserts_result: CheckResult,

    pub timestamps: UnitTimestamps,

    pub slice: Option<UnitHandle>,

    pub queues: QueueFlags,

    /// Set on entering `active`; `None` before first
    /// activation.
    pub invocation_id: Option<u128>,

    pub start_limit: RateLimiter,
    pub auto_stop_ratelimit: RateLimiter,

    pub collect_mode: CollectMode,
    pub flags: UnitFlags,

    pub success_action: EmergencyAction,
    pub failure_action: EmergencyAction,
    pub start_limit_action: EmergencyAction,
    pub job_timeout_action: EmergencyAction,
    pub reboot_arg: Option<String>,

    /// Set by the load pipeline on a retryable I/O failure; the
    /// unit's `load_state` is `Error` while this is set.
    pub load_error: Option<String>,

    /// `merged_into` is set once `load_state == Merged`; `follow_merge`
    /// chases it to the terminal survivor.
    pub merged_into: Option<UnitHandle>,

    /// Back-edges pointing at this unit: `UnitRef`s whose
    /// `target` is this unit, by arena id.
    pub refs_by_target: Vec<UnitRefId>,

    /// Whether this unit currently has a job installed. The job's own
    /// identity/state lives in the external job engine; the unit only
    /// needs to know one is outstanding.
    pub has_job: bool,
    /// Whether this unit has a nop job installed — a placeholder the job
    /// engine keeps around without driving a state transition (e.g. a job
    /// already satisfied by the unit's current state). Gates GC the same
    /// way `has_job` does, since `job == null` covers both in §3.
    pub has_nop_job: bool,

    pub sub_state: String,

    /// GC three-color marker: compared against the manager's
    /// current sweep generation.
    pub gc_marker: u32,
}

impl Unit {
    pub fn new(id: UnitName, unit_type: UnitType) -> Self {
        Self {
            unit_type,
            load_state: LoadState::Stub,
            names: vec![id.clone()],
            id,
            description: None,
            documentation: Vec::new(),
            fragment_path: None,
            source_path: None,
            dropin_paths: Vec::new(),
            dependencies: HashMap::new(),
            requires_mounts_for: HashMap::new(),
            conditions_result: CheckResult::Unevaluated,
            asserts_result: CheckResult::Unevaluated,
            timestamps: UnitTimestamps::default(),
            slice: None,
            queues: QueueFlags::empty(),
            invocation_id: None,
            start_limit: RateLimiter::default(),
            auto_stop_ratelimit: RateLimiter::default(),
            collect_mode: CollectMode::default(),
            flags: UnitFlags::default(),
            success_action: EmergencyAction::None,
            failure_action: EmergencyAction::None,
            start_limit_action: EmergencyAction::None,
            job_timeout_action: EmergencyAction::None,
            reboot_arg: None,
            load_error: None,
            merged_into: None,
            refs_by_target: Vec::new(),
            has_job: false,
            has_nop_job: false,
            sub_state: "dead".to_string(),
            gc_marker: 0,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.load_state == LoadState::Merged
    }

    /// Whether any `UnitRef` currently targets this unit.
    pub fn is_referenced(&self) -> bool {
        !self.refs_by_target.is_empty()
    }

    pub fn dependents(&self, kind: DependencyKind) -> impl Iterator<Item = (&UnitHandle, &EdgeMask)> {
        self.dependencies.get(&kind).into_iter().flat_map(|m| m.iter())
    }
}

crate::builder! {
    pub struct UnitBuilder => Unit {
        set {
            unit_type: UnitType = UnitType::Service,
            id: UnitName = UnitName::literal("test.service"),
            load_state: LoadState = LoadState::Stub,
            names: Vec<UnitName> = Vec::new(),
            documentation: Vec<String> = Vec::new(),
            dropin_paths: Vec<PathBuf> = Vec::new(),
            dependencies: HashMap<DependencyKind, HashMap<UnitHandle, EdgeMask>> = HashMap::new(),
            requires_mounts_for: HashMap<PathBuf, EdgeMask> = HashMap::new(),
            conditions_result: CheckResult = CheckResult::Unevaluated,
            asserts_result: CheckResult = CheckResult::Unevaluated,
            timestamps: UnitTimestamps = UnitTimestamps::default(),
            queues: QueueFlags = QueueFlags::empty(),
            start_limit: RateLimiter = RateLimiter::default(),
            auto_stop_ratelimit: RateLimiter = RateLimiter::default(),
            collect_mode: CollectMode = CollectMode::default(),
            flags: UnitFlags = UnitFlags::default(),
            success_action: EmergencyAction = EmergencyAction::None,
            failure_action: EmergencyAction = EmergencyAction::None,
            start_limit_action: EmergencyAction = EmergencyAction::None,
            job_timeout_action: EmergencyAction = EmergencyAction::None,
            refs_by_target: Vec<UnitRefId> = Vec::new(),
            has_job: bool = false,
            has_nop_job: bool = false,
            sub_state: String = "dead".to_string(),
            gc_marker: u32 = 0,
        }
        option {
            description: String = None,
            fragment_path: PathBuf = None,
            source_path: PathBuf = None,
            slice: UnitHandle = None,
            invocation_id: u128 = None,
            reboot_arg: String = None,
            load_error: String = None,
            merged_into: UnitHandle = None,
        }
    }
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
