// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External-collaborator seams the Unit Engine drives but does not
//! implement (§6): the bus layer, the cgroup/BPF layer, and the unit-file
//! loader. Each is a small trait plus a recording fake, grounded in the
//! teacher's `NotifyAdapter`/`AgentAdapter` pattern (`oj-adapters`):
//! production code gets a real implementation wired in by the embedder,
//! tests get a fake that records what was asked of it.

use std::collections::HashMap;
use ue_core::{Provenance, UnitHandle, UnitName};

/// Emits the three bus signals the notifier and queue scheduler produce
/// (§6). Transport (sd-bus or otherwise) is entirely the embedder's
/// concern; the engine only knows it must tell *someone*.
pub trait BusAdapter: Send + Sync {
    fn properties_changed(&mut self, unit: UnitHandle);
    fn unit_new(&mut self, unit: UnitHandle);
    fn unit_removed(&mut self, unit: UnitHandle);
}

/// A `BusAdapter` that drops every signal. The default for embedders that
/// have no bus layer at all.
#[derive(Debug, Default)]
pub struct NullBus;

impl BusAdapter for NullBus {
    fn properties_changed(&mut self, _unit: UnitHandle) {}
    fn unit_new(&mut self, _unit: UnitHandle) {}
    fn unit_removed(&mut self, _unit: UnitHandle) {}
}

/// Records every signal emitted, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub properties_changed: Vec<UnitHandle>,
    pub unit_new: Vec<UnitHandle>,
    pub unit_removed: Vec<UnitHandle>,
}

impl BusAdapter for RecordingBus {
    fn properties_changed(&mut self, unit: UnitHandle) {
        self.properties_changed.push(unit);
    }
    fn unit_new(&mut self, unit: UnitHandle) {
        self.unit_new.push(unit);
    }
    fn unit_removed(&mut self, unit: UnitHandle) {
        self.unit_removed.push(unit);
    }
}

/// What the cgroup-realize queue needs from the cgroup/BPF layer (§6):
/// materialize the hierarchy for a newly-activated unit, and report back
/// when its cgroup empties out or takes an OOM kill. The engine tracks
/// only the realization bookkeeping (`realized`/`enabled`/`invalidated`);
/// everything about *how* a cgroup is built is opaque to it.
pub trait CgroupAdapter: Send + Sync {
    /// Materialize (or re-materialize) the cgroup hierarchy for `unit`.
    /// Returns an opaque path string the engine stores but never
    /// interprets.
    fn realize(&mut self, unit: UnitHandle) -> String;
}

#[derive(Debug, Default)]
pub struct NullCgroup;

impl CgroupAdapter for NullCgroup {
    fn realize(&mut self, _unit: UnitHandle) -> String {
        String::new()
    }
}

#[derive(Debug, Default)]
pub struct RecordingCgroup {
    pub realized: Vec<UnitHandle>,
}

impl CgroupAdapter for RecordingCgroup {
    fn realize(&mut self, unit: UnitHandle) -> String {
        self.realized.push(unit);
        format!("/unit-engine/{unit}")
    }
}

/// What the notifier's `TriggerNotify` effect asks of the (external)
/// collaborator that actually interprets `TriggeredBy` edges (§4.4 item 6):
/// tell `triggerer` that `unit` changed state. Deciding what a triggerer
/// *does* with that (a `Path` unit starting the service it triggers, for
/// instance) is per-type execution, out of scope (§1).
pub trait TriggerAdapter: Send + Sync {
    fn notify_triggerer(&mut self, unit: UnitHandle, triggerer: UnitHandle);
}

#[derive(Debug, Default)]
pub struct NullTrigger;

impl TriggerAdapter for NullTrigger {
    fn notify_triggerer(&mut self, _unit: UnitHandle, _triggerer: UnitHandle) {}
}

#[derive(Debug, Default)]
pub struct RecordingTrigger {
    pub notified: Vec<(UnitHandle, UnitHandle)>,
}

impl TriggerAdapter for RecordingTrigger {
    fn notify_triggerer(&mut self, unit: UnitHandle, triggerer: UnitHandle) {
        self.notified.push((unit, triggerer));
    }
}

/// What `Effect::RunEmergencyAction` asks of the (external) collaborator
/// that can actually reboot/power off/exit the manager process (§4.4 item
/// 9, §6). Carrying out the action is entirely out of scope; the engine
/// only needs to hand it off.
pub trait EmergencyActionAdapter: Send + Sync {
    fn run(&mut self, unit: UnitHandle, action: ue_core::EmergencyAction, reboot_arg: Option<String>);
}

#[derive(Debug, Default)]
pub struct NullEmergencyAction;

impl EmergencyActionAdapter for NullEmergencyAction {
    fn run(&mut self, _unit: UnitHandle, _action: ue_core::EmergencyAction, _reboot_arg: Option<String>) {}
}

#[derive(Debug, Default)]
pub struct RecordingEmergencyAction {
    pub runs: Vec<(UnitHandle, ue_core::EmergencyAction, Option<String>)>,
}

impl EmergencyActionAdapter for RecordingEmergencyAction {
    fn run(&mut self, unit: UnitHandle, action: ue_core::EmergencyAction, reboot_arg: Option<String>) {
        self.runs.push((unit, action, reboot_arg));
    }
}

/// Outcome of resolving a unit's fragment + drop-ins (§4.5 load queue).
/// Unit-file parsing itself is out of scope (§1); this is the parsed
/// result the (external) loader hands back.
#[derive(Debug, Clone, Default)]
pub struct ParsedFragment {
    pub description: Option<String>,
    pub documentation: Vec<String>,
    /// Edges to install once loaded, each with its own provenance split.
    pub dependencies: Vec<(ue_core::DependencyKind, UnitName, Provenance, Provenance)>,
    pub default_dependencies: bool,
}

/// What the load queue asks of the (external) unit-file loader.
pub enum LoadOutcome {
    NotFound,
    Masked,
    Loaded(ParsedFragment),
    /// A retryable I/O failure; the unit moves to `LoadState::Error`
    /// carrying this message in `load_error` rather than failing the call
    /// outright (§7).
    Error(String),
}

pub trait FragmentLoader: Send + Sync {
    fn load(&mut self, name: &UnitName) -> LoadOutcome;
}

/// A loader that always reports `NotFound`, for embedders/tests with no
/// on-disk unit files at all.
#[derive(Debug, Default)]
pub struct NullLoader;

impl FragmentLoader for NullLoader {
    fn load(&mut self, _name: &UnitName) -> LoadOutcome {
        LoadOutcome::NotFound
    }
}

/// An in-memory loader for tests: pre-seed fragments by name.
#[derive(Debug, Default)]
pub struct MapLoader {
    fragments: HashMap<UnitName, ParsedFragment>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, name: UnitName, fragment: ParsedFragment) -> &mut Self {
        self.fragments.insert(name, fragment);
        self
    }
}

impl FragmentLoader for MapLoader {
    fn load(&mut self, name: &UnitName) -> LoadOutcome {
        match self.fragments.get(name) {
            Some(f) => LoadOutcome::Loaded(f.clone()),
            None => LoadOutcome::NotFound,
        }
    }
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
