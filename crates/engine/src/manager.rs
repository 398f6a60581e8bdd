// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Manager` façade (§4.8): owns the table, the queue scheduler, the
//! GC generation counter, and every external adapter, and exposes the
//! operations external collaborators actually call —
//! `start/stop/reload/kill/clean/can_clean/isolate/try_restart`,
//! `add_dependency`, `set_property` — plus `tick()`, which drains every
//! queue to a fixpoint the way a real embedder's event loop would call it
//! once per iteration.

use crate::adapters::{BusAdapter, CgroupAdapter, EmergencyActionAdapter, FragmentLoader, TriggerAdapter};
use crate::cgroup::CgroupTable;
use crate::dispatcher::Dispatcher;
use crate::executor::Executor;
use crate::job::{JobEngine, JobHandle, JobMode, JobType};
use crate::target_deps::TargetDepsQueue;
use std::collections::HashMap;
use ue_core::{
    ActiveState, Clock, LoadState, NotifyFlags, Provenance, Queue, Unit, UnitError, UnitHandle, UnitName, UnitTable,
    UnitType, VTableRegistry,
};

/// Staleness token for callbacks issued before a `shutdown()`. Mirrors the
/// teacher's pattern of embedding a generation/epoch in anything handed to
/// an external collaborator that might call back after the owning object
/// is gone (§5: "late callbacks detect a stale token and no-op").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(pub u64);

/// Owns every piece of mutable state plus the external adapters (boxed:
/// the façade is not a hot loop, one dynamic dispatch per effect is
/// immaterial next to whatever the real job/bus/cgroup layers cost).
pub struct Manager<C: Clock> {
    pub table: UnitTable,
    registry: VTableRegistry,
    dispatcher: Dispatcher,
    target_deps: TargetDepsQueue,
    cgroups: CgroupTable,
    job_handles: HashMap<UnitHandle, JobHandle>,
    clock: C,
    jobs: Box<dyn JobEngine>,
    bus: Box<dyn BusAdapter>,
    triggers: Box<dyn TriggerAdapter>,
    emergency: Box<dyn EmergencyActionAdapter>,
    loader: Box<dyn FragmentLoader>,
    cgroup_adapter: Box<dyn CgroupAdapter>,
    gc_generation: u32,
    generation: u64,
}

impl<C: Clock> Manager<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: VTableRegistry,
        clock: C,
        jobs: Box<dyn JobEngine>,
        bus: Box<dyn BusAdapter>,
        triggers: Box<dyn TriggerAdapter>,
        emergency: Box<dyn EmergencyActionAdapter>,
        loader: Box<dyn FragmentLoader>,
        cgroup_adapter: Box<dyn CgroupAdapter>,
    ) -> Self {
        Self {
            table: UnitTable::new(),
            registry,
            dispatcher: Dispatcher::new(),
            target_deps: TargetDepsQueue::new(),
            cgroups: CgroupTable::new(),
            job_handles: HashMap::new(),
            clock,
            jobs,
            bus,
            triggers,
            emergency,
            loader,
            cgroup_adapter,
            gc_generation: 0,
            generation: 0,
        }
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn is_current(&self, token: Generation) -> bool {
        token.0 == self.generation
    }

    pub fn get(&self, unit: UnitHandle) -> Option<&Unit> {
        self.table.get(unit)
    }

    pub fn lookup(&self, name: &UnitName) -> Option<UnitHandle> {
        self.table.lookup_resolved(name)
    }

    /// Create a fresh stub unit and enqueue it for loading. Mirrors the
    /// "discover, then load" flow `resolve_or_stub`/the load queue expect.
    pub fn create_unit(&mut self, name: UnitName, unit_type: UnitType) -> Result<UnitHandle, UnitError> {
        let handle = self.table.new_for_name(name, unit_type)?;
        self.dispatcher.enqueue(&mut self.table, handle, Queue::Load);
        Ok(handle)
    }

    /// Entry point for the cgroup/BPF layer (§6) to ask the realize queue
    /// to (re-)materialize `unit`'s hierarchy on the next `tick()`.
    pub fn request_cgroup_realize(&mut self, unit: UnitHandle) {
        self.dispatcher.enqueue(&mut self.table, unit, Queue::CgroupRealize);
    }

    /// Entry point for the cgroup layer to report `unit`'s cgroup just
    /// emptied out (§4.5 item 6).
    pub fn report_cgroup_empty(&mut self, unit: UnitHandle) {
        self.dispatcher.enqueue(&mut self.table, unit, Queue::CgroupEmpty);
    }

    /// Entry point for the cgroup layer to report an OOM kill inside
    /// `unit`'s cgroup (§4.5 item 7).
    pub fn report_cgroup_oom(&mut self, unit: UnitHandle) {
        self.dispatcher.enqueue(&mut self.table, unit, Queue::CgroupOom);
    }

    /// `add_default_target_dependency(u, target)` (§4.2): queued, not
    /// applied immediately, so a unit that flips `default_dependencies`
    /// off before the next drain is honored.
    pub fn add_default_target_dependency(&mut self, unit: UnitHandle, target: UnitHandle) {
        self.target_deps.request(&mut self.table, &mut self.dispatcher, unit, target);
    }

    /// `add_dependency(u, kind, other, add_reference, mask)` (§4.8):
    /// installs the edge (and its symmetric inverse) with `mask` applied to
    /// both the origin and destination provenance, and optionally a
    /// `UnitRef` back-edge.
    pub fn add_dependency(
        &mut self,
        unit: UnitHandle,
        kind: ue_core::DependencyKind,
        other: UnitHandle,
        add_reference: bool,
        mask: Provenance,
    ) -> Result<(), UnitError> {
        if !self.table.contains(unit) {
            return Err(UnitError::UnknownHandle(unit));
        }
        if !self.table.contains(other) {
            return Err(UnitError::UnknownHandle(other));
        }
        self.table.add_dependency(unit, kind, other, mask, mask);
        if add_reference {
            self.table.add_reference(unit, other);
        }
        Ok(())
    }

    /// `remove_dependencies(u, mask)` (§4.2): flush every edge `u` owns
    /// under `mask`'s provenance bits.
    pub fn remove_dependencies(&mut self, unit: UnitHandle, mask: Provenance) {
        self.table.remove_dependencies(unit, mask);
    }

    /// `set_property` (§4.8, §6): validates applicability and signals the
    /// bus that something changed. Interpreting the property itself
    /// (`bus_set_property` → `bus_commit_properties`) is per-type execution
    /// and out of scope (§1).
    pub fn set_property(&mut self, unit: UnitHandle, _key: &str, _value: &str) -> Result<(), UnitError> {
        let u = self.table.get(unit).ok_or(UnitError::UnknownHandle(unit))?;
        if u.load_state == LoadState::Masked {
            return Err(UnitError::Masked(u.id.clone()));
        }
        self.bus.properties_changed(unit);
        Ok(())
    }

    pub fn start(&mut self, unit: UnitHandle, mode: JobMode) -> Result<JobHandle, UnitError> {
        self.submit_job(unit, JobType::Start, mode, |u| u.flags.refuse_manual_start, UnitError::ManualStartRefused)
    }

    pub fn stop(&mut self, unit: UnitHandle, mode: JobMode) -> Result<JobHandle, UnitError> {
        self.submit_job(unit, JobType::Stop, mode, |u| u.flags.refuse_manual_stop, UnitError::ManualStartRefused)
    }

    pub fn reload(&mut self, unit: UnitHandle, mode: JobMode) -> Result<JobHandle, UnitError> {
        self.submit_job(unit, JobType::Reload, mode, |_| false, UnitError::ManualStartRefused)
    }

    pub fn kill(&mut self, unit: UnitHandle, mode: JobMode) -> Result<JobHandle, UnitError> {
        self.submit_job(unit, JobType::Kill, mode, |_| false, UnitError::ManualStartRefused)
    }

    pub fn try_restart(&mut self, unit: UnitHandle, mode: JobMode) -> Result<JobHandle, UnitError> {
        self.submit_job(unit, JobType::TryRestart, mode, |_| false, UnitError::ManualStartRefused)
    }

    /// `isolate(target)`: only permitted when `target.allow_isolate` is
    /// set. Stopping every unit not a (transitive) dependency of `target`
    /// is the job engine's concern — `JobMode::Isolate` is how the Unit
    /// Engine tells it that's what this `Start` job means.
    pub fn isolate(&mut self, target: UnitHandle) -> Result<JobHandle, UnitError> {
        let u = self.table.get(target).ok_or(UnitError::UnknownHandle(target))?;
        if !u.flags.allow_isolate {
            return Err(UnitError::IsolateRefused(u.id.clone()));
        }
        self.submit_job(target, JobType::Start, JobMode::Isolate, |_| false, UnitError::IsolateRefused)
    }

    /// Whether the per-type vtable reports anything to clean for `unit`.
    pub fn can_clean(&self, unit: UnitHandle) -> Result<bool, UnitError> {
        let u = self.table.get(unit).ok_or(UnitError::UnknownHandle(unit))?;
        let vtable = self.registry.get(u.unit_type);
        Ok((vtable.can_clean)(u))
    }

    pub fn clean(&mut self, unit: UnitHandle) -> Result<JobHandle, UnitError> {
        if !self.can_clean(unit)? {
            let name = self.table.get(unit).map(|u| u.id.clone()).unwrap_or_else(|| UnitName::literal("?"));
            return Err(UnitError::JobNotApplicable(name));
        }
        self.submit_job(unit, JobType::Clean, JobMode::Replace, |_| false, UnitError::ManualStartRefused)
    }

    fn submit_job(
        &mut self,
        unit: UnitHandle,
        job_type: JobType,
        mode: JobMode,
        refused: impl Fn(&Unit) -> bool,
        refused_err: impl Fn(UnitName) -> UnitError,
    ) -> Result<JobHandle, UnitError> {
        let u = self.table.get(unit).ok_or(UnitError::UnknownHandle(unit))?;
        if u.load_state == LoadState::Masked {
            return Err(UnitError::Masked(u.id.clone()));
        }
        if refused(u) {
            return Err(refused_err(u.id.clone()));
        }
        if !(self.registry.get(u.unit_type).supported)() {
            return Err(UnitError::JobNotApplicable(u.id.clone()));
        }
        let job = self.jobs.install(unit, job_type, mode)?;
        self.job_handles.insert(unit, job);
        if let Some(u) = self.table.get_mut(unit) {
            u.has_job = true;
        }
        Ok(job)
    }

    /// Apply a state transition, deciding `WILL_AUTO_RESTART` and running
    /// every resulting effect. The entry point per-type execution code
    /// calls once it has computed a unit's new `ActiveState`.
    pub fn notify(&mut self, unit: UnitHandle, old: ActiveState, new: ActiveState, flags: NotifyFlags) {
        let mut executor = Executor {
            jobs: self.jobs.as_mut(),
            bus: self.bus.as_mut(),
            triggers: self.triggers.as_mut(),
            emergency: self.emergency.as_mut(),
            job_handles: &mut self.job_handles,
        };
        crate::notifier::transition(&mut self.table, &self.registry, &self.clock, &mut self.dispatcher, &mut executor, unit, old, new, flags);
    }

    /// Drain every queue to a fixpoint (§4.5): the single call an
    /// embedder's event loop makes once per iteration.
    pub fn tick(&mut self) {
        self.gc_generation = self.gc_generation.wrapping_add(1);
        let Manager { table, dispatcher, registry, target_deps, cgroups, job_handles, jobs, bus, triggers, emergency, loader, cgroup_adapter, clock, gc_generation, .. } = self;
        dispatcher.drain_to_fixpoint(table, |dispatcher, table, queue, unit| match queue {
            Queue::Load => crate::load::drain_one(table, loader.as_mut(), unit),
            Queue::TargetDeps => target_deps.drain_one(table, unit),
            Queue::Gc => {
                crate::gc::run_sweep(table, dispatcher, registry, *gc_generation);
            }
            Queue::Cleanup => crate::gc::run_cleanup(table, unit),
            Queue::CgroupRealize => cgroups.realize(cgroup_adapter.as_mut(), unit),
            Queue::CgroupEmpty => {
                if cgroups.mark_empty(unit) {
                    if let Some(old) = active_state_of(table, registry, unit) {
                        if let Some(u) = table.get_mut(unit) {
                            u.sub_state = "dead".to_string();
                        }
                        let mut executor = Executor { jobs: jobs.as_mut(), bus: bus.as_mut(), triggers: triggers.as_mut(), emergency: emergency.as_mut(), job_handles };
                        crate::notifier::transition(table, registry, clock, dispatcher, &mut executor, unit, old, ActiveState::Inactive, NotifyFlags::empty());
                    }
                }
            }
            Queue::CgroupOom => {
                cgroups.invalidate(unit);
                if let Some(old) = active_state_of(table, registry, unit) {
                    if let Some(u) = table.get_mut(unit) {
                        u.sub_state = "failed".to_string();
                    }
                    let mut executor = Executor { jobs: jobs.as_mut(), bus: bus.as_mut(), triggers: triggers.as_mut(), emergency: emergency.as_mut(), job_handles };
                    crate::notifier::transition(table, registry, clock, dispatcher, &mut executor, unit, old, ActiveState::Failed, NotifyFlags::empty());
                }
            }
            Queue::StopWhenUnneeded => {
                if let Some(job) = crate::stop_when_unneeded::drain_one(table, registry, clock, jobs.as_mut(), unit) {
                    job_handles.insert(unit, job);
                }
            }
            Queue::DBus => bus.properties_changed(unit),
        });
    }

    /// Drain every queue once more, then bump the generation so any
    /// callback token issued before this point is now stale (§5).
    pub fn shutdown(&mut self) {
        self.tick();
        self.generation += 1;
    }
}

fn active_state_of(table: &UnitTable, registry: &VTableRegistry, unit: UnitHandle) -> Option<ActiveState> {
    let u = table.get(unit)?;
    let vtable = registry.get(u.unit_type);
    Some((vtable.active_state)(u))
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
