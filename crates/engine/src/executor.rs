// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interprets the [`Effect`]s [`ue_core::notify::notify`] and the graph
//! operations hand back (§4.4, §4.9) — the only place in the crate that
//! turns a pure description of "what must happen" into calls against the
//! job engine, the bus, the trigger/emergency-action collaborators, and
//! `tracing`. Mirrors the teacher's `Executor<S, A, N, C>` shape
//! (`oj-engine/executor.rs`): one generic struct parameterized over each
//! adapter trait, a single `execute` entry point, before/after `tracing`
//! spans around the dispatch.

use crate::adapters::{BusAdapter, EmergencyActionAdapter, TriggerAdapter};
use crate::dispatcher::Dispatcher;
use crate::job::{JobEngine, JobResult};
use std::collections::HashMap;
use ue_core::{Effect, JobOutcome, LogLevel, UnitHandle};

/// Executes effects against the configured adapters. `job_handles` is the
/// engine's own side table from unit to its currently installed job handle
/// — `ue_core::Unit` only tracks `has_job: bool`; the job engine's opaque
/// handle has to live somewhere, and this is that somewhere.
pub struct Executor<'a, J, B, T, E>
where
    J: JobEngine + ?Sized,
    B: BusAdapter + ?Sized,
    T: TriggerAdapter + ?Sized,
    E: EmergencyActionAdapter + ?Sized,
{
    pub jobs: &'a mut J,
    pub bus: &'a mut B,
    pub triggers: &'a mut T,
    pub emergency: &'a mut E,
    pub job_handles: &'a mut HashMap<UnitHandle, crate::job::JobHandle>,
}

impl<'a, J, B, T, E> Executor<'a, J, B, T, E>
where
    J: JobEngine + ?Sized,
    B: BusAdapter + ?Sized,
    T: TriggerAdapter + ?Sized,
    E: EmergencyActionAdapter + ?Sized,
{
    /// Run every effect in order. Effects never fail: by the time they
    /// reach here the state-machine transition they describe has already
    /// committed, so an adapter that can't carry its half out just logs
    /// and moves on (mirrors the "runtime failures drive the state
    /// machine, not the call result" policy in §7).
    pub fn run(&mut self, dispatcher: &mut Dispatcher, effects: Vec<Effect>) {
        for effect in effects {
            self.execute_one(dispatcher, effect);
        }
    }

    fn execute_one(&mut self, dispatcher: &mut Dispatcher, effect: Effect) {
        match effect {
            Effect::Enqueue { unit, queue } => {
                // `notify` already flipped the unit's queue-membership
                // flag as part of producing this effect; link the FIFO
                // directly rather than through `Dispatcher::enqueue`,
                // which would see the flag set and silently skip it.
                dispatcher.link_existing(unit, queue);
            }
            Effect::ResolveJob { unit, outcome } => {
                if let Some(job) = self.job_handles.remove(&unit) {
                    match outcome {
                        JobOutcome::Complete => self.jobs.complete(job),
                        JobOutcome::Fail => self.jobs.fail(job, JobResult::Failed),
                    }
                }
            }
            Effect::TriggerNotify { unit, triggerer } => {
                self.triggers.notify_triggerer(unit, triggerer);
            }
            Effect::RunEmergencyAction { unit, action, reboot_arg } => {
                tracing::warn!(unit = %unit, ?action, "running emergency action");
                self.emergency.run(unit, action, reboot_arg);
            }
            Effect::EmitPropertiesChanged { unit } => self.bus.properties_changed(unit),
            Effect::EmitUnitNew { unit } => self.bus.unit_new(unit),
            Effect::EmitUnitRemoved { unit } => self.bus.unit_removed(unit),
            Effect::Log { unit, level, message } => log_effect(unit, level, &message),
        }
    }
}

fn log_effect(unit: UnitHandle, level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(unit = %unit, "{message}"),
        LogLevel::Info => tracing::info!(unit = %unit, "{message}"),
        LogLevel::Warn => tracing::warn!(unit = %unit, "{message}"),
        LogLevel::Error => tracing::error!(unit = %unit, "{message}"),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
