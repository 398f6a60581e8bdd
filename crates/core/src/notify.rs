// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The core state-machine transition function.
//!
//! `notify` is the single place a unit's `ActiveState` actually changes. It
//! is a pure function over [`UnitTable`]: every side effect it decides on —
//! completing a job, telling triggerers, running an emergency action,
//! logging — comes back as an [`Effect`] for the engine's executor to carry
//! out. Nothing here performs I/O, spawns anything, or touches a clock
//! except to read it.

use crate::clock::Clock;
use crate::dep_kind::DependencyKind;
use crate::effect::{Effect, JobOutcome, LogLevel};
use crate::queue::Queue;
use crate::state::{ActiveState, NotifyFlags};
use crate::table::UnitTable;
use crate::timestamp::DualTimestamp;
use crate::unit::UnitHandle;

/// Apply a transition from `old` to `new` on `unit`, stamping timestamps,
/// minting a fresh invocation id on activation, resolving the installed
/// job, and queuing whatever side effects the transition implies.
///
/// Returns the effects the caller (the engine's executor) must perform.
/// `unit`'s stored `ActiveState` is not tracked directly on [`crate::unit::Unit`] —
/// callers derive it from `sub_state` via
/// [`crate::vtable::UnitVTable::active_state`] — so `notify` only updates
/// the fields `Unit` does own: timestamps, `invocation_id`, `has_job`,
/// `start_limit`, and queue membership.
pub fn notify(
    table: &mut UnitTable,
    clock: &impl Clock,
    unit: UnitHandle,
    old: ActiveState,
    new: ActiveState,
    flags: NotifyFlags,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    let now = DualTimestamp::now(clock);

    let Some(u) = table.get_mut(unit) else { return effects };

    // A start-limit trip downgrades this transition to `Failed` regardless
    // of what the caller asked for: the unit never actually reaches
    // `Activating`, so every timestamp/job/trigger effect below must see
    // the failure, not the attempt.
    let mut new = new;

    // A reload that fails is a soft failure: the unit falls back to
    // whatever it was doing before the reload rather than going `Failed`.
    // The job still resolves as a failure; only the active state is downgraded.
    let reload_failure_downgraded =
        flags.contains(NotifyFlags::RELOAD_FAILURE) && new == ActiveState::Failed && old == ActiveState::Reloading;
    if reload_failure_downgraded {
        new = ActiveState::Active;
    }

    let mut start_limit_tripped = false;
    if new == ActiveState::Activating && old != ActiveState::Activating && !u.start_limit.try_consume(clock) {
        start_limit_tripped = true;
        new = ActiveState::Failed;
        effects.push(Effect::Log {
            unit,
            level: LogLevel::Warn,
            message: "start request rejected: start-limit exhausted".to_string(),
        });
    }

    u.timestamps.state_change = now;

    if !old.is_active_or_activating() && new.is_active_or_activating() {
        u.timestamps.inactive_exit = now;
    }
    if old.is_active_or_activating() && !new.is_active_or_activating() {
        u.timestamps.active_exit = now;
    }
    if new == ActiveState::Active && old != ActiveState::Active && !reload_failure_downgraded {
        u.timestamps.active_enter = now;
        u.invocation_id = Some(uuid::Uuid::new_v4().as_u128());
    }
    if new == ActiveState::Inactive || new == ActiveState::Failed {
        u.timestamps.inactive_enter = now;
    }
    if flags.contains(NotifyFlags::SKIP_CONDITION) {
        u.timestamps.condition = now;
        u.timestamps.assert = now;
    }

    if start_limit_tripped {
        let action = u.start_limit_action;
        effects.push(Effect::ResolveJob { unit, outcome: JobOutcome::Fail });
        u.has_job = false;
        if action != crate::unit::EmergencyAction::None {
            effects.push(Effect::RunEmergencyAction { unit, action, reboot_arg: u.reboot_arg.clone() });
        }
    } else if reload_failure_downgraded {
        if u.has_job {
            effects.push(Effect::ResolveJob { unit, outcome: JobOutcome::Fail });
            u.has_job = false;
        }
    } else if u.has_job && is_terminal(new) {
        let outcome = if new == ActiveState::Failed { JobOutcome::Fail } else { JobOutcome::Complete };
        effects.push(Effect::ResolveJob { unit, outcome });
        u.has_job = false;
    }

    if new == ActiveState::Failed && !flags.contains(NotifyFlags::WILL_AUTO_RESTART) {
        if u.failure_action != crate::unit::EmergencyAction::None {
            effects.push(Effect::RunEmergencyAction {
                unit,
                action: u.failure_action,
                reboot_arg: u.reboot_arg.clone(),
            });
        }
    } else if new == ActiveState::Inactive && old == ActiveState::Deactivating {
        if u.success_action != crate::unit::EmergencyAction::None {
            effects.push(Effect::RunEmergencyAction {
                unit,
                action: u.success_action,
                reboot_arg: u.reboot_arg.clone(),
            });
        }
    }

    for (&triggerer, _mask) in table.get(unit).into_iter().flat_map(|u| u.dependents(DependencyKind::TriggeredBy)) {
        effects.push(Effect::TriggerNotify { unit, triggerer });
    }

    if old.is_active_or_activating() && !new.is_active_or_activating() {
        enqueue(table, unit, Queue::StopWhenUnneeded, &mut effects);
    }

    enqueue(table, unit, Queue::DBus, &mut effects);
    effects.push(Effect::EmitPropertiesChanged { unit });

    effects
}

fn is_terminal(state: ActiveState) -> bool {
    matches!(state, ActiveState::Active | ActiveState::Inactive | ActiveState::Failed)
}

fn enqueue(table: &mut UnitTable, unit: UnitHandle, queue: Queue, effects: &mut Vec<Effect>) {
    if let Some(u) = table.get_mut(unit) {
        if !u.queues.is_queued_on(queue) {
            u.queues.mark_queued(queue);
            effects.push(Effect::Enqueue { unit, queue });
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
