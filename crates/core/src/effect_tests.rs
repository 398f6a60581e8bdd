// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::unit::UnitHandle;

#[test]
fn name_covers_every_variant() {
    let unit = UnitHandle::new();
    let cases = [
        Effect::Enqueue { unit, queue: Queue::Gc },
        Effect::ResolveJob { unit, outcome: JobOutcome::Complete },
        Effect::TriggerNotify { unit, triggerer: UnitHandle::new() },
        Effect::RunEmergencyAction { unit, action: EmergencyAction::None, reboot_arg: None },
        Effect::EmitPropertiesChanged { unit },
        Effect::EmitUnitNew { unit },
        Effect::EmitUnitRemoved { unit },
        Effect::Log { unit, level: LogLevel::Info, message: "hi".to_string() },
    ];
    for effect in cases {
        assert!(!effect.name().is_empty());
    }
}

#[test]
fn name_is_stable_per_variant() {
    let unit = UnitHandle::new();
    assert_eq!(Effect::EmitUnitNew { unit }.name(), "emit_unit_new");
    assert_eq!(Effect::EmitUnitRemoved { unit }.name(), "emit_unit_removed");
}
