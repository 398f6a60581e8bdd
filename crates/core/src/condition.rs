// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cached condition/assert evaluation results.

use serde::{Deserialize, Serialize};

/// Result of evaluating a unit's `conditions` or `asserts` list.
///
/// Distinct from a plain `bool` so the notifier can tell "never evaluated"
/// (a fresh unit) apart from "evaluated and failed" — needed for the
/// `SKIP_CONDITION` notifier flag, which should not fire for a
/// unit that failed for an unrelated reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckResult {
    #[default]
    Unevaluated,
    Passed,
    /// Evaluation failed; `negated` records whether the failing entry was a
    /// negated condition (`ConditionPathExists=!...`), which callers use to
    /// phrase log messages without re-deriving it from config.
    Failed { negated: bool },
}

impl CheckResult {
    pub fn is_failed(self) -> bool {
        matches!(self, CheckResult::Failed { .. })
    }

    pub fn is_passed(self) -> bool {
        matches!(self, CheckResult::Passed)
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
