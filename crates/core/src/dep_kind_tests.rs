// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn inverse_is_involutive() {
    use DependencyKind::*;
    let all = [
        Requires, RequiredBy, Requisite, RequisiteOf, Wants, WantedBy, BindsTo, BoundBy, PartOf,
        ConsistsOf, Upholds, UpheldBy, Conflicts, ConflictedBy, Before, After, OnFailure,
        OnFailureOf, Triggers, TriggeredBy, PropagatesReloadTo, ReloadPropagatedFrom,
        JoinsNamespaceOf, References, ReferencedBy,
    ];
    for kind in all {
        assert_eq!(kind.inverse().inverse(), kind, "inverse not involutive for {kind:?}");
    }
}

#[test]
fn inverse_pairs_are_distinct_except_joins_namespace_of() {
    use DependencyKind::*;
    for kind in [Requires, Wants, BindsTo, PartOf, Upholds, Conflicts, Before, OnFailure, Triggers, PropagatesReloadTo, References] {
        assert_ne!(kind, kind.inverse());
    }
    assert_eq!(JoinsNamespaceOf.inverse(), JoinsNamespaceOf);
}

#[test]
fn strong_array_matches_is_strong() {
    for kind in DependencyKind::STRONG {
        assert!(kind.is_strong(), "{kind:?} in STRONG but is_strong() false");
    }
    assert_eq!(DependencyKind::STRONG.len(), 5);
}

#[test]
fn weak_kinds_are_not_strong() {
    assert!(!DependencyKind::Wants.is_strong());
    assert!(!DependencyKind::Before.is_strong());
    assert!(!DependencyKind::Conflicts.is_strong());
}
