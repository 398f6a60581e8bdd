// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency kinds and their symmetric inverses.

use serde::{Deserialize, Serialize};

/// A typed relation between two units. Every kind has a well-defined inverse
/// that the graph maintains automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Requires,
    RequiredBy,
    Requisite,
    RequisiteOf,
    Wants,
    WantedBy,
    BindsTo,
    BoundBy,
    PartOf,
    ConsistsOf,
    Upholds,
    UpheldBy,
    Conflicts,
    ConflictedBy,
    Before,
    After,
    OnFailure,
    OnFailureOf,
    Triggers,
    TriggeredBy,
    PropagatesReloadTo,
    ReloadPropagatedFrom,
    JoinsNamespaceOf,
    References,
    ReferencedBy,
}

impl DependencyKind {
    /// The symmetric inverse kind. `JoinsNamespaceOf` has no
    /// declared inverse in the kind list; it maps to itself, which
    /// makes `add_dependency` idempotent for it without creating a second
    /// tracked relation.
    pub const fn inverse(self) -> DependencyKind {
        use DependencyKind::*;
        match self {
            Requires => RequiredBy,
            RequiredBy => Requires,
            Requisite => RequisiteOf,
            RequisiteOf => Requisite,
            Wants => WantedBy,
            WantedBy => Wants,
            BindsTo => BoundBy,
            BoundBy => BindsTo,
            PartOf => ConsistsOf,
            ConsistsOf => PartOf,
            Upholds => UpheldBy,
            UpheldBy => Upholds,
            Conflicts => ConflictedBy,
            ConflictedBy => Conflicts,
            Before => After,
            After => Before,
            OnFailure => OnFailureOf,
            OnFailureOf => OnFailure,
            Triggers => TriggeredBy,
            TriggeredBy => Triggers,
            PropagatesReloadTo => ReloadPropagatedFrom,
            ReloadPropagatedFrom => PropagatesReloadTo,
            JoinsNamespaceOf => JoinsNamespaceOf,
            References => ReferencedBy,
            ReferencedBy => References,
        }
    }

    /// Whether this kind is a "strong" dependency the GC traces reachability
    /// along: `Requires`, `BindsTo`, `PartOf`, `References`, and
    /// inbound `TriggeredBy`.
    pub const fn is_strong(self) -> bool {
        matches!(
            self,
            DependencyKind::Requires
                | DependencyKind::BindsTo
                | DependencyKind::PartOf
                | DependencyKind::References
                | DependencyKind::TriggeredBy
        )
    }

    /// The kinds `is_strong` accepts, as a fixed array for iteration.
    pub const STRONG: [DependencyKind; 5] = [
        DependencyKind::Requires,
        DependencyKind::BindsTo,
        DependencyKind::PartOf,
        DependencyKind::References,
        DependencyKind::TriggeredBy,
    ];
}

#[cfg(test)]
#[path = "dep_kind_tests.rs"]
mod tests;
