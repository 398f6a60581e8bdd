// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit names, validation, and the manager-wide name index.
//!
//! A [`UnitName`] is a user-chosen string such as `"nginx.service"`. It is
//! distinct from a unit's internal [`crate::unit::UnitHandle`]: the handle is
//! the stable arena key an embedder holds onto across renames and merges,
//! while the name is what config files, CLI commands, and dependency
//! declarations spell out.

use crate::error::UnitError;
use crate::unit::UnitHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A validated unit name, e.g. `"nginx.service"` or `"multi-user.target"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitName(String);

impl UnitName {
    /// Parse and validate a unit name.
    ///
    /// Rejects the empty string, names containing `/` or NUL, and names
    /// longer than 255 bytes (mirrors common unit-file name limits).
    pub fn parse(s: impl Into<String>) -> Result<Self, UnitError> {
        let s = s.into();
        if s.is_empty() || s.len() > 255 || s.contains(['/', '\0']) || s == "." || s == ".." {
            return Err(UnitError::InvalidName(s));
        }
        Ok(Self(s))
    }

    /// Build a name from a literal known to be valid, skipping validation.
    /// For test builders and constant defaults only.
    #[cfg(any(test, feature = "test-support"))]
    pub fn literal(s: &'static str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The suffix after the last `.`, e.g. `"service"` for `"nginx.service"`.
    pub fn suffix(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, suf)| suf)
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for UnitName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Manager-wide name → unit lookup table.
///
/// Invariant: every name in `names` maps to exactly one unit; the
/// id is one of the names. `NameIndex` is the sole owner of that mapping so
/// merges can rewrite it atomically.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<UnitName, UnitHandle>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &UnitName) -> Option<UnitHandle> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &UnitName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Claim `name` for `handle`. Fails if another unit already owns it.
    pub fn add(&mut self, name: UnitName, handle: UnitHandle) -> Result<(), UnitError> {
        match self.by_name.get(&name) {
            Some(owner) if *owner != handle => Err(UnitError::NameConflict(name)),
            _ => {
                self.by_name.insert(name, handle);
                Ok(())
            }
        }
    }

    /// Remove a single name (used when rewriting a merged unit's names onto
    /// the survivor; the merged unit itself retains no names afterwards).
    pub fn remove(&mut self, name: &UnitName) {
        self.by_name.remove(name);
    }

    /// Repoint every name currently owned by `from` to `to` (merge rewrite).
    pub fn repoint_all(&mut self, from: UnitHandle, to: UnitHandle) {
        for owner in self.by_name.values_mut() {
            if *owner == from {
                *owner = to;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
