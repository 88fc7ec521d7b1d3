//! Per-source permission maps.
//!
//! # Purpose
//! Carries what each credential source grants, as produced by upstream
//! permission readers, to the authorizer.
//!
//! # Key invariants
//! - A mode with no explicit value is not granted (fail-closed).
//! - The authorizer only reads a [`PermissionSet`]; it never mutates one.
use crate::{AccessMode, AccessModes};
use std::collections::{BTreeMap, HashMap};

/// Mode to allow/deny map for one credential source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permission {
    modes: HashMap<AccessMode, bool>,
}

impl Permission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Permission granting exactly `modes`; every other mode stays unset.
    pub fn from_modes(modes: &AccessModes) -> Self {
        Self {
            modes: modes.iter().map(|mode| (*mode, true)).collect(),
        }
    }

    pub fn set(&mut self, mode: AccessMode, allowed: bool) -> &mut Self {
        self.modes.insert(mode, allowed);
        self
    }

    pub fn get(&self, mode: AccessMode) -> Option<bool> {
        self.modes.get(&mode).copied()
    }

    pub fn allows(&self, mode: AccessMode) -> bool {
        self.get(mode).unwrap_or(false)
    }
}

/// Permissions keyed by the name of the credential source that produced them.
///
/// # Example
/// ```rust
/// use podgate_authz::{AccessMode, AccessModes, Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.insert("public", Permission::from_modes(&AccessModes::from([AccessMode::Read])));
/// assert!(set.grants(AccessMode::Read));
/// assert!(!set.grants(AccessMode::Write));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    sources: BTreeMap<String, Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        source: impl Into<String>,
        permission: Permission,
    ) -> Option<Permission> {
        self.sources.insert(source.into(), permission)
    }

    pub fn with(mut self, source: impl Into<String>, permission: Permission) -> Self {
        self.insert(source, permission);
        self
    }

    pub fn get(&self, source: &str) -> Option<&Permission> {
        self.sources.get(source)
    }

    pub fn sources(&self) -> impl Iterator<Item = (&str, &Permission)> {
        self.sources
            .iter()
            .map(|(name, permission)| (name.as_str(), permission))
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// True if at least one source explicitly allows `mode`.
    pub fn grants(&self, mode: AccessMode) -> bool {
        self.sources.values().any(|permission| permission.allows(mode))
    }

    /// Merge `other` into `self`; sources present in both are replaced.
    pub fn extend(&mut self, other: PermissionSet) {
        self.sources.extend(other.sources);
    }
}
