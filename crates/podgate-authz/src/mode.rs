//! Access mode vocabulary.
//!
//! # Purpose
//! Defines the closed set of operations a request can ask for on a resource.
//!
//! # Key invariants
//! - Only `read`, `write`, `append`, `create` and `delete` exist.
//! - Grant documents may carry a superset of mode IRIs; anything outside the
//!   vocabulary parses to nothing and is dropped by [`recognized_modes`].
//!
//! # Examples
//! ```rust
//! use podgate_authz::{AccessMode, recognized_modes};
//!
//! let modes = recognized_modes(["read", "http://www.w3.org/ns/auth/acl#Update"]);
//! assert_eq!(modes.len(), 1);
//! assert!(modes.contains(&AccessMode::Read));
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ACL_NAMESPACE: &str = "http://www.w3.org/ns/auth/acl#";

/// Set of access modes, ordered so that logs and error payloads are stable.
pub type AccessModes = BTreeSet<AccessMode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    Read,
    Write,
    Append,
    Create,
    Delete,
}

impl AccessMode {
    pub const ALL: [AccessMode; 5] = [
        AccessMode::Read,
        AccessMode::Write,
        AccessMode::Append,
        AccessMode::Create,
        AccessMode::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::Write => "write",
            AccessMode::Append => "append",
            AccessMode::Create => "create",
            AccessMode::Delete => "delete",
        }
    }

    /// The ACL vocabulary IRI for this mode.
    pub fn iri(self) -> &'static str {
        match self {
            AccessMode::Read => "http://www.w3.org/ns/auth/acl#Read",
            AccessMode::Write => "http://www.w3.org/ns/auth/acl#Write",
            AccessMode::Append => "http://www.w3.org/ns/auth/acl#Append",
            AccessMode::Create => "http://www.w3.org/ns/auth/acl#Create",
            AccessMode::Delete => "http://www.w3.org/ns/auth/acl#Delete",
        }
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccessMode {
    type Err = ();

    /// Accepts both the short name and the ACL IRI.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.strip_prefix(ACL_NAMESPACE).unwrap_or(value);
        match name {
            "read" | "Read" => Ok(AccessMode::Read),
            "write" | "Write" => Ok(AccessMode::Write),
            "append" | "Append" => Ok(AccessMode::Append),
            "create" | "Create" => Ok(AccessMode::Create),
            "delete" | "Delete" => Ok(AccessMode::Delete),
            _ => Err(()),
        }
    }
}

/// Keep only values that name a recognized access mode.
pub fn recognized_modes<I, S>(values: I) -> AccessModes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|value| value.as_ref().parse().ok())
        .collect()
}

/// Render a mode set as `read,write` for log lines.
pub fn join_modes(modes: &AccessModes) -> String {
    modes
        .iter()
        .map(|mode| mode.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_string_roundtrip() {
        for mode in AccessMode::ALL {
            let as_str = mode.as_str();
            assert_eq!(as_str.parse::<AccessMode>().ok(), Some(mode));
            assert_eq!(mode.iri().parse::<AccessMode>().ok(), Some(mode));
            assert_eq!(mode.to_string(), as_str);
        }
    }

    #[test]
    fn mode_from_str_rejects_foreign_vocabulary() {
        assert!("http://www.w3.org/ns/auth/acl#Update".parse::<AccessMode>().is_err());
        assert!("http://www.w3.org/ns/auth/acl#Control".parse::<AccessMode>().is_err());
        assert!("http://example.org/vocab#Read".parse::<AccessMode>().is_err());
        assert!("".parse::<AccessMode>().is_err());
    }

    #[test]
    fn recognized_modes_drops_unknown_values() {
        let modes = recognized_modes([
            "http://www.w3.org/ns/auth/acl#Read",
            "write",
            "http://www.w3.org/ns/auth/acl#Update",
        ]);
        assert_eq!(
            modes,
            AccessModes::from([AccessMode::Read, AccessMode::Write])
        );
    }

    #[test]
    fn join_modes_is_ordered() {
        let modes = AccessModes::from([AccessMode::Delete, AccessMode::Read]);
        assert_eq!(join_modes(&modes), "read,delete");
    }
}
