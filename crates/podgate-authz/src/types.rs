//! Strongly typed identifiers used by authorization decisions.
//!
//! # Purpose
//! Wraps resource, client and agent identifiers so that a client IRI cannot be
//! passed where a resource path is expected.
//!
//! # Key invariants
//! - Equality is plain string equality; no IRI normalization happens here.
//! - Display and `as_str` return the original value.
//!
//! # Common pitfalls
//! - Comparing `https://pod.example/a` with `https://pod.example/a/` fails;
//!   hosts must hand over identifiers in one canonical form.
use serde::{Deserialize, Serialize};

/// Identifier of a target resource (path or IRI).
///
/// # Example
/// ```rust
/// use podgate_authz::ResourceIdentifier;
///
/// let id = ResourceIdentifier::new("https://pod.example.org/alice/notes/1");
/// assert_eq!(id.path(), "https://pod.example.org/alice/notes/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The raw path of the resource.
    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a client application acting on behalf of an agent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// WebID of an agent.
///
/// # Invariants
/// - An empty WebID never counts as an identity; see
///   [`Credential::web_id`](crate::Credential::web_id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WebId(String);

impl WebId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for WebId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
