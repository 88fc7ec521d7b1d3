//! Access-control decisions for pod resources and delegated data grants.
//!
//! # Purpose
//! Decides whether a request may use a resource in the modes it asks for, and
//! computes the modes a client application holds through data grants issued
//! by an authorization agent.
//!
//! # How it fits
//! Hosts extract credentials, aggregate a [`PermissionSet`] (one source of
//! which is typically a [`DelegatedPermissionReader`]) and hand both to the
//! [`ModePermissionAuthorizer`]. Storage, registries and grant documents stay
//! outside this crate behind the [`ResourceSet`], [`RegistryLookup`] and
//! [`GrantResolver`] traits.
//!
//! # Key invariants
//! - Only the modes `read`, `write`, `append`, `create` and `delete` exist;
//!   other grant vocabulary is dropped.
//! - Decisions are fail-closed and keep the `Forbidden`/`Unauthorized`/`NotFound`
//!   distinction exact.
//! - Collaborator failures propagate as [`AuthzError::Resolution`]; they never
//!   read as "no permission".
//!
//! # Examples
//! ```rust
//! use podgate_authz::{AccessMode, AccessModes, Permission, PermissionSet};
//!
//! let set = PermissionSet::new().with(
//!     "client",
//!     Permission::from_modes(&AccessModes::from([AccessMode::Read])),
//! );
//! assert!(set.grants(AccessMode::Read));
//! ```
//!
//! # Common pitfalls
//! - Resource identifiers are compared as plain strings.
//! - A permission source that leaves a mode unset denies it.

mod authorizer;
mod config;
mod credentials;
mod errors;
mod grant;
mod mode;
pub mod observability;
mod permissions;
mod reader;
mod request;
mod resolver;
mod resources;
pub mod strategy;
mod types;

pub use authorizer::{AuthorizationContext, ModePermissionAuthorizer};
pub use config::{AuthzConfig, DEFAULT_GRANT_SOURCE, DEFAULT_LOG_FILTER};
pub use credentials::{Credential, CredentialSet};
pub use errors::{AuthzError, AuthzResult};
pub use grant::{
    AllFromRegistryDataGrant, DataGrant, DataInstance, InMemoryRegistry, IndividualDataGrant,
    RegistryLookup, SelectedFromRegistryDataGrant,
};
pub use mode::{AccessMode, AccessModes, recognized_modes};
pub use permissions::{Permission, PermissionSet};
pub use reader::DelegatedPermissionReader;
pub use request::{AccessRequest, TargetKind};
pub use resolver::{
    AuthorizationAgent, AuthorizationAgentFactory, GrantResolver, InMemoryGrantResolver,
    StaticAgentFactory,
};
pub use resources::{InMemoryResourceSet, ResourceSet};
pub use strategy::{DataGrantStrategy, DataInstanceStrategy};
pub use types::{ClientId, ResourceIdentifier, WebId};
