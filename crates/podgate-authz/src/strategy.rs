//! Strategies that turn delegated data grants into access modes.
//!
//! # Purpose
//! Computes what a client application may do on a target by looking at the
//! data grants an authorization agent has issued to it.
//!
//! # How it fits
//! The result of a strategy is one source in the [`PermissionSet`](crate::PermissionSet)
//! handed to the authorizer; see [`DelegatedPermissionReader`](crate::DelegatedPermissionReader).
//!
//! # Key invariants
//! - No grants (or no registration at all) means an empty mode set, not an error.
//! - Resolver and registry failures propagate unchanged.
pub mod grant;
pub mod instance;

pub use grant::DataGrantStrategy;
pub use instance::DataInstanceStrategy;
