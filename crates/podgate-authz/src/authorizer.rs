//! Mode-permission authorizer.
//!
//! # Purpose
//! Decides whether every requested mode is granted by at least one credential
//! source, and picks the denial shape when one is not.
//!
//! # Key invariants
//! - Fail-closed: a mode nobody sets explicitly is denied.
//! - Denials are `Forbidden` for authenticated requesters and `Unauthorized`
//!   (with the full requested mode set and path) for anonymous ones.
//! - A requester allowed to read learns only that the target is absent: if the
//!   target does not exist and `create` is not requested, any denial becomes
//!   `NotFound`. `append` is deliberately not exempted the way `create` is.
//! - Checks never mutate state.
//!
//! # Examples
//! ```rust
//! # async fn demo() -> podgate_authz::AuthzResult<()> {
//! use podgate_authz::{
//!     AccessMode, AccessModes, AuthorizationContext, CredentialSet, InMemoryResourceSet,
//!     ModePermissionAuthorizer, Permission, PermissionSet, ResourceIdentifier,
//! };
//! use std::sync::Arc;
//!
//! let authorizer = ModePermissionAuthorizer::new(Arc::new(InMemoryResourceSet::new()));
//! let context = AuthorizationContext::new(
//!     CredentialSet::default(),
//!     ResourceIdentifier::new("https://pod.example.org/public"),
//!     AccessModes::from([AccessMode::Read]),
//!     PermissionSet::new().with(
//!         "public",
//!         Permission::from_modes(&AccessModes::from([AccessMode::Read])),
//!     ),
//! );
//! authorizer.authorize(&context).await?;
//! # Ok(())
//! # }
//! ```
use crate::mode::join_modes;
use crate::{
    AccessMode, AccessModes, AuthzError, AuthzResult, CredentialSet, PermissionSet,
    ResourceIdentifier, ResourceSet,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything the authorizer needs to decide one request.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    /// Credentials of the entity that wants to use the resource.
    pub credentials: CredentialSet,
    /// Resource that will be read or modified.
    pub identifier: ResourceIdentifier,
    /// Modes requested on the resource.
    pub modes: AccessModes,
    /// Permissions available for the request.
    pub permission_set: PermissionSet,
}

impl AuthorizationContext {
    pub fn new(
        credentials: CredentialSet,
        identifier: ResourceIdentifier,
        modes: AccessModes,
        permission_set: PermissionSet,
    ) -> Self {
        Self {
            credentials,
            identifier,
            modes,
            permission_set,
        }
    }
}

pub struct ModePermissionAuthorizer {
    resources: Arc<dyn ResourceSet>,
}

impl ModePermissionAuthorizer {
    /// Create an authorizer that consults `resources` for target existence.
    pub fn new(resources: Arc<dyn ResourceSet>) -> Self {
        Self { resources }
    }

    /// Succeed only if every requested mode is granted.
    ///
    /// # Errors
    /// - [`AuthzError::NotFound`] when the requester may read, is not creating,
    ///   and the target does not exist.
    /// - [`AuthzError::Forbidden`] for an authenticated requester.
    /// - [`AuthzError::Unauthorized`] for an anonymous requester.
    /// - [`AuthzError::Resolution`] if the existence check fails.
    pub async fn authorize(&self, context: &AuthorizationContext) -> AuthzResult<()> {
        let identity = identity_label(&context.credentials);
        let modes = join_modes(&context.modes);
        debug!(
            agent = %identity,
            modes = %modes,
            path = %context.identifier,
            "checking permissions"
        );

        for mode in &context.modes {
            if let Err(denial) = require_mode(context, *mode) {
                // The requester may learn whether the target exists, and the
                // request cannot succeed on an absent target anyway.
                let expose_existence = context.permission_set.grants(AccessMode::Read);
                if expose_existence
                    && !context.modes.contains(&AccessMode::Create)
                    && !self.resources.has_resource(&context.identifier).await?
                {
                    debug!(path = %context.identifier, "target absent; reporting not found");
                    return Err(AuthzError::NotFound);
                }
                return Err(denial);
            }
        }

        debug!(
            agent = %identity,
            modes = %modes,
            path = %context.identifier,
            "permissions granted"
        );
        Ok(())
    }
}

fn require_mode(context: &AuthorizationContext, mode: AccessMode) -> AuthzResult<()> {
    if context.permission_set.grants(mode) {
        return Ok(());
    }
    if context.credentials.is_authenticated() {
        warn!(
            agent = %identity_label(&context.credentials),
            mode = %mode,
            "agent has no permission for mode"
        );
        Err(AuthzError::Forbidden)
    } else {
        warn!(mode = %mode, "unauthenticated agent has no permission for mode");
        Err(AuthzError::Unauthorized {
            modes: context.modes.clone(),
            path: context.identifier.path().to_string(),
        })
    }
}

fn identity_label(credentials: &CredentialSet) -> String {
    credentials
        .display_identity()
        .map(ToString::to_string)
        .unwrap_or_else(|| "anonymous".to_string())
}
