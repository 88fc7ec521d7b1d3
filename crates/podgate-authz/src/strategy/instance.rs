use crate::mode::join_modes;
use crate::{
    AccessModes, AccessRequest, AuthorizationAgent, AuthzResult, ClientId, GrantResolver,
};
use std::sync::Arc;
use tracing::debug;

/// Modes a client holds on one data instance through its data grants.
///
/// Modes are unioned across every grant covering the target, limited to the
/// recognized vocabulary, then limited to the modes the request asks for.
pub struct DataInstanceStrategy {
    resolver: Arc<dyn GrantResolver>,
}

impl DataInstanceStrategy {
    pub fn new(resolver: Arc<dyn GrantResolver>) -> Self {
        Self { resolver }
    }

    pub async fn authorize(
        &self,
        agent: &AuthorizationAgent,
        request: &AccessRequest,
        client: &ClientId,
    ) -> AuthzResult<AccessModes> {
        let Some(grants) = self.resolver.resolve(agent, client).await? else {
            debug!(client = %client, "client has no registration with authorization agent");
            return Ok(AccessModes::new());
        };

        let mut granted = AccessModes::new();
        for grant in &grants {
            let modes = grant.modes_for(&request.target).await?;
            if !modes.is_empty() {
                debug!(
                    grant = %grant.iri(),
                    scope = grant.scope(),
                    modes = %join_modes(&modes),
                    "data grant covers target"
                );
            }
            granted.extend(modes);
        }

        let allowed: AccessModes = granted.intersection(&request.modes).copied().collect();
        debug!(
            client = %client,
            resource = %request.target,
            grants = grants.len(),
            modes = %join_modes(&allowed),
            "resolved data instance permissions"
        );
        Ok(allowed)
    }
}
