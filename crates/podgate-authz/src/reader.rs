//! Permission reader for delegated client access.
//!
//! # Purpose
//! Bridges the grant strategies and the authorizer: runs the strategy that
//! fits the target and records its result as one source of a
//! [`PermissionSet`].
//!
//! # Key invariants
//! - Requests without a client id contribute nothing.
//! - The recorded [`Permission`] sets returned modes to `true` and leaves
//!   every other mode unset.
use crate::{
    AccessRequest, AuthorizationAgentFactory, AuthzResult, CredentialSet, DataGrantStrategy,
    DataInstanceStrategy, GrantResolver, Permission, PermissionSet, TargetKind,
};
use std::sync::Arc;
use tracing::debug;

pub struct DelegatedPermissionReader {
    source: String,
    agents: Arc<dyn AuthorizationAgentFactory>,
    instances: DataInstanceStrategy,
    grants: DataGrantStrategy,
}

impl DelegatedPermissionReader {
    /// Build a reader that records its results under `source`.
    pub fn new(
        source: impl Into<String>,
        agents: Arc<dyn AuthorizationAgentFactory>,
        resolver: Arc<dyn GrantResolver>,
    ) -> Self {
        Self {
            source: source.into(),
            instances: DataInstanceStrategy::new(resolver.clone()),
            grants: DataGrantStrategy::new(agents.clone(), resolver),
            agents,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub async fn read(
        &self,
        credentials: &CredentialSet,
        request: &AccessRequest,
    ) -> AuthzResult<PermissionSet> {
        let Some(client) = credentials.client_id() else {
            debug!(resource = %request.target, "no client in credentials; skipping grant lookup");
            return Ok(PermissionSet::new());
        };

        let modes = match request.target_kind {
            TargetKind::DataGrant => self.grants.authorize(request, client).await?,
            TargetKind::DataInstance => {
                let agent = self.agents.authorization_agent(request).await?;
                self.instances.authorize(&agent, request, client).await?
            }
        };
        Ok(PermissionSet::new().with(self.source.clone(), Permission::from_modes(&modes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccessMode, AccessModes, AuthorizationAgent, ClientId, Credential, DataGrant,
        DataInstance, InMemoryGrantResolver, IndividualDataGrant, ResourceIdentifier,
        StaticAgentFactory, WebId,
    };

    const RESOURCE: &str = "https://pod.example.org/alice/notes/1";
    const GRANT: &str = "https://aa.example.org/alice/grants/1";
    const APP: &str = "https://app.example.org/id";

    fn agent() -> AuthorizationAgent {
        AuthorizationAgent::new(
            "https://aa.example.org/alice",
            WebId::new("https://alice.example.org/profile#me"),
        )
    }

    async fn reader() -> DelegatedPermissionReader {
        let resolver = InMemoryGrantResolver::new();
        resolver
            .add_grant(
                &agent(),
                DataGrant::Individual(IndividualDataGrant {
                    iri: ResourceIdentifier::new(GRANT),
                    grantee: ClientId::new(APP),
                    access_mode: vec!["read".to_string(), "write".to_string()],
                    instances: vec![DataInstance::new(RESOURCE, ["read", "write"])],
                }),
            )
            .await;
        DelegatedPermissionReader::new(
            "client",
            Arc::new(StaticAgentFactory::new(agent())),
            Arc::new(resolver),
        )
    }

    fn app_credentials() -> CredentialSet {
        CredentialSet::agent(
            Credential::agent("https://bob.example.org/profile#me").with_client(APP),
        )
    }

    #[tokio::test]
    async fn records_instance_modes_under_source() {
        let request = AccessRequest::new(
            RESOURCE,
            AccessModes::from([AccessMode::Read, AccessMode::Write]),
        );
        let set = reader()
            .await
            .read(&app_credentials(), &request)
            .await
            .expect("read");
        let permission = set.get("client").expect("client source");
        assert!(permission.allows(AccessMode::Read));
        assert!(permission.allows(AccessMode::Write));
        assert_eq!(permission.get(AccessMode::Delete), None);
    }

    #[tokio::test]
    async fn grant_targets_use_grant_strategy() {
        let request = AccessRequest::for_grant(GRANT, AccessModes::from([AccessMode::Read]));
        let set = reader()
            .await
            .read(&app_credentials(), &request)
            .await
            .expect("read");
        assert!(set.grants(AccessMode::Read));
        assert!(!set.grants(AccessMode::Write));
    }

    #[tokio::test]
    async fn credentials_without_client_contribute_nothing() {
        let request = AccessRequest::new(RESOURCE, AccessModes::from([AccessMode::Read]));
        let credentials =
            CredentialSet::agent(Credential::agent("https://bob.example.org/profile#me"));
        let set = reader()
            .await
            .read(&credentials, &request)
            .await
            .expect("read");
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn unrelated_target_records_empty_permission() {
        let request = AccessRequest::new(
            "https://pod.example.org/alice/notes/2",
            AccessModes::from([AccessMode::Read]),
        );
        let set = reader()
            .await
            .read(&app_credentials(), &request)
            .await
            .expect("read");
        assert!(set.get("client").is_some());
        assert!(!set.grants(AccessMode::Read));
    }
}
