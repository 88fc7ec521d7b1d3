use crate::{
    AccessMode, AccessModes, AccessRequest, AuthorizationAgentFactory, AuthzResult, ClientId,
    GrantResolver,
};
use std::sync::Arc;
use tracing::debug;

/// Read access to a grant description for any client holding at least one grant.
pub struct DataGrantStrategy {
    agents: Arc<dyn AuthorizationAgentFactory>,
    resolver: Arc<dyn GrantResolver>,
}

impl DataGrantStrategy {
    pub fn new(
        agents: Arc<dyn AuthorizationAgentFactory>,
        resolver: Arc<dyn GrantResolver>,
    ) -> Self {
        Self { agents, resolver }
    }

    pub async fn authorize(
        &self,
        request: &AccessRequest,
        client: &ClientId,
    ) -> AuthzResult<AccessModes> {
        let agent = self.agents.authorization_agent(request).await?;
        let grants = self.resolver.resolve(&agent, client).await?;
        let count = grants.as_ref().map_or(0, Vec::len);
        debug!(
            client = %client,
            resource = %request.target,
            grants = count,
            "resolved data grants"
        );
        if count > 0 {
            Ok(AccessModes::from([AccessMode::Read]))
        } else {
            Ok(AccessModes::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AuthorizationAgent, AuthzError, DataGrant, InMemoryGrantResolver, IndividualDataGrant,
        ResourceIdentifier, StaticAgentFactory, WebId,
    };
    use async_trait::async_trait;

    const GRANT: &str = "https://aa.example.org/alice/grants/1";

    struct FailingFactory;

    #[async_trait]
    impl AuthorizationAgentFactory for FailingFactory {
        async fn authorization_agent(
            &self,
            _request: &AccessRequest,
        ) -> AuthzResult<AuthorizationAgent> {
            Err(anyhow::anyhow!("no authorization agent for pod").into())
        }
    }

    fn agent() -> AuthorizationAgent {
        AuthorizationAgent::new(
            "https://aa.example.org/alice",
            WebId::new("https://alice.example.org/profile#me"),
        )
    }

    fn client() -> ClientId {
        ClientId::new("https://app.example.org/id")
    }

    fn request() -> AccessRequest {
        AccessRequest::for_grant(GRANT, AccessModes::from([AccessMode::Read]))
    }

    fn strategy(resolver: InMemoryGrantResolver) -> DataGrantStrategy {
        DataGrantStrategy::new(
            Arc::new(StaticAgentFactory::new(agent())),
            Arc::new(resolver),
        )
    }

    #[tokio::test]
    async fn authorizes_read_when_a_grant_exists() {
        let resolver = InMemoryGrantResolver::new();
        resolver
            .add_grant(
                &agent(),
                DataGrant::Individual(IndividualDataGrant {
                    iri: ResourceIdentifier::new(GRANT),
                    grantee: client(),
                    access_mode: vec!["write".to_string()],
                    instances: Vec::new(),
                }),
            )
            .await;
        let modes = strategy(resolver)
            .authorize(&request(), &client())
            .await
            .expect("authorize");
        assert_eq!(modes, AccessModes::from([AccessMode::Read]));
    }

    #[tokio::test]
    async fn no_access_grant_yields_nothing() {
        let modes = strategy(InMemoryGrantResolver::new())
            .authorize(&request(), &client())
            .await
            .expect("authorize");
        assert!(modes.is_empty());
    }

    #[tokio::test]
    async fn empty_grant_list_yields_nothing() {
        let resolver = InMemoryGrantResolver::new();
        resolver.register_client(&agent(), client()).await;
        let modes = strategy(resolver)
            .authorize(&request(), &client())
            .await
            .expect("authorize");
        assert!(modes.is_empty());
    }

    #[tokio::test]
    async fn agent_lookup_failure_propagates() {
        let strategy = DataGrantStrategy::new(
            Arc::new(FailingFactory),
            Arc::new(InMemoryGrantResolver::new()),
        );
        let err = strategy
            .authorize(&request(), &client())
            .await
            .expect_err("failure");
        assert!(matches!(err, AuthzError::Resolution(_)));
    }
}
