//! Grant resolution seams.
//!
//! # Purpose
//! Defines how the strategies obtain an authorization agent and the data
//! grants it has issued to a client, plus in-memory implementations.
//!
//! # Key invariants
//! - `Ok(None)` means the client has no registration with the agent; it is not
//!   an error and yields no permissions.
//! - Resolution errors propagate; they are never turned into "no grants".
use crate::{AccessRequest, AuthzResult, ClientId, DataGrant, ResourceIdentifier, WebId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Authorization agent acting for a social agent (the data owner).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationAgent {
    pub iri: ResourceIdentifier,
    pub owner: WebId,
}

impl AuthorizationAgent {
    pub fn new(iri: impl Into<ResourceIdentifier>, owner: WebId) -> Self {
        Self {
            iri: iri.into(),
            owner,
        }
    }
}

#[async_trait]
pub trait GrantResolver: Send + Sync {
    async fn resolve(
        &self,
        agent: &AuthorizationAgent,
        client: &ClientId,
    ) -> AuthzResult<Option<Vec<DataGrant>>>;
}

/// Picks the authorization agent responsible for a request.
#[async_trait]
pub trait AuthorizationAgentFactory: Send + Sync {
    async fn authorization_agent(&self, request: &AccessRequest)
    -> AuthzResult<AuthorizationAgent>;
}

/// Factory that always answers with the same agent, for single-owner hosts.
#[derive(Debug, Clone)]
pub struct StaticAgentFactory {
    agent: AuthorizationAgent,
}

impl StaticAgentFactory {
    pub fn new(agent: AuthorizationAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl AuthorizationAgentFactory for StaticAgentFactory {
    async fn authorization_agent(
        &self,
        _request: &AccessRequest,
    ) -> AuthzResult<AuthorizationAgent> {
        Ok(self.agent.clone())
    }
}

/// Grants held in memory, grouped per authorization agent and client.
#[derive(Debug, Default)]
pub struct InMemoryGrantResolver {
    registrations: RwLock<HashMap<ResourceIdentifier, HashMap<ClientId, Vec<DataGrant>>>>,
}

impl InMemoryGrantResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` with `agent` without any grants.
    pub async fn register_client(&self, agent: &AuthorizationAgent, client: ClientId) {
        self.registrations
            .write()
            .await
            .entry(agent.iri.clone())
            .or_default()
            .entry(client)
            .or_default();
    }

    /// Record a grant under its grantee, registering the grantee if needed.
    pub async fn add_grant(&self, agent: &AuthorizationAgent, grant: DataGrant) {
        self.registrations
            .write()
            .await
            .entry(agent.iri.clone())
            .or_default()
            .entry(grant.grantee().clone())
            .or_default()
            .push(grant);
    }

    /// Drop the client's registration, returning whether one existed.
    pub async fn revoke_client(&self, agent: &AuthorizationAgent, client: &ClientId) -> bool {
        self.registrations
            .write()
            .await
            .get_mut(&agent.iri)
            .and_then(|clients| clients.remove(client))
            .is_some()
    }
}

#[async_trait]
impl GrantResolver for InMemoryGrantResolver {
    async fn resolve(
        &self,
        agent: &AuthorizationAgent,
        client: &ClientId,
    ) -> AuthzResult<Option<Vec<DataGrant>>> {
        Ok(self
            .registrations
            .read()
            .await
            .get(&agent.iri)
            .and_then(|clients| clients.get(client))
            .cloned())
    }
}
