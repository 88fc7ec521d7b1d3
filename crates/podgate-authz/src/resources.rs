//! Resource existence checks.
//!
//! # Purpose
//! The authorizer asks whether a target exists before it decides between a
//! `NotFound` and a `Forbidden`/`Unauthorized` denial. Storage belongs to the
//! host; this module only defines the seam and an in-memory implementation.
use crate::{AuthzResult, ResourceIdentifier};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[async_trait]
pub trait ResourceSet: Send + Sync {
    async fn has_resource(&self, identifier: &ResourceIdentifier) -> AuthzResult<bool>;
}

/// Resource set backed by a `HashSet` guarded by a `tokio::sync::RwLock`.
///
/// Not durable; meant for tests and hosts that keep resources in memory.
#[derive(Debug, Default)]
pub struct InMemoryResourceSet {
    resources: RwLock<HashSet<ResourceIdentifier>>,
}

impl InMemoryResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources<I>(resources: I) -> Self
    where
        I: IntoIterator<Item = ResourceIdentifier>,
    {
        Self {
            resources: RwLock::new(resources.into_iter().collect()),
        }
    }

    pub async fn insert(&self, identifier: ResourceIdentifier) -> bool {
        self.resources.write().await.insert(identifier)
    }

    pub async fn remove(&self, identifier: &ResourceIdentifier) -> bool {
        self.resources.write().await.remove(identifier)
    }
}

#[async_trait]
impl ResourceSet for InMemoryResourceSet {
    async fn has_resource(&self, identifier: &ResourceIdentifier) -> AuthzResult<bool> {
        Ok(self.resources.read().await.contains(identifier))
    }
}
