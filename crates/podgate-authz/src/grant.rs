//! Delegated data grants.
//!
//! # Purpose
//! Models the three kinds of data grant a client application can hold and
//! exposes, for each, the data instances it covers and the modes it assigns.
//!
//! # How it fits
//! A [`GrantResolver`](crate::GrantResolver) returns grants for a client; the
//! strategies walk [`DataGrant::instances`] to find what a grant allows on a
//! specific instance.
//!
//! # Key invariants
//! - Grants are immutable for the duration of one decision.
//! - An all-from-registry grant reads registry membership once per call to
//!   [`DataGrant::instances`]; the returned stream is not replayable and a new
//!   call re-resolves the registry.
//! - Access modes are kept as raw strings; filtering to the recognized
//!   vocabulary happens when modes are collected.
//!
//! # Common pitfalls
//! - Individual grants carry per-instance modes that may differ from the
//!   grant-level modes; only the per-instance modes apply to an instance.
use crate::mode::recognized_modes;
use crate::{AccessModes, AuthzError, AuthzResult, ClientId, ResourceIdentifier};
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lists the instances a data registration currently contains.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn contained_instances(
        &self,
        registry: &ResourceIdentifier,
    ) -> AuthzResult<Vec<ResourceIdentifier>>;
}

/// A covered data instance with the modes granted on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInstance {
    pub id: ResourceIdentifier,
    pub access_mode: Vec<String>,
}

impl DataInstance {
    pub fn new<I, S>(id: impl Into<ResourceIdentifier>, access_mode: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            access_mode: access_mode.into_iter().map(Into::into).collect(),
        }
    }
}

/// Grant listing individual instances, each with its own modes.
#[derive(Debug, Clone)]
pub struct IndividualDataGrant {
    pub iri: ResourceIdentifier,
    pub grantee: ClientId,
    pub access_mode: Vec<String>,
    pub instances: Vec<DataInstance>,
}

/// Grant over an explicit selection of instances within one registration.
#[derive(Debug, Clone)]
pub struct SelectedFromRegistryDataGrant {
    pub iri: ResourceIdentifier,
    pub grantee: ClientId,
    pub registration: ResourceIdentifier,
    pub access_mode: Vec<String>,
    pub has_data_instance: Vec<ResourceIdentifier>,
}

/// Grant over every instance a registration contains at decision time.
#[derive(Clone)]
pub struct AllFromRegistryDataGrant {
    pub iri: ResourceIdentifier,
    pub grantee: ClientId,
    pub registration: ResourceIdentifier,
    pub access_mode: Vec<String>,
    lookup: Arc<dyn RegistryLookup>,
}

impl AllFromRegistryDataGrant {
    pub fn new(
        iri: impl Into<ResourceIdentifier>,
        grantee: ClientId,
        registration: impl Into<ResourceIdentifier>,
        access_mode: Vec<String>,
        lookup: Arc<dyn RegistryLookup>,
    ) -> Self {
        Self {
            iri: iri.into(),
            grantee,
            registration: registration.into(),
            access_mode,
            lookup,
        }
    }
}

impl std::fmt::Debug for AllFromRegistryDataGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllFromRegistryDataGrant")
            .field("iri", &self.iri)
            .field("grantee", &self.grantee)
            .field("registration", &self.registration)
            .field("access_mode", &self.access_mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum DataGrant {
    Individual(IndividualDataGrant),
    SelectedFromRegistry(SelectedFromRegistryDataGrant),
    AllFromRegistry(AllFromRegistryDataGrant),
}

impl DataGrant {
    pub fn iri(&self) -> &ResourceIdentifier {
        match self {
            DataGrant::Individual(grant) => &grant.iri,
            DataGrant::SelectedFromRegistry(grant) => &grant.iri,
            DataGrant::AllFromRegistry(grant) => &grant.iri,
        }
    }

    pub fn grantee(&self) -> &ClientId {
        match self {
            DataGrant::Individual(grant) => &grant.grantee,
            DataGrant::SelectedFromRegistry(grant) => &grant.grantee,
            DataGrant::AllFromRegistry(grant) => &grant.grantee,
        }
    }

    /// Grant-level modes as written in the grant.
    pub fn access_mode(&self) -> &[String] {
        match self {
            DataGrant::Individual(grant) => &grant.access_mode,
            DataGrant::SelectedFromRegistry(grant) => &grant.access_mode,
            DataGrant::AllFromRegistry(grant) => &grant.access_mode,
        }
    }

    /// Short scope label for log lines.
    pub fn scope(&self) -> &'static str {
        match self {
            DataGrant::Individual(_) => "individual",
            DataGrant::SelectedFromRegistry(_) => "selected_from_registry",
            DataGrant::AllFromRegistry(_) => "all_from_registry",
        }
    }

    /// Lazily produce every covered instance with the modes that apply to it.
    ///
    /// # Errors
    /// - Registry lookup failures surface as an `Err` item.
    pub fn instances(&self) -> BoxStream<'_, AuthzResult<DataInstance>> {
        match self {
            DataGrant::Individual(grant) => {
                stream::iter(grant.instances.iter().cloned().map(Ok::<_, AuthzError>)).boxed()
            }
            DataGrant::SelectedFromRegistry(grant) => {
                stream::iter(grant.has_data_instance.iter().map(move |id| {
                    Ok::<_, AuthzError>(DataInstance {
                        id: id.clone(),
                        access_mode: grant.access_mode.clone(),
                    })
                }))
                .boxed()
            }
            DataGrant::AllFromRegistry(grant) => {
                let lookup = async move {
                    grant
                        .lookup
                        .contained_instances(&grant.registration)
                        .await
                };
                stream::once(lookup)
                    .map_ok(|ids| stream::iter(ids.into_iter().map(Ok::<_, AuthzError>)))
                    .try_flatten()
                    .map_ok(move |id| DataInstance {
                        id,
                        access_mode: grant.access_mode.clone(),
                    })
                    .boxed()
            }
        }
    }

    /// Recognized modes this grant assigns to `target`; empty if it does not cover it.
    pub async fn modes_for(&self, target: &ResourceIdentifier) -> AuthzResult<AccessModes> {
        let mut modes = AccessModes::new();
        let mut instances = self.instances();
        while let Some(instance) = instances.try_next().await? {
            if &instance.id == target {
                modes.extend(recognized_modes(&instance.access_mode));
            }
        }
        Ok(modes)
    }
}

/// Registry membership held in memory, keyed by registration.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    registrations: RwLock<HashMap<ResourceIdentifier, Vec<ResourceIdentifier>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_registration(&self, registration: ResourceIdentifier) {
        self.registrations
            .write()
            .await
            .entry(registration)
            .or_default();
    }

    pub async fn add_instance(
        &self,
        registration: ResourceIdentifier,
        instance: ResourceIdentifier,
    ) {
        let mut registrations = self.registrations.write().await;
        let contained = registrations.entry(registration).or_default();
        if !contained.contains(&instance) {
            contained.push(instance);
        }
    }

    pub async fn remove_instance(
        &self,
        registration: &ResourceIdentifier,
        instance: &ResourceIdentifier,
    ) -> bool {
        let mut registrations = self.registrations.write().await;
        let Some(contained) = registrations.get_mut(registration) else {
            return false;
        };
        let before = contained.len();
        contained.retain(|id| id != instance);
        contained.len() != before
    }
}

#[async_trait]
impl RegistryLookup for InMemoryRegistry {
    async fn contained_instances(
        &self,
        registry: &ResourceIdentifier,
    ) -> AuthzResult<Vec<ResourceIdentifier>> {
        self.registrations
            .read()
            .await
            .get(registry)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown data registration: {registry}").into())
    }
}
