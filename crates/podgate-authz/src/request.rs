use crate::{AccessModes, ResourceIdentifier};

/// Kind of resource a request targets, as known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    /// Application data managed under a data registration.
    #[default]
    DataInstance,
    /// The description of a data grant itself.
    DataGrant,
}

/// A request to use a resource in some set of modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub target: ResourceIdentifier,
    pub modes: AccessModes,
    pub target_kind: TargetKind,
}

impl AccessRequest {
    pub fn new(target: impl Into<ResourceIdentifier>, modes: AccessModes) -> Self {
        Self {
            target: target.into(),
            modes,
            target_kind: TargetKind::DataInstance,
        }
    }

    pub fn for_grant(target: impl Into<ResourceIdentifier>, modes: AccessModes) -> Self {
        Self {
            target: target.into(),
            modes,
            target_kind: TargetKind::DataGrant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccessMode;

    #[test]
    fn constructors_set_target_kind() {
        let modes = AccessModes::from([AccessMode::Read]);
        let data = AccessRequest::new("https://pod.example.org/a", modes.clone());
        let grant = AccessRequest::for_grant("https://aa.example.org/grants/1", modes);
        assert_eq!(data.target_kind, TargetKind::DataInstance);
        assert_eq!(grant.target_kind, TargetKind::DataGrant);
        assert_eq!(grant.target.as_str(), "https://aa.example.org/grants/1");
    }
}
