use crate::{AccessModes, mode::join_modes};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("forbidden")]
    Forbidden,
    #[error("unauthorized: {} on {path}", join_modes(.modes))]
    Unauthorized { modes: AccessModes, path: String },
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Resolution(#[from] anyhow::Error),
}

impl AuthzError {
    /// True for the three denial outcomes; false for collaborator failures.
    pub fn is_denial(&self) -> bool {
        !matches!(self, AuthzError::Resolution(_))
    }
}

pub type AuthzResult<T> = Result<T, AuthzError>;
