//! Error types for the editor

use thiserror::Error;

use crate::version::VersionId;

/// Failures surfaced by the version store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VersionError {
    #[error("Version not found: {0}")]
    NotFound(VersionId),
}

/// Failures reported by the live editing surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Editor rejected content: {0}")]
    Rejected(String),

    #[error("Normalization failed: {0}")]
    Normalize(String),
}
