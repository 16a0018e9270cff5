//! Centralized error types for PM.

use thiserror::Error;

/// Main error type for PM operations.
#[derive(Error, Debug)]
pub enum PmError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    Store(#[from] pm_store::StoreError),
}

/// Result type for PM operations.
pub type PmResult<T> = Result<T, PmError>;

impl PmError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the error means the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::Store(pm_store::StoreError::NotFound(_))
        )
    }
}
