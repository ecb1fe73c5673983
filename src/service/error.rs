use thiserror::Error;

use crate::core::{ConfigError, InvoiceError, InvoiceId};

/// Failure inside a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Storage cannot be reached or is in an unusable state.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by [`InvoiceService`](super::InvoiceService).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The invoice core rejected the command.
    #[error(transparent)]
    Domain(#[from] InvoiceError),

    #[error("invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    /// The core error behind this failure, if any.
    pub fn as_domain(&self) -> Option<&InvoiceError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}
