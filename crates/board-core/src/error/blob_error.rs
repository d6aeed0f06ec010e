//! Blob store errors

use thiserror::Error;

use super::DomainError;

/// Errors raised by a [`BlobStore`](crate::traits::BlobStore)
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("Blob I/O error: {0}")]
    Io(String),
}

impl BlobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<std::io::Error> for BlobError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<BlobError> for DomainError {
    fn from(err: BlobError) -> Self {
        Self::StorageError(err.to_string())
    }
}
