//! Domain error types

mod blob_error;
mod domain_error;

pub use blob_error::BlobError;
pub use domain_error::DomainError;
