//! Ports - interfaces the domain needs from infrastructure

mod blob;
mod repositories;

pub use blob::{BlobResult, BlobStore};
pub use repositories::{AdRepository, CommentRepository, RepoResult, UserRepository};
