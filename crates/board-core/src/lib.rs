//! # board-core
//!
//! Domain layer containing entities, value objects, and the ports (repository and
//! blob-store traits) the service layer is written against.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Ad, AdChanges, Comment, NewAd, NewComment, NewUser, User, UserChanges};
pub use error::{BlobError, DomainError};
pub use traits::{
    AdRepository, BlobResult, BlobStore, CommentRepository, RepoResult, UserRepository,
};
pub use value_objects::{AdId, CommentId, IdParseError, Identity, RoleParseError, UserId, UserRole};
