//! Business logic services
//!
//! Services validate input, resolve the acting identity, enforce
//! owner-or-admin authorization and coordinate the entity stores with the
//! blob store.

pub mod ad;
pub mod auth;
pub mod authorization;
pub mod comment;
pub mod context;
pub mod error;
mod images;
pub mod user;
pub mod validation;

// Re-export all services for convenience
pub use ad::AdService;
pub use auth::AuthService;
pub use authorization::{can_mutate, AuthorizationService};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
