//! Value objects - small immutable domain types

mod identity;
mod ids;
mod role;

pub use identity::Identity;
pub use ids::{AdId, CommentId, IdParseError, UserId};
pub use role::{RoleParseError, UserRole};
