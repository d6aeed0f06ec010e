//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ad;
mod comment;
mod user;

pub use ad::AdModel;
pub use comment::CommentModel;
pub use user::UserModel;
