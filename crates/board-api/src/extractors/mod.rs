//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path ids, JSON bodies and multipart uploads.

mod auth;
mod multipart;
mod path;
mod validated;

pub use auth::AuthUser;
pub use multipart::{AdForm, ImageForm};
pub use path::{AdCommentPath, AdIdPath, ApiPath, UserIdPath};
pub use validated::{JsonBody, ValidatedJson};
