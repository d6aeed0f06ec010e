//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in board-core.

mod ad;
mod comment;
mod error;
mod user;

pub use ad::PgAdRepository;
pub use comment::PgCommentRepository;
pub use user::PgUserRepository;
