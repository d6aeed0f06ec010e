//! Domain entities - core business objects

mod ad;
mod comment;
mod user;

pub use ad::{Ad, AdChanges, NewAd};
pub use comment::{Comment, NewComment};
pub use user::{NewUser, User, UserChanges};
