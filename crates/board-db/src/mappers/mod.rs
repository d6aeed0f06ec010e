//! Model to entity mappers

mod ad;
mod comment;
mod user;
