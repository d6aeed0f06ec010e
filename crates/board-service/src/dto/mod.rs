//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateOrUpdateAdRequest, CreateOrUpdateCommentRequest, ImageUpload, LoginRequest,
    NewPasswordRequest, RegisterRequest, UpdateUserRequest,
};

pub use responses::{
    AdResponse, AdsResponse, CommentResponse, CommentsResponse, ExtendedAdResponse, HealthChecks,
    HealthResponse, Listing, ReadinessResponse, StoredImage, UserResponse,
};

pub use mappers::{AdWithAuthor, CommentWithAuthor};

pub use board_common::AccessToken;
