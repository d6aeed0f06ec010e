//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use board_core::entities::{Ad, Comment, User};

use super::responses::{AdResponse, CommentResponse, ExtendedAdResponse, UserResponse};

/// Ad joined with its owner
#[derive(Debug, Clone, Copy)]
pub struct AdWithAuthor<'a> {
    pub ad: &'a Ad,
    pub author: &'a User,
}

/// Comment joined with its author
#[derive(Debug, Clone, Copy)]
pub struct CommentWithAuthor<'a> {
    pub comment: &'a Comment,
    pub author: &'a User,
}

// ============================================================================
// Ad Mappers
// ============================================================================

impl From<&Ad> for AdResponse {
    fn from(ad: &Ad) -> Self {
        Self {
            pk: ad.id.into_inner(),
            author: ad.author_id.into_inner(),
            image: ad.image_url(),
            price: ad.price,
            title: ad.title.clone(),
        }
    }
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self::from(&ad)
    }
}

impl From<AdWithAuthor<'_>> for ExtendedAdResponse {
    fn from(AdWithAuthor { ad, author }: AdWithAuthor<'_>) -> Self {
        Self {
            pk: ad.id.into_inner(),
            author_first_name: author.first_name.clone(),
            author_last_name: author.last_name.clone(),
            description: ad.description.clone(),
            email: author.email.clone(),
            image: ad.image_url(),
            phone: author.phone.clone(),
            price: ad.price,
            title: ad.title.clone(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<CommentWithAuthor<'_>> for CommentResponse {
    fn from(CommentWithAuthor { comment, author }: CommentWithAuthor<'_>) -> Self {
        Self {
            author: comment.author_id.into_inner(),
            author_image: author.avatar_url(),
            author_first_name: author.first_name.clone(),
            created_at: comment.created_at_millis(),
            pk: comment.id.into_inner(),
            text: comment.text.clone(),
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            image: user.avatar_url(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
