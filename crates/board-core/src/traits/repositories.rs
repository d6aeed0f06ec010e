//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Ad, AdChanges, Comment, NewAd, NewComment, NewUser, User, UserChanges};
use crate::error::DomainError;
use crate::value_objects::{AdId, CommentId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find several users at once; missing ids are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user and return it with its assigned id
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Write the supplied profile fields and return the stored user.
    /// The avatar column is never touched.
    async fn update_profile(&self, id: UserId, changes: &UserChanges) -> RepoResult<User>;

    /// Point the user at a new avatar blob, returning the reference it replaced
    async fn set_avatar(&self, id: UserId, avatar: &str) -> RepoResult<Option<String>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Ad Repository
// ============================================================================

#[async_trait]
pub trait AdRepository: Send + Sync {
    /// Find ad by ID
    async fn find_by_id(&self, id: AdId) -> RepoResult<Option<Ad>>;

    /// Check whether an ad exists
    async fn exists(&self, id: AdId) -> RepoResult<bool>;

    /// All ads, ordered by id ascending
    async fn find_all(&self) -> RepoResult<Vec<Ad>>;

    /// Ads owned by a user, ordered by id ascending
    async fn find_by_author(&self, author_id: UserId) -> RepoResult<Vec<Ad>>;

    /// Insert an ad and return it with its assigned id
    async fn create(&self, ad: &NewAd) -> RepoResult<Ad>;

    /// Write the supplied title, description and price and return the stored ad.
    /// The image column is never touched.
    async fn update_fields(&self, id: AdId, changes: &AdChanges) -> RepoResult<Ad>;

    /// Point the ad at a new image blob, returning the reference it replaced
    async fn set_image(&self, id: AdId, image: &str) -> RepoResult<Option<String>>;

    /// Delete an ad together with its comments
    async fn delete(&self, id: AdId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// Comments on an ad, ordered by id ascending
    async fn find_by_ad(&self, ad_id: AdId) -> RepoResult<Vec<Comment>>;

    /// Insert a comment and return it with its assigned id
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Persist the text of an existing comment
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, id: CommentId) -> RepoResult<()>;
}
