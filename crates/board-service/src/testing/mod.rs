//! In-memory stores for tests
//!
//! Every store port has a `parking_lot`-guarded implementation here, plus a
//! blob store that can be told to fail. [`TestContext`] wires them into a
//! [`ServiceContext`] and seeds data without going through the services.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use board_common::auth::{hash_password, JwtService};
use board_core::entities::{Ad, AdChanges, Comment, NewAd, NewComment, NewUser, User, UserChanges};
use board_core::error::{BlobError, DomainError};
use board_core::traits::{
    AdRepository, BlobResult, BlobStore, CommentRepository, RepoResult, UserRepository,
};
use board_core::{AdId, CommentId, Identity, UserId, UserRole};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use crate::dto::ImageUpload;
use crate::services::{ServiceContext, ServiceContextBuilder};

/// Password of every seeded user
pub const TEST_PASSWORD: &str = "password1";

/// Secret of the test token service
pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-long-enough";

/// A small valid PNG upload
pub fn png_upload() -> ImageUpload {
    ImageUpload::new(
        Some("image/png".to_string()),
        Some("photo.png".to_string()),
        vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    )
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepo {
    rows: RwLock<BTreeMap<UserId, (User, String)>>,
    next_id: AtomicI64,
    stale: Mutex<Option<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next lookup of this user returns `snapshot` instead of the stored row
    pub fn serve_stale_once(&self, snapshot: User) {
        *self.stale.lock() = Some(snapshot);
    }

    fn take_stale(&self, matches: impl Fn(&User) -> bool) -> Option<User> {
        let mut stale = self.stale.lock();
        if stale.as_ref().is_some_and(|user| matches(user)) {
            stale.take()
        } else {
            None
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        if let Some(user) = self.take_stale(|user| user.id == id) {
            return Ok(Some(user));
        }
        Ok(self.rows.read().get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let rows = self.rows.read();
        Ok(ids
            .iter()
            .filter_map(|id| rows.get(id).map(|(user, _)| user.clone()))
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        if let Some(user) = self.take_stale(|user| user.email == email) {
            return Ok(Some(user));
        }
        Ok(self
            .rows
            .read()
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.rows.read().values().any(|(user, _)| user.email == email))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut rows = self.rows.write();
        if rows.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let created = User {
            id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            avatar: None,
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, (created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update_profile(&self, id: UserId, changes: &UserChanges) -> RepoResult<User> {
        let mut rows = self.rows.write();
        let (stored, _) = rows.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        stored.apply(changes.clone());
        Ok(stored.clone())
    }

    async fn set_avatar(&self, id: UserId, avatar: &str) -> RepoResult<Option<String>> {
        let mut rows = self.rows.write();
        let (stored, _) = rows.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        Ok(stored.set_avatar(Some(avatar.to_string())))
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.rows.read().get(&id).map(|(_, hash)| hash.clone()))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let (_, hash) = rows.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        *hash = password_hash.to_string();
        Ok(())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Default)]
pub struct InMemoryCommentRepo {
    rows: RwLock<BTreeMap<CommentId, Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn delete_for_ad(&self, ad_id: AdId) {
        self.rows.write().retain(|_, comment| !comment.belongs_to(ad_id));
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepo {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_by_ad(&self, ad_id: AdId) -> RepoResult<Vec<Comment>> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|comment| comment.belongs_to(ad_id))
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let id = CommentId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = Comment {
            id,
            ad_id: comment.ad_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created_at: comment.created_at,
        };
        self.rows.write().insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let stored = rows
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.text.clone_from(&comment.text);
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        self.rows
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }
}

// ============================================================================
// Ads
// ============================================================================

/// Deleting an ad also drops its comments, like the schema's cascade
pub struct InMemoryAdRepo {
    rows: RwLock<BTreeMap<AdId, Ad>>,
    next_id: AtomicI64,
    comments: Arc<InMemoryCommentRepo>,
    stale: Mutex<Option<Ad>>,
}

impl InMemoryAdRepo {
    pub fn new(comments: Arc<InMemoryCommentRepo>) -> Self {
        Self {
            rows: RwLock::default(),
            next_id: AtomicI64::new(0),
            comments,
            stale: Mutex::new(None),
        }
    }

    /// The next `find_by_id` for this ad returns `snapshot` instead of the stored row
    pub fn serve_stale_once(&self, snapshot: Ad) {
        *self.stale.lock() = Some(snapshot);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepo {
    async fn find_by_id(&self, id: AdId) -> RepoResult<Option<Ad>> {
        let mut stale = self.stale.lock();
        if stale.as_ref().is_some_and(|ad| ad.id == id) {
            return Ok(stale.take());
        }
        drop(stale);
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn exists(&self, id: AdId) -> RepoResult<bool> {
        Ok(self.rows.read().contains_key(&id))
    }

    async fn find_all(&self) -> RepoResult<Vec<Ad>> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn find_by_author(&self, author_id: UserId) -> RepoResult<Vec<Ad>> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|ad| ad.is_owned_by(author_id))
            .cloned()
            .collect())
    }

    async fn create(&self, ad: &NewAd) -> RepoResult<Ad> {
        let id = AdId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let created = Ad {
            id,
            author_id: ad.author_id,
            title: ad.title.clone(),
            description: ad.description.clone(),
            price: ad.price,
            image: Some(ad.image.clone()),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().insert(id, created.clone());
        Ok(created)
    }

    async fn update_fields(&self, id: AdId, changes: &AdChanges) -> RepoResult<Ad> {
        let mut rows = self.rows.write();
        let stored = rows.get_mut(&id).ok_or(DomainError::AdNotFound(id))?;
        stored.apply(changes.clone());
        Ok(stored.clone())
    }

    async fn set_image(&self, id: AdId, image: &str) -> RepoResult<Option<String>> {
        let mut rows = self.rows.write();
        let stored = rows.get_mut(&id).ok_or(DomainError::AdNotFound(id))?;
        Ok(stored.set_image(image.to_string()))
    }

    async fn delete(&self, id: AdId) -> RepoResult<()> {
        self.rows
            .write()
            .remove(&id)
            .ok_or(DomainError::AdNotFound(id))?;
        self.comments.delete_for_ad(id);
        Ok(())
    }
}

// ============================================================================
// Blobs
// ============================================================================

/// Blob store in a map. Saves and deletes can be switched to fail.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    counter: AtomicI64,
    fail_saves: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.blobs.read().contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn save(&self, namespace: &str, bytes: &[u8], extension: Option<&str>) -> BlobResult<String> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BlobError::Io("simulated write failure".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let reference = match extension {
            Some(ext) => format!("/{namespace}/{n}.{}", ext.to_ascii_lowercase()),
            None => format!("/{namespace}/{n}"),
        };
        self.blobs.write().insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    async fn load(&self, reference: &str) -> BlobResult<Vec<u8>> {
        self.blobs
            .read()
            .get(reference)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(reference.to_string()))
    }

    async fn delete(&self, reference: &str) -> BlobResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BlobError::Io("simulated delete failure".to_string()));
        }
        self.blobs.write().remove(reference);
        Ok(())
    }
}

// ============================================================================
// Test context
// ============================================================================

/// Service context over in-memory stores, with handles kept for assertions
pub struct TestContext {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepo>,
    pub ads: Arc<InMemoryAdRepo>,
    pub comments: Arc<InMemoryCommentRepo>,
    pub blobs: Arc<InMemoryBlobStore>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Registration may create ADMIN accounts
    pub fn with_admin_registration() -> Self {
        Self::build(true)
    }

    fn build(allow_admin_registration: bool) -> Self {
        let users = Arc::new(InMemoryUserRepo::new());
        let comments = Arc::new(InMemoryCommentRepo::new());
        let ads = Arc::new(InMemoryAdRepo::new(comments.clone()));
        let blobs = Arc::new(InMemoryBlobStore::new());

        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .ad_repo(ads.clone())
            .comment_repo(comments.clone())
            .blob_store(blobs.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 3600)))
            .allow_admin_registration(allow_admin_registration)
            .build()
            .expect("all test dependencies are set");

        Self {
            ctx,
            users,
            ads,
            comments,
            blobs,
        }
    }

    /// Identity as the token extractor would produce it
    pub fn identity(user: &User) -> Identity {
        Identity::new(user.email.clone(), user.role)
    }

    /// Insert a user whose password is [`TEST_PASSWORD`]
    pub async fn seed_user(&self, email: &str, role: UserRole) -> User {
        let hash = hash_password(TEST_PASSWORD).expect("hashing succeeds");
        let new_user = NewUser {
            email: email.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone: "+79991234567".to_string(),
            role,
        };
        self.users
            .create(&new_user, &hash)
            .await
            .expect("email is unique")
    }

    /// Current stored state of a user
    pub async fn user(&self, email: &str) -> User {
        self.users
            .find_by_email(email)
            .await
            .ok()
            .flatten()
            .expect("user is seeded")
    }

    /// Insert an ad owned by `author` with a stored PNG image
    pub async fn seed_ad(&self, author: &User) -> Ad {
        let image = self
            .blobs
            .save("ads", &png_upload().bytes, Some("png"))
            .await
            .expect("blob save succeeds");
        self.ads
            .create(&NewAd {
                author_id: author.id,
                title: "Bicycle".to_string(),
                description: "Red bicycle, barely used".to_string(),
                price: 100,
                image,
            })
            .await
            .expect("ad insert succeeds")
    }

    pub async fn seed_comment(&self, ad: &Ad, author: &User) -> Comment {
        self.comments
            .create(&NewComment {
                ad_id: ad.id,
                author_id: author.id,
                text: "Is it still available?".to_string(),
                created_at: Utc::now(),
            })
            .await
            .expect("comment insert succeeds")
    }
}
