//! Service context - dependency container for services
//!
//! Holds the entity stores, the blob store and the auth helpers needed by services.

use std::sync::Arc;

use board_common::auth::{JwtService, PasswordService};
use board_core::traits::{AdRepository, BlobStore, CommentRepository, UserRepository};
use board_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on in-memory stores
    pool: Option<PgPool>,

    // Entity stores
    user_repo: Arc<dyn UserRepository>,
    ad_repo: Arc<dyn AdRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Image storage
    blob_store: Arc<dyn BlobStore>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    allow_admin_registration: bool,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn ad_repo(&self) -> &dyn AdRepository {
        self.ad_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Whether registration may create ADMIN accounts
    pub fn allow_admin_registration(&self) -> bool {
        self.allow_admin_registration
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("allow_admin_registration", &self.allow_admin_registration)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    ad_repo: Option<Arc<dyn AdRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    jwt_service: Option<Arc<JwtService>>,
    allow_admin_registration: bool,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn ad_repo(mut self, repo: Arc<dyn AdRepository>) -> Self {
        self.ad_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn allow_admin_registration(mut self, allow: bool) -> Self {
        self.allow_admin_registration = allow;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            ad_repo: required(self.ad_repo, "ad_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            blob_store: required(self.blob_store, "blob_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
            allow_admin_registration: self.allow_admin_registration,
        })
    }
}
