//! Shared handler state: the service context plus the loaded configuration.

use std::sync::Arc;

use board_common::{AppConfig, JwtService};
use board_db::PgPool;
use board_service::{
    AdService, AuthService, AuthorizationService, CommentService, ServiceContext, UserService,
};

#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    pub fn ads(&self) -> AdService<'_> {
        AdService::new(&self.services)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.services)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.services)
    }

    pub fn accounts(&self) -> AuthService<'_> {
        AuthService::new(&self.services)
    }

    /// Owner-or-admin checks for route guards
    pub fn authorization(&self) -> AuthorizationService<'_> {
        AuthorizationService::new(&self.services)
    }

    /// Verifies bearer tokens for the auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.services.jwt_service()
    }

    /// `None` when running on in-memory stores
    pub fn database(&self) -> Option<&PgPool> {
        self.services.pool()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.config.app.name)
            .field("env", &self.config.app.env)
            .field("upload_dir", &self.config.storage.upload_dir)
            .finish_non_exhaustive()
    }
}
