//! Authentication service
//!
//! Handles account registration and login. Issued tokens carry the email and
//! the stored role.

use board_common::AccessToken;
use board_core::entities::NewUser;
use board_core::UserRole;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        request.validate()?;

        if self.ctx.user_repo().email_exists(&request.username).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let requested = request.role.unwrap_or_default();
        let role = if requested.is_admin() && !self.ctx.allow_admin_registration() {
            warn!("Admin registration is disabled, registering as USER");
            UserRole::Regular
        } else {
            requested
        };

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(
                &NewUser {
                    email: request.username,
                    first_name: request.first_name,
                    last_name: request.last_name,
                    phone: request.phone,
                    role,
                },
                &password_hash,
            )
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered successfully");

        Ok(UserResponse::from(user))
    }

    /// Exchange credentials for an access token
    #[instrument(skip(self, request), fields(email = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AccessToken> {
        if request.validate().is_err() {
            return Err(ServiceError::Unauthorized);
        }

        let Some(user) = self.ctx.user_repo().find_by_email(&request.username).await? else {
            warn!("Login attempt for unknown account");
            return Err(ServiceError::Unauthorized);
        };

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::Unauthorized)?;

        if !self.ctx.password_service().verify(&request.password, &hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(ServiceError::Unauthorized);
        }

        let token = self.ctx.jwt_service().issue(&user.email, user.role)?;

        info!(user_id = %user.id, "User logged in");

        Ok(token)
    }
}
