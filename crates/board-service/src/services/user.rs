//! User service
//!
//! Profile reads and edits for the acting user, password change and avatar.

use board_core::entities::UserChanges;
use board_core::{Identity, UserId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{ImageUpload, NewPasswordRequest, StoredImage, UpdateUserRequest, UserResponse};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::images::{self, USER_NAMESPACE};
use super::validation::validate_image;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile of the acting user
    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn me(&self, identity: &Identity) -> ServiceResult<UserResponse> {
        let user = AuthorizationService::new(self.ctx)
            .resolve_actor(identity)
            .await?;
        Ok(UserResponse::from(user))
    }

    /// Update the supplied profile fields
    #[instrument(skip(self, identity, request), fields(email = %identity.email))]
    pub async fn update(
        &self,
        identity: &Identity,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        let actor = AuthorizationService::new(self.ctx)
            .resolve_actor(identity)
            .await?;

        let changes = UserChanges {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        };
        let user = self.ctx.user_repo().update_profile(actor.id, &changes).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(UserResponse::from(user))
    }

    /// Change the password after checking the current one
    #[instrument(skip(self, identity, request), fields(email = %identity.email))]
    pub async fn set_password(
        &self,
        identity: &Identity,
        request: NewPasswordRequest,
    ) -> ServiceResult<()> {
        request.validate()?;

        let user = AuthorizationService::new(self.ctx)
            .resolve_actor(identity)
            .await?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user.id))?;

        let passwords = self.ctx.password_service();
        if !passwords.verify(&request.current_password, &hash)? {
            warn!(user_id = %user.id, "Password change with wrong current password");
            return Err(ServiceError::forbidden("Current password does not match"));
        }

        let new_hash = passwords.hash(&request.new_password)?;
        self.ctx.user_repo().update_password(user.id, &new_hash).await?;

        info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    /// Replace the avatar of the acting user
    #[instrument(skip(self, identity, image), fields(email = %identity.email))]
    pub async fn replace_avatar(
        &self,
        identity: &Identity,
        image: ImageUpload,
    ) -> ServiceResult<UserResponse> {
        validate_image(&image)?;

        let mut user = AuthorizationService::new(self.ctx)
            .resolve_actor(identity)
            .await?;

        let reference = images::store_image(self.ctx, USER_NAMESPACE, &image).await?;

        let previous = match self.ctx.user_repo().set_avatar(user.id, &reference).await {
            Ok(previous) => previous,
            Err(e) => {
                images::discard_blob(self.ctx, &reference).await;
                return Err(e.into());
            }
        };
        user.avatar = Some(reference);

        if let Some(previous) = previous {
            images::discard_blob(self.ctx, &previous).await;
        }

        info!(user_id = %user.id, "Avatar replaced");

        Ok(UserResponse::from(user))
    }

    /// Avatar bytes of any user, `None` when they have none
    #[instrument(skip(self))]
    pub async fn load_avatar(&self, user_id: UserId) -> ServiceResult<Option<StoredImage>> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        images::load_blob(self.ctx, user.avatar.as_deref()).await
    }
}
