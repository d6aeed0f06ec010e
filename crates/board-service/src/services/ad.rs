//! Ad service
//!
//! Handles ad listing, creation, editing, deletion and the ad image.

use board_core::entities::{Ad, NewAd, User};
use board_core::{AdId, Identity};
use tracing::{info, instrument, warn};

use crate::dto::{
    AdResponse, AdWithAuthor, AdsResponse, CreateOrUpdateAdRequest, ExtendedAdResponse,
    ImageUpload, StoredImage,
};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::images::{self, AD_NAMESPACE};
use super::validation::{validate_ad_update, validate_image, validate_new_ad};

/// Ad service
pub struct AdService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdService<'a> {
    /// Create a new AdService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn authz(&self) -> AuthorizationService<'a> {
        AuthorizationService::new(self.ctx)
    }

    async fn load(&self, id: AdId) -> ServiceResult<Ad> {
        self.ctx
            .ad_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ad", id))
    }

    /// Load an ad and its actor, then check owner-or-admin
    async fn load_for_mutation(
        &self,
        id: AdId,
        identity: &Identity,
        action: &str,
    ) -> ServiceResult<(Ad, User)> {
        let ad = self.load(id).await?;
        let authz = self.authz();
        let actor = authz.resolve_actor(identity).await?;
        authz.require_can_mutate(&actor, ad.author_id, action)?;
        Ok((ad, actor))
    }

    /// All ads in creation order
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<AdsResponse> {
        let ads = self.ctx.ad_repo().find_all().await?;
        Ok(ads.iter().map(AdResponse::from).collect::<Vec<_>>().into())
    }

    /// Create an ad owned by the acting user. The image is mandatory.
    #[instrument(skip(self, identity, request, image), fields(email = %identity.email))]
    pub async fn create(
        &self,
        identity: &Identity,
        request: CreateOrUpdateAdRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<AdResponse> {
        let fields = validate_new_ad(request)?;
        let author = self.authz().resolve_actor(identity).await?;

        let image = image
            .filter(|image| !image.is_empty())
            .ok_or_else(|| ServiceError::validation("Image is required"))?;
        validate_image(&image)?;

        let reference = images::store_image(self.ctx, AD_NAMESPACE, &image).await?;

        let new_ad = NewAd {
            author_id: author.id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            image: reference,
        };

        let ad = match self.ctx.ad_repo().create(&new_ad).await {
            Ok(ad) => ad,
            Err(e) => {
                images::discard_blob(self.ctx, &new_ad.image).await;
                return Err(e.into());
            }
        };

        info!(ad_id = %ad.id, author_id = %author.id, "Ad created");

        Ok(AdResponse::from(ad))
    }

    /// Ad detail joined with the owner's contact fields
    #[instrument(skip(self))]
    pub async fn get(&self, id: AdId) -> ServiceResult<ExtendedAdResponse> {
        let ad = self.load(id).await?;
        let author = self
            .ctx
            .user_repo()
            .find_by_id(ad.author_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Ad owner not found"))?;

        Ok(ExtendedAdResponse::from(AdWithAuthor {
            ad: &ad,
            author: &author,
        }))
    }

    /// Delete an ad, then its image. A failed image removal does not fail the delete.
    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn delete(&self, id: AdId, identity: &Identity) -> ServiceResult<()> {
        let (ad, actor) = self.load_for_mutation(id, identity, "delete this ad").await?;

        self.ctx.ad_repo().delete(id).await?;

        if let Some(reference) = &ad.image {
            images::discard_blob(self.ctx, reference).await;
        }

        info!(ad_id = %id, actor_id = %actor.id, "Ad deleted");

        Ok(())
    }

    /// Apply the supplied fields, leaving the rest unchanged
    #[instrument(skip(self, identity, request), fields(email = %identity.email))]
    pub async fn update(
        &self,
        id: AdId,
        request: CreateOrUpdateAdRequest,
        identity: &Identity,
    ) -> ServiceResult<AdResponse> {
        let changes = validate_ad_update(request)?;
        let (ad, _) = self.load_for_mutation(id, identity, "edit this ad").await?;

        if changes.is_empty() {
            return Ok(AdResponse::from(ad));
        }

        let ad = self.ctx.ad_repo().update_fields(id, &changes).await?;

        info!(ad_id = %id, "Ad updated");

        Ok(AdResponse::from(ad))
    }

    /// Ads owned by the acting user
    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn list_mine(&self, identity: &Identity) -> ServiceResult<AdsResponse> {
        let actor = self.authz().resolve_actor(identity).await?;
        let ads = self.ctx.ad_repo().find_by_author(actor.id).await?;
        Ok(ads.iter().map(AdResponse::from).collect::<Vec<_>>().into())
    }

    /// Swap the ad image. The blob the store reports as replaced is removed only
    /// once the new one is recorded.
    #[instrument(skip(self, identity, image), fields(email = %identity.email))]
    pub async fn replace_image(
        &self,
        id: AdId,
        image: ImageUpload,
        identity: &Identity,
    ) -> ServiceResult<AdResponse> {
        let (mut ad, _) = self
            .load_for_mutation(id, identity, "change this ad's image")
            .await?;
        validate_image(&image)?;

        let reference = images::store_image(self.ctx, AD_NAMESPACE, &image).await?;

        let previous = match self.ctx.ad_repo().set_image(id, &reference).await {
            Ok(previous) => previous,
            Err(e) => {
                images::discard_blob(self.ctx, &reference).await;
                return Err(e.into());
            }
        };
        ad.image = Some(reference);

        if let Some(previous) = previous {
            images::discard_blob(self.ctx, &previous).await;
        }

        info!(ad_id = %id, "Ad image replaced");

        Ok(AdResponse::from(ad))
    }

    /// Bytes of the ad image, `None` when the ad has none
    #[instrument(skip(self))]
    pub async fn load_image(&self, id: AdId) -> ServiceResult<Option<StoredImage>> {
        let ad = self.load(id).await?;
        images::load_blob(self.ctx, ad.image.as_deref()).await
    }

    /// Fail-closed ownership check for route guards
    pub async fn is_owner(&self, id: AdId, identity: &Identity) -> bool {
        self.authz().is_ad_owner(id, identity).await
    }
}
