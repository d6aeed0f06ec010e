//! Owner-or-admin authorization
//!
//! [`can_mutate`] is the single rule for ads and comments. The service wraps it
//! with identity resolution, so the role that counts is the stored one.

use board_core::entities::User;
use board_core::{AdId, Identity, UserId, UserRole};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// True iff the actor is an admin or owns the resource
#[inline]
pub fn can_mutate(actor_id: UserId, actor_role: UserRole, owner_id: UserId) -> bool {
    actor_role.is_admin() || actor_id == owner_id
}

/// Authorization service
pub struct AuthorizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the acting identity to its stored user
    pub async fn resolve_actor(&self, identity: &Identity) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_email(&identity.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &identity.email))
    }

    /// Fail with Forbidden unless `actor` may mutate a resource owned by `owner_id`
    pub fn require_can_mutate(&self, actor: &User, owner_id: UserId, action: &str) -> ServiceResult<()> {
        if can_mutate(actor.id, actor.role, owner_id) {
            Ok(())
        } else {
            debug!(actor_id = %actor.id, owner_id = %owner_id, action, "Mutation denied");
            Err(ServiceError::forbidden(format!("Not allowed to {action}")))
        }
    }

    /// Whether the identity owns the ad. Lookup failures deny.
    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn is_ad_owner(&self, ad_id: AdId, identity: &Identity) -> bool {
        let actor = match self.resolve_actor(identity).await {
            Ok(actor) => actor,
            Err(e) => {
                warn!(error = %e, "Ownership check could not resolve actor");
                return false;
            }
        };
        match self.ctx.ad_repo().find_by_id(ad_id).await {
            Ok(Some(ad)) => ad.is_owned_by(actor.id),
            Ok(None) => false,
            Err(e) => {
                warn!(ad_id = %ad_id, error = %e, "Ownership check could not load ad");
                false
            }
        }
    }

    /// Guard predicate for ad mutations: stored ADMIN role, or ownership
    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn can_mutate_ad(&self, ad_id: AdId, identity: &Identity) -> bool {
        match self.resolve_actor(identity).await {
            Ok(actor) if actor.is_admin() => true,
            Ok(_) => self.is_ad_owner(ad_id, identity).await,
            Err(e) => {
                warn!(error = %e, "Guard could not resolve actor");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    #[test]
    fn test_can_mutate_rule() {
        let (a, b) = (UserId::new(1), UserId::new(2));
        assert!(can_mutate(a, UserRole::Regular, a));
        assert!(!can_mutate(a, UserRole::Regular, b));
        assert!(can_mutate(a, UserRole::Admin, b));
    }

    #[tokio::test]
    async fn test_unknown_identity_fails_closed() {
        let t = TestContext::new();
        let ghost = Identity::new("ghost@example.com", UserRole::Admin);
        let authz = AuthorizationService::new(&t.ctx);

        assert!(!authz.is_ad_owner(AdId::new(1), &ghost).await);
        assert!(!authz.can_mutate_ad(AdId::new(1), &ghost).await);
        assert!(authz.resolve_actor(&ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_stored_role_wins_over_claimed_role() {
        let t = TestContext::new();
        let owner = t.seed_user("owner@example.com", UserRole::Regular).await;
        let other = t.seed_user("other@example.com", UserRole::Regular).await;
        let ad = t.seed_ad(&owner).await;
        let authz = AuthorizationService::new(&t.ctx);

        // Token claims ADMIN but the stored account is a regular user
        let claimed = Identity::new(other.email.clone(), UserRole::Admin);
        assert!(!authz.can_mutate_ad(ad.id, &claimed).await);
        assert!(authz.can_mutate_ad(ad.id, &TestContext::identity(&owner)).await);
        assert!(authz.is_ad_owner(ad.id, &TestContext::identity(&owner)).await);
        assert!(!authz.is_ad_owner(AdId::new(999), &TestContext::identity(&owner)).await);
    }

    #[tokio::test]
    async fn test_admin_passes_guard() {
        let t = TestContext::new();
        let owner = t.seed_user("owner@example.com", UserRole::Regular).await;
        let admin = t.seed_user("admin@example.com", UserRole::Admin).await;
        let ad = t.seed_ad(&owner).await;
        let authz = AuthorizationService::new(&t.ctx);

        assert!(authz.can_mutate_ad(ad.id, &TestContext::identity(&admin)).await);
        assert!(!authz.is_ad_owner(ad.id, &TestContext::identity(&admin)).await);
        assert!(authz.require_can_mutate(&admin, owner.id, "delete this ad").is_ok());
        let err = authz.require_can_mutate(&owner, admin.id, "edit").unwrap_err();
        assert!(err.is_forbidden());
    }
}
