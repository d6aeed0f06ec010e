//! Comment service
//!
//! Comments are addressed through their ad. A comment that belongs to a
//! different ad is reported as absent.

use std::collections::HashMap;

use board_core::entities::{Comment, NewComment, User};
use board_core::{AdId, CommentId, Identity, UserId};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CommentWithAuthor, CommentsResponse, CreateOrUpdateCommentRequest};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::validation::validate_comment;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn require_ad(&self, ad_id: AdId) -> ServiceResult<()> {
        if self.ctx.ad_repo().exists(ad_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Ad", ad_id))
        }
    }

    /// Load a comment as seen from `ad_id`, then check owner-or-admin
    async fn load_for_mutation(
        &self,
        ad_id: AdId,
        comment_id: CommentId,
        identity: &Identity,
        action: &str,
    ) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.belongs_to(ad_id))
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id))?;

        let authz = AuthorizationService::new(self.ctx);
        let actor = authz.resolve_actor(identity).await?;
        authz.require_can_mutate(&actor, comment.author_id, action)?;

        Ok(comment)
    }

    async fn author_of(&self, comment: &Comment) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(comment.author_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Comment author not found"))
    }

    /// Comments of an ad in creation order, joined with their authors
    #[instrument(skip(self))]
    pub async fn list_for_ad(&self, ad_id: AdId) -> ServiceResult<CommentsResponse> {
        self.require_ad(ad_id).await?;

        let comments = self.ctx.comment_repo().find_by_ad(ad_id).await?;

        let mut author_ids: Vec<UserId> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<UserId, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let results = comments
            .iter()
            .map(|comment| {
                let author = authors
                    .get(&comment.author_id)
                    .ok_or_else(|| ServiceError::internal("Comment author not found"))?;
                Ok(CommentResponse::from(CommentWithAuthor { comment, author }))
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        Ok(results.into())
    }

    /// Add a comment to an ad on behalf of the acting user
    #[instrument(skip(self, identity, request), fields(email = %identity.email))]
    pub async fn add(
        &self,
        ad_id: AdId,
        request: CreateOrUpdateCommentRequest,
        identity: &Identity,
    ) -> ServiceResult<CommentResponse> {
        let text = validate_comment(request)?;
        self.require_ad(ad_id).await?;
        let author = AuthorizationService::new(self.ctx)
            .resolve_actor(identity)
            .await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                ad_id,
                author_id: author.id,
                text,
                created_at: Utc::now(),
            })
            .await?;

        info!(comment_id = %comment.id, ad_id = %ad_id, "Comment added");

        Ok(CommentResponse::from(CommentWithAuthor {
            comment: &comment,
            author: &author,
        }))
    }

    /// Replace the text of a comment
    #[instrument(skip(self, identity, request), fields(email = %identity.email))]
    pub async fn update(
        &self,
        ad_id: AdId,
        comment_id: CommentId,
        request: CreateOrUpdateCommentRequest,
        identity: &Identity,
    ) -> ServiceResult<CommentResponse> {
        let text = validate_comment(request)?;
        let mut comment = self
            .load_for_mutation(ad_id, comment_id, identity, "edit this comment")
            .await?;

        comment.text = text;
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "Comment updated");

        let author = self.author_of(&comment).await?;
        Ok(CommentResponse::from(CommentWithAuthor {
            comment: &comment,
            author: &author,
        }))
    }

    #[instrument(skip(self, identity), fields(email = %identity.email))]
    pub async fn delete(
        &self,
        ad_id: AdId,
        comment_id: CommentId,
        identity: &Identity,
    ) -> ServiceResult<()> {
        self.load_for_mutation(ad_id, comment_id, identity, "delete this comment")
            .await?;

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, ad_id = %ad_id, "Comment deleted");

        Ok(())
    }
}
