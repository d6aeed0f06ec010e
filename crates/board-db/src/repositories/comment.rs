//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use board_core::entities::{Comment, NewComment};
use board_core::error::DomainError;
use board_core::traits::{CommentRepository, RepoResult};
use board_core::value_objects::{AdId, CommentId};

use crate::models::CommentModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            "SELECT id, ad_id, author_id, text, created_at FROM comments WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ad(&self, ad_id: AdId) -> RepoResult<Vec<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, ad_id, author_id, text, created_at
            FROM comments
            WHERE ad_id = $1
            ORDER BY id
            ",
        )
        .bind(ad_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(ad_id = %comment.ad_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let model = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (ad_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ad_id, author_id, text, created_at
            ",
        )
        .bind(comment.ad_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.text)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        // The ad may have been deleted between the existence check and the insert
        .map_err(|e| map_foreign_key_violation(e, || DomainError::AdNotFound(comment.ad_id)))?;

        Ok(Comment::from(model))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query("UPDATE comments SET text = $2 WHERE id = $1")
            .bind(comment.id.into_inner())
            .bind(&comment.text)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }
}
