//! PostgreSQL implementation of AdRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use board_core::entities::{Ad, AdChanges, NewAd};
use board_core::error::DomainError;
use board_core::traits::{AdRepository, RepoResult};
use board_core::value_objects::{AdId, UserId};

use crate::models::AdModel;

use super::error::{map_db_error, map_foreign_key_violation};

const AD_COLUMNS: &str =
    "id, author_id, title, description, price, image, created_at, updated_at";

/// PostgreSQL implementation of AdRepository
#[derive(Clone)]
pub struct PgAdRepository {
    pool: PgPool,
}

impl PgAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdRepository for PgAdRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AdId) -> RepoResult<Option<Ad>> {
        let result = sqlx::query_as::<_, AdModel>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Ad::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: AdId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM ads WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Ad>> {
        let result = sqlx::query_as::<_, AdModel>(&format!(
            "SELECT {AD_COLUMNS} FROM ads ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Ad::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: UserId) -> RepoResult<Vec<Ad>> {
        let result = sqlx::query_as::<_, AdModel>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE author_id = $1 ORDER BY id"
        ))
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Ad::from).collect())
    }

    #[instrument(skip(self, ad), fields(author_id = %ad.author_id))]
    async fn create(&self, ad: &NewAd) -> RepoResult<Ad> {
        let model = sqlx::query_as::<_, AdModel>(&format!(
            r"
            INSERT INTO ads (author_id, title, description, price, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {AD_COLUMNS}
            "
        ))
        .bind(ad.author_id.into_inner())
        .bind(&ad.title)
        .bind(&ad.description)
        .bind(ad.price)
        .bind(&ad.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(ad.author_id)))?;

        Ok(Ad::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update_fields(&self, id: AdId, changes: &AdChanges) -> RepoResult<Ad> {
        let model = sqlx::query_as::<_, AdModel>(&format!(
            r"
            UPDATE ads
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {AD_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model.map(Ad::from).ok_or(DomainError::AdNotFound(id))
    }

    #[instrument(skip(self))]
    async fn set_image(&self, id: AdId, image: &str) -> RepoResult<Option<String>> {
        // The row lock makes the returned reference the one this write replaced
        let previous = sqlx::query_scalar::<_, Option<String>>(
            r"
            UPDATE ads AS a
            SET image = $2, updated_at = NOW()
            FROM (SELECT id, image FROM ads WHERE id = $1 FOR UPDATE) AS previous
            WHERE a.id = previous.id
            RETURNING previous.image
            ",
        )
        .bind(id.into_inner())
        .bind(image)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        previous.ok_or(DomainError::AdNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AdId) -> RepoResult<()> {
        // Comments go with the ad through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AdNotFound(id));
        }

        Ok(())
    }
}
