//! Ad database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ads table
#[derive(Debug, Clone, FromRow)]
pub struct AdModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
