//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, in the camelCase
//! shapes the web frontend reads.

use board_core::UserRole;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Unpaginated collection with its size
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Image bytes with the media type to serve them as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

// ============================================================================
// Ad Responses
// ============================================================================

/// Ad summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResponse {
    pub pk: i64,
    /// Owner id
    pub author: i64,
    /// URL of the ad image
    pub image: Option<String>,
    pub price: i32,
    pub title: String,
}

/// Ad detail with the owner's contact fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAdResponse {
    pub pk: i64,
    pub author_first_name: String,
    pub author_last_name: String,
    pub description: String,
    pub email: String,
    pub image: Option<String>,
    pub phone: String,
    pub price: i32,
    pub title: String,
}

pub type AdsResponse = Listing<AdResponse>;

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Author id
    pub author: i64,
    /// URL of the author's avatar
    pub author_image: Option<String>,
    pub author_first_name: String,
    /// Epoch milliseconds
    pub created_at: i64,
    pub pk: i64,
    pub text: String,
}

pub type CommentsResponse = Listing<CommentResponse>;

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
    /// URL of the avatar
    pub image: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Status of each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    /// `database_healthy` is `None` when no database is configured
    pub fn from_checks(database_healthy: Option<bool>) -> Self {
        let database = match database_healthy {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "not_configured",
        };
        let status = if Self::is_ready(database_healthy) {
            "ready"
        } else {
            "not_ready"
        };
        Self {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.to_string(),
            },
        }
    }

    fn is_ready(database_healthy: Option<bool>) -> bool {
        database_healthy != Some(false)
    }

    pub fn ready(&self) -> bool {
        self.status == "ready"
    }
}
