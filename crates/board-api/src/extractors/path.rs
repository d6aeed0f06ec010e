//! Path parameter extractors
//!
//! Ids arrive as strings and are parsed into their typed form by the handler.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use board_core::{AdId, CommentId, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

/// `/ads/:id`
#[derive(Debug, Deserialize)]
pub struct AdIdPath {
    pub id: String,
}

impl AdIdPath {
    pub fn ad_id(&self) -> Result<AdId, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid ad id format"))
    }
}

/// `/ads/:id/comments/:comment_id`
#[derive(Debug, Deserialize)]
pub struct AdCommentPath {
    pub id: String,
    pub comment_id: String,
}

impl AdCommentPath {
    pub fn ad_id(&self) -> Result<AdId, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid ad id format"))
    }

    pub fn comment_id(&self) -> Result<CommentId, ApiError> {
        self.comment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid comment id format"))
    }
}

/// `/users/:id`
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user id format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        let path = AdCommentPath {
            id: "12".to_string(),
            comment_id: "x".to_string(),
        };
        assert_eq!(path.ad_id().unwrap(), AdId::new(12));
        assert!(matches!(path.comment_id(), Err(ApiError::InvalidPath(_))));

        let path = UserIdPath {
            id: "-".to_string(),
        };
        assert!(path.user_id().is_err());
    }
}
