//! JWT utilities for authentication
//!
//! Issues and validates the bearer access tokens that carry the acting identity.

use board_core::{Identity, UserRole};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Role at the time the token was issued
    pub role: UserRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The identity asserted by this token
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone(), self.role)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, email: &str, role: UserRole) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::internal("Failed to encode JWT"))?;

        Ok(AccessToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate a token and return the identity it carries
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.decode_token(token).map(|claims| claims.identity())
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 3600)
    }

    #[test]
    fn test_issue_and_authenticate() {
        let service = create_test_service();

        let token = service.issue("ann@example.com", UserRole::Admin).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let identity = service.authenticate(&token.token).unwrap();
        assert_eq!(identity.email, "ann@example.com");
        assert_eq!(identity.role, UserRole::Admin);
    }

    #[test]
    fn test_claims_carry_role_name() {
        let service = create_test_service();
        let token = service.issue("bob@example.com", UserRole::Regular).unwrap();
        let claims = service.decode_token(&token.token).unwrap();

        assert_eq!(claims.sub, "bob@example.com");
        assert!(!claims.is_expired());
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "USER");
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();

        let result = service.decode_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtService::new("another-secret-key-also-long-enough", 3600);
        let token = other.issue("ann@example.com", UserRole::Regular).unwrap();

        let result = create_test_service().authenticate(&token.token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s leeway
        let service = JwtService::new("test-secret-key-that-is-long-enough", -120);
        let token = service.issue("ann@example.com", UserRole::Regular).unwrap();

        let result = service.authenticate(&token.token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }
}
