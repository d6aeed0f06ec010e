//! Service layer error types
//!
//! The only failure kinds the service layer emits. Store and blob errors are
//! translated here so nothing infrastructure-specific leaks to callers.

use board_common::AppError;
use board_core::{BlobError, DomainError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed a field constraint, or an image could not be stored
    Validation(String),

    /// Referenced resource is absent (or not addressable from this context)
    NotFound { resource: &'static str, id: String },

    /// Actor is known but lacks owner-or-admin rights
    Forbidden(String),

    /// Credentials or token rejected
    Unauthorized,

    /// Conflict (e.g., duplicate email)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::Unauthorized => write!(f, "Invalid credentials"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// A blob write that failed while creating or replacing an image
    pub fn image_storage(err: &BlobError) -> Self {
        Self::Validation(format!("Failed to store image: {err}"))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound(id) => Self::not_found("User", id),
            DomainError::UserEmailNotFound(email) => Self::not_found("User", email),
            DomainError::AdNotFound(id) => Self::not_found("Ad", id),
            DomainError::CommentNotFound(id) => Self::not_found("Comment", id),
            DomainError::ValidationError(msg) => Self::Validation(msg),
            DomainError::EmailAlreadyExists => Self::conflict("Email already registered"),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        if err.is_auth() {
            Self::Unauthorized
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        Self::Validation(message)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
