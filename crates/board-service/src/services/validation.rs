//! Field checks for ad, comment and image payloads
//!
//! Pure functions, applied before any load or persistence step. The first
//! violated rule is reported. Lengths count characters of the raw value.

use std::ops::RangeInclusive;

use board_core::AdChanges;

use crate::dto::{CreateOrUpdateAdRequest, CreateOrUpdateCommentRequest, ImageUpload};

use super::error::{ServiceError, ServiceResult};

pub const TITLE_LENGTH: RangeInclusive<usize> = 4..=32;
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 8..=64;
pub const COMMENT_LENGTH: RangeInclusive<usize> = 8..=64;

/// Accepted image media types
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Image size ceiling in bytes (10 MiB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Validated properties of a new ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdFields {
    pub title: String,
    pub description: String,
    pub price: i32,
}

fn check_price(price: i32) -> ServiceResult<()> {
    if price < 0 {
        return Err(ServiceError::validation("Price must not be negative"));
    }
    Ok(())
}

fn check_text(
    value: &str,
    bounds: &RangeInclusive<usize>,
    blank_msg: &str,
    length_msg: &str,
) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(blank_msg));
    }
    if !bounds.contains(&value.chars().count()) {
        return Err(ServiceError::validation(length_msg));
    }
    Ok(())
}

fn check_title(title: &str) -> ServiceResult<()> {
    check_text(
        title,
        &TITLE_LENGTH,
        "Title must not be blank",
        "Title must be 4 to 32 characters",
    )
}

fn check_description(description: &str) -> ServiceResult<()> {
    check_text(
        description,
        &DESCRIPTION_LENGTH,
        "Description must not be blank",
        "Description must be 8 to 64 characters",
    )
}

/// All ad properties are required on create
pub fn validate_new_ad(request: CreateOrUpdateAdRequest) -> ServiceResult<NewAdFields> {
    let price = request
        .price
        .ok_or_else(|| ServiceError::validation("Price is required"))?;
    check_price(price)?;

    let title = request.title.unwrap_or_default();
    check_title(&title)?;

    let description = request.description.unwrap_or_default();
    check_description(&description)?;

    Ok(NewAdFields {
        title,
        description,
        price,
    })
}

/// Only the supplied properties are checked; absent ones stay unchanged
pub fn validate_ad_update(request: CreateOrUpdateAdRequest) -> ServiceResult<AdChanges> {
    if let Some(price) = request.price {
        check_price(price)?;
    }
    if let Some(title) = &request.title {
        check_title(title)?;
    }
    if let Some(description) = &request.description {
        check_description(description)?;
    }

    Ok(AdChanges {
        title: request.title,
        description: request.description,
        price: request.price,
    })
}

pub fn validate_comment(request: CreateOrUpdateCommentRequest) -> ServiceResult<String> {
    let text = request.text.unwrap_or_default();
    check_text(
        &text,
        &COMMENT_LENGTH,
        "Comment text must not be blank",
        "Comment text must be 8 to 64 characters",
    )?;
    Ok(text)
}

/// Non-empty, an allowed media type, and within the size ceiling
pub fn validate_image(image: &ImageUpload) -> ServiceResult<()> {
    if image.is_empty() {
        return Err(ServiceError::validation("Image file is missing or empty"));
    }

    let allowed = image
        .content_type
        .as_deref()
        .is_some_and(|ct| ALLOWED_IMAGE_TYPES.contains(&ct));
    if !allowed {
        return Err(ServiceError::validation(
            "Only JPEG, JPG or PNG images are allowed",
        ));
    }

    if image.size() > MAX_IMAGE_SIZE {
        return Err(ServiceError::validation("Image must not exceed 10MB"));
    }

    Ok(())
}

/// Media type to serve a stored image with, from its reference's extension
pub fn content_type_for(reference: &str) -> &'static str {
    let ext = reference
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
