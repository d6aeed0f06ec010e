//! Multipart upload extractors
//!
//! Ad creation sends a `properties` JSON part next to the `image` file part;
//! image replacement sends the `image` part alone.

use axum::{
    async_trait,
    extract::{multipart::Field, FromRequest, Multipart, Request},
};
use board_service::{CreateOrUpdateAdRequest, ImageUpload};

use crate::response::ApiError;

const PROPERTIES_PART: &str = "properties";
const IMAGE_PART: &str = "image";

async fn read_image(field: Field<'_>) -> Result<ImageUpload, ApiError> {
    let content_type = field.content_type().map(str::to_owned);
    let file_name = field.file_name().map(str::to_owned);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?;
    Ok(ImageUpload::new(content_type, file_name, bytes.to_vec()))
}

/// Walk the parts, keeping `properties` bytes and the `image` upload
async fn read_parts<S: Send + Sync>(
    req: Request,
    state: &S,
) -> Result<(Option<Vec<u8>>, Option<ImageUpload>), ApiError> {
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?;

    let mut properties = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PROPERTIES_PART) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?;
                properties = Some(bytes.to_vec());
            }
            Some(IMAGE_PART) => image = Some(read_image(field).await?),
            _ => {}
        }
    }

    Ok((properties, image))
}

/// Ad properties plus the optional image
#[derive(Debug)]
pub struct AdForm {
    pub properties: CreateOrUpdateAdRequest,
    pub image: Option<ImageUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for AdForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (properties, image) = read_parts(req, state).await?;

        let properties = properties
            .ok_or_else(|| ApiError::invalid_body("Missing 'properties' part"))?;
        let properties = serde_json::from_slice(&properties)
            .map_err(|e| ApiError::invalid_body(format!("Invalid 'properties' part: {e}")))?;

        Ok(Self { properties, image })
    }
}

/// A lone image part. An absent part yields an empty upload.
#[derive(Debug)]
pub struct ImageForm(pub ImageUpload);

#[async_trait]
impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (_, image) = read_parts(req, state).await?;
        Ok(Self(image.unwrap_or_default()))
    }
}
