//! Blob handling shared by the ad and avatar operations

use board_core::BlobError;
use tracing::{debug, warn};

use crate::dto::{ImageUpload, StoredImage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::validation::content_type_for;

/// Namespace for ad images
pub(crate) const AD_NAMESPACE: &str = "ads";

/// Namespace for user avatars
pub(crate) const USER_NAMESPACE: &str = "users";

/// Write an already validated image. A failed write aborts the operation.
pub(super) async fn store_image(
    ctx: &ServiceContext,
    namespace: &str,
    image: &ImageUpload,
) -> ServiceResult<String> {
    ctx.blob_store()
        .save(namespace, &image.bytes, image.extension())
        .await
        .map_err(|e| {
            warn!(namespace, error = %e, "Image write failed");
            ServiceError::image_storage(&e)
        })
}

/// Best-effort removal; failures leave an orphan blob and are only logged
pub(super) async fn discard_blob(ctx: &ServiceContext, reference: &str) {
    match ctx.blob_store().delete(reference).await {
        Ok(()) => debug!(reference, "Blob removed"),
        Err(e) => warn!(reference, error = %e, "Failed to remove blob"),
    }
}

/// Read the blob behind an optional reference. `None` when there is nothing to serve.
pub(super) async fn load_blob(
    ctx: &ServiceContext,
    reference: Option<&str>,
) -> ServiceResult<Option<StoredImage>> {
    let Some(reference) = reference else {
        return Ok(None);
    };

    match ctx.blob_store().load(reference).await {
        Ok(bytes) => Ok(Some(StoredImage {
            content_type: content_type_for(reference),
            bytes,
        })),
        Err(BlobError::NotFound(_)) => {
            warn!(reference, "Referenced blob is missing");
            Ok(None)
        }
        Err(e) => Err(ServiceError::internal(e.to_string())),
    }
}
