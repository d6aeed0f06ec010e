//! Filesystem blob store

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

use board_core::error::BlobError;
use board_core::traits::{BlobResult, BlobStore};

const MAX_EXTENSION_LEN: usize = 10;

/// Blob store writing files below a root directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a reference onto a file below the root, refusing anything that escapes it
    fn resolve(&self, reference: &str) -> BlobResult<PathBuf> {
        let relative = Path::new(reference.trim_start_matches('/'));
        let mut components = 0;
        for component in relative.components() {
            match component {
                Component::Normal(_) => components += 1,
                _ => return Err(BlobError::InvalidPath(reference.to_string())),
            }
        }
        if components == 0 {
            return Err(BlobError::InvalidPath(reference.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Keep a short alphanumeric extension, drop anything else
fn sanitize_extension(extension: Option<&str>) -> Option<String> {
    let ext = extension?.trim().trim_start_matches('.');
    (!ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    .then(|| ext.to_ascii_lowercase())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn save(&self, namespace: &str, bytes: &[u8], extension: Option<&str>) -> BlobResult<String> {
        if !is_valid_namespace(namespace) {
            return Err(BlobError::InvalidPath(namespace.to_string()));
        }

        let dir = self.root.join(namespace);
        fs::create_dir_all(&dir).await?;

        let file_name = match sanitize_extension(extension) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        fs::write(dir.join(&file_name), bytes).await?;

        let reference = format!("/{namespace}/{file_name}");
        debug!(%reference, "Blob saved");
        Ok(reference)
    }

    #[instrument(skip(self))]
    async fn load(&self, reference: &str) -> BlobResult<Vec<u8>> {
        let path = self.resolve(reference)?;
        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => BlobError::NotFound(reference.to_string()),
            _ => BlobError::from(e),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, reference: &str) -> BlobResult<()> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%reference, "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
