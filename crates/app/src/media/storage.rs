//! Media storage seam.

use async_trait::async_trait;
use mockall::automock;

use crate::media::{
    errors::MediaStorageError,
    models::{MediaUpload, StoredMedia},
};

#[automock]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload a file, returning its public URL and host-side id.
    async fn upload(&self, upload: MediaUpload) -> Result<StoredMedia, MediaStorageError>;

    /// Delete a previously uploaded file.
    async fn delete(&self, file_id: &str) -> Result<(), MediaStorageError>;
}
