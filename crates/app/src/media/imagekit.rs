//! ImageKit REST client.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use tracing::debug;
use zeroize::Zeroizing;

use crate::media::{
    errors::MediaStorageError,
    models::{MediaUpload, StoredMedia},
    storage::MediaStorage,
};

/// Configuration for the ImageKit API.
#[derive(Debug, Clone)]
pub struct ImageKitConfig {
    /// Upload endpoint base, e.g. `"https://upload.imagekit.io/api"`.
    pub upload_url: String,

    /// Management API base, e.g. `"https://api.imagekit.io"`.
    pub api_url: String,

    /// Private API key, used as the basic-auth username.
    pub private_key: Zeroizing<String>,
}

/// HTTP client for ImageKit file uploads and deletes.
#[derive(Debug, Clone)]
pub struct ImageKitClient {
    config: ImageKitConfig,
    http: Client,
}

impl ImageKitClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ImageKitConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn upload_endpoint(&self) -> String {
        format!(
            "{}/v1/files/upload",
            self.config.upload_url.trim_end_matches('/')
        )
    }

    fn file_endpoint(&self, file_id: &str) -> String {
        format!(
            "{}/v1/files/{file_id}",
            self.config.api_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl MediaStorage for ImageKitClient {
    async fn upload(&self, upload: MediaUpload) -> Result<StoredMedia, MediaStorageError> {
        debug!(
            file_name = %upload.file_name,
            size = upload.bytes.len(),
            "uploading media"
        );

        let form = Form::new()
            .part("file", Part::text(BASE64.encode(&upload.bytes)))
            .text("fileName", upload.file_name);

        let response = self
            .http
            .post(self.upload_endpoint())
            .basic_auth(self.config.private_key.as_str(), Some(""))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaStorageError::UnexpectedResponse(format!(
                "upload request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn delete(&self, file_id: &str) -> Result<(), MediaStorageError> {
        let well_formed = !file_id.is_empty()
            && file_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !well_formed {
            return Err(MediaStorageError::UnexpectedResponse(format!(
                "malformed file id \"{file_id}\""
            )));
        }

        let response = self
            .http
            .delete(self.file_endpoint(file_id))
            .basic_auth(self.config.private_key.as_str(), Some(""))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaStorageError::UnexpectedResponse(format!(
                "delete request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}
