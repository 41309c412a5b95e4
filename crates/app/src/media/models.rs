//! Media Models

use serde::Deserialize;

/// A file to be uploaded to the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Location of an uploaded file on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMedia {
    pub file_id: String,
    pub url: String,
}
