//! Media storage adapter.

mod errors;
mod imagekit;
mod models;
mod storage;

pub use errors::MediaStorageError;
pub use imagekit::{ImageKitClient, ImageKitConfig};
pub use models::{MediaUpload, StoredMedia};
pub use storage::*;
