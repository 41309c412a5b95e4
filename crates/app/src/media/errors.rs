//! Media storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaStorageError {
    #[error("media storage request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected media storage response: {0}")]
    UnexpectedResponse(String),
}
