//! Payment gateway errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("payment gateway request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected payment gateway response: {0}")]
    UnexpectedResponse(String),
}
