//! Payment Models

use std::fmt;

use serde::Deserialize;

/// Request for a new payment intent. `amount` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentIntent {
    pub amount: i64,
    pub kind: IntentKind,
    pub metadata: IntentMetadata,
}

/// What an intent pays for; decides the currency it is charged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Checkout of the caller's cart.
    Checkout,

    /// Standalone charge for a caller-supplied amount.
    Amount,
}

/// Metadata attached to an intent so it can be traced back to its cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentMetadata {
    pub user_id: String,
    pub cart_id: Option<String>,
    pub address_id: Option<String>,
}

impl IntentMetadata {
    /// Form-encoded key/value pairs in the processor's `metadata[...]` notation.
    pub(crate) fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("metadata[userId]", self.user_id.clone())];

        if let Some(cart_id) = &self.cart_id {
            pairs.push(("metadata[cartId]", cart_id.clone()));
        }

        pairs.push((
            "metadata[addressId]",
            self.address_id.clone().unwrap_or_default(),
        ));

        pairs
    }
}

/// Processor-side payment intent status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresAction => "requires_action",
            Self::Processing => "processing",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Succeeded => "succeeded",
            Self::Unknown => "unknown",
        };

        f.write_str(status)
    }
}

/// Payment Intent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: PaymentIntentStatus,
    pub client_secret: Option<String>,
}

impl PaymentIntent {
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.status == PaymentIntentStatus::Succeeded
    }
}
