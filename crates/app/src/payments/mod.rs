//! Payment gateway adapter.

mod amounts;
mod errors;
mod gateway;
mod models;
mod stripe;

pub use amounts::to_minor_units;
pub use errors::PaymentGatewayError;
pub use gateway::*;
pub use models::{
    IntentKind, IntentMetadata, NewPaymentIntent, PaymentIntent, PaymentIntentStatus,
};
pub use stripe::{StripeClient, StripeConfig};
