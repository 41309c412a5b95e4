//! Payment gateway seam.

use async_trait::async_trait;
use mockall::automock;

use crate::payments::{
    errors::PaymentGatewayError,
    models::{NewPaymentIntent, PaymentIntent},
};

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Ask the processor to create a payment intent for the given amount.
    async fn create_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, PaymentGatewayError>;

    /// Fetch the current state of an existing payment intent.
    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentGatewayError>;
}
