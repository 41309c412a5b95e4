//! Stripe REST client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;
use zeroize::Zeroizing;

use crate::payments::{
    errors::PaymentGatewayError,
    gateway::PaymentGateway,
    models::{IntentKind, NewPaymentIntent, PaymentIntent},
};

/// Configuration for the Stripe API.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API base URL, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret API key.
    pub secret_key: Zeroizing<String>,

    /// Three-letter ISO currency code in lowercase.
    pub currency: String,

    /// Currency for standalone amount intents, lowercase.
    pub amount_currency: String,
}

/// HTTP client for Stripe payment intents.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn currency(&self, kind: IntentKind) -> &str {
        match kind {
            IntentKind::Checkout => &self.config.currency,
            IntentKind::Amount => &self.config.amount_currency,
        }
    }

    fn create_form(&self, intent: &NewPaymentIntent) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("amount", intent.amount.to_string()),
            ("currency", self.currency(intent.kind).to_string()),
        ];

        form.extend(intent.metadata.form_pairs());

        form
    }
}

async fn parse_intent(
    response: Response,
    action: &str,
) -> Result<PaymentIntent, PaymentGatewayError> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        return Err(PaymentGatewayError::UnexpectedResponse(format!(
            "{action} request failed with status {status}: {text}"
        )));
    }

    Ok(response.json().await?)
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        debug!(amount = intent.amount, "creating payment intent");

        let response = self
            .http
            .post(self.intents_url())
            .bearer_auth(self.config.secret_key.as_str())
            .form(&self.create_form(&intent))
            .send()
            .await?;

        parse_intent(response, "create payment intent").await
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentGatewayError> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "malformed payment intent id \"{id}\""
            )));
        }

        let response = self
            .http
            .get(format!("{}/{id}", self.intents_url()))
            .bearer_auth(self.config.secret_key.as_str())
            .send()
            .await?;

        parse_intent(response, "retrieve payment intent").await
    }
}
