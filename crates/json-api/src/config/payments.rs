//! Payments Config

use clap::Args;
use zeroize::Zeroizing;

use reelbite_app::payments::StripeConfig;

/// Stripe settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Stripe secret API key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: String,

    /// Stripe API base URL
    #[arg(long, env = "STRIPE_API_BASE", default_value = "https://api.stripe.com")]
    pub stripe_api_base: String,

    /// Currency charged for orders, lowercase ISO code
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "inr")]
    pub payment_currency: String,

    /// Currency charged for standalone amount intents, lowercase ISO code
    #[arg(long, env = "AMOUNT_PAYMENT_CURRENCY", default_value = "usd")]
    pub amount_payment_currency: String,
}

impl PaymentsConfig {
    /// Gateway settings handed to the app context.
    #[must_use]
    pub fn stripe(&self) -> StripeConfig {
        StripeConfig {
            api_base: self.stripe_api_base.trim_end_matches('/').to_string(),
            secret_key: Zeroizing::new(self.stripe_secret_key.clone()),
            currency: self.payment_currency.to_ascii_lowercase(),
            amount_currency: self.amount_payment_currency.to_ascii_lowercase(),
        }
    }
}
