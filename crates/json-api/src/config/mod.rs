//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    media::MediaConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod media;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

/// ReelBite JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "reelbite-json", about = "ReelBite JSON API Server", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing export and request metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Video hosting settings.
    #[command(flatten)]
    pub media: MediaConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env is fine
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 7] = [
        "reelbite-json",
        "--database-url",
        "postgres://localhost/reelbite",
        "--stripe-secret-key",
        "sk_test_123",
        "--imagekit-private-key",
        "private_test",
    ];

    #[test]
    fn command_definition_is_valid() {
        ServerConfig::command().debug_assert();
    }

    #[test]
    fn defaults_apply_when_only_secrets_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.payments.payment_currency, "inr");
        assert_eq!(config.payments.amount_payment_currency, "usd");
        assert_eq!(config.payments.stripe_api_base, "https://api.stripe.com");
        assert_eq!(
            config.media.imagekit_upload_url,
            "https://upload.imagekit.io/api"
        );
        assert_eq!(config.observability.otel_service_name, "reelbite-json");

        Ok(())
    }

    #[test]
    fn missing_stripe_key_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "reelbite-json",
            "--database-url",
            "postgres://localhost/reelbite",
            "--imagekit-private-key",
            "private_test",
        ]);

        assert!(result.is_err());
    }
}
