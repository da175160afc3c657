//! CLI and environment configuration.

use std::time::Duration;

use clap::Args;

use crate::checkout::DEFAULT_TIMEOUT;

/// Storefront origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Log output format.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

/// Checkout settings.
///
/// Stripe credentials are not flags: the payment client reads `STRIPE_PUBLISHABLE_KEY`,
/// `STRIPE_API_BASE` and `STRIPE_CHECKOUT_BASE` from the environment when first used.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Storefront origin used for the success and cancel callbacks
    #[arg(long, env = "STOREFRONT_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Seconds to wait for the payment provider to create a session
    #[arg(long, env = "CHECKOUT_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl CheckoutConfig {
    /// Session creation limit. A zero value falls back to the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        if self.timeout_seconds == 0 {
            return DEFAULT_TIMEOUT;
        }

        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_uses_default() {
        let config = CheckoutConfig {
            origin: "http://localhost:3000".to_string(),
            timeout_seconds: 0,
        };

        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn default_uses_local_origin_and_default_timeout() {
        let config = CheckoutConfig::default();

        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn timeout_is_read_in_seconds() {
        let config = CheckoutConfig {
            origin: "http://localhost:3000".to_string(),
            timeout_seconds: 3,
        };

        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
