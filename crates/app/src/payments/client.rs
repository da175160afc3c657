//! Stripe Checkout client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use storefront::checkout::CheckoutRequest;

use crate::payments::{
    errors::{ConfigError, RedirectError, SessionError},
    provider::{CheckoutSession, PaymentProvider, RedirectTarget},
    secret::PublishableKey,
    wire::{ErrorResponse, SessionPayload, SessionResponse},
};

/// Default API origin.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Default origin of hosted checkout pages.
pub const DEFAULT_CHECKOUT_BASE: &str = "https://checkout.stripe.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Stripe client.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Publishable key sent as the bearer credential.
    pub publishable_key: PublishableKey,

    /// API origin, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Hosted page origin, e.g. `"https://checkout.stripe.com"`.
    pub checkout_base: String,
}

impl StripeConfig {
    /// Settings with the default origins.
    #[must_use]
    pub fn new(publishable_key: PublishableKey) -> Self {
        Self {
            publishable_key,
            api_base: DEFAULT_API_BASE.to_string(),
            checkout_base: DEFAULT_CHECKOUT_BASE.to_string(),
        }
    }

    /// Read settings through `lookup`, e.g. `|name| std::env::var(name).ok()`.
    ///
    /// Reads `STRIPE_PUBLISHABLE_KEY`, `STRIPE_API_BASE` and `STRIPE_CHECKOUT_BASE`; blank
    /// origins fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPublishableKey`] if the key is unset or blank, and
    /// [`ConfigError::Invalid`] if an origin is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let publishable_key = lookup("STRIPE_PUBLISHABLE_KEY")
            .and_then(PublishableKey::new)
            .ok_or(ConfigError::MissingPublishableKey)?;

        let api_base = origin(lookup("STRIPE_API_BASE"), DEFAULT_API_BASE)?;
        let checkout_base = origin(lookup("STRIPE_CHECKOUT_BASE"), DEFAULT_CHECKOUT_BASE)?;

        Ok(Self {
            publishable_key,
            api_base,
            checkout_base,
        })
    }
}

fn origin(value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = value
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(ConfigError::Invalid(format!("{value} is not an http(s) origin")));
    }

    Ok(value)
}

/// HTTP client for the hosted checkout sessions API.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be initialised.
    pub fn new(config: StripeConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { config, http })
    }

    #[must_use]
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[tracing::instrument(
        name = "stripe.create_session",
        skip(self, request),
        fields(lines = request.line_items.len()),
        err
    )]
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, SessionError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.publishable_key.expose())
            .json(&SessionPayload::from(request))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            let body = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|parsed| parsed.error.message)
                .unwrap_or(text);

            warn!(%status, "session request rejected");

            return Err(SessionError::Rejected { status, body });
        }

        let parsed: SessionResponse = response
            .json()
            .await
            .map_err(|error| SessionError::MalformedResponse(error.to_string()))?;

        let id = parsed
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| SessionError::MalformedResponse("missing session id".to_string()))?;

        debug!(session = %id, "checkout session created");

        Ok(CheckoutSession {
            id,
            url: parsed.url.filter(|url| !url.trim().is_empty()),
        })
    }

    fn redirect_target(&self, session: &CheckoutSession) -> Result<RedirectTarget, RedirectError> {
        if session.id.trim().is_empty() {
            return Err(RedirectError::MissingSession);
        }

        if let Some(url) = &session.url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(RedirectError::InvalidTarget(url.clone()));
            }

            return Ok(RedirectTarget::new(url.clone()));
        }

        Ok(RedirectTarget::new(format!(
            "{}/c/pay/{}",
            self.config.checkout_base, session.id
        )))
    }
}
