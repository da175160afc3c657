//! Process-wide Stripe client.
//!
//! Initialised from the environment on first use. A failed initialisation is not cached, so
//! fixing the environment and retrying works without a restart.

use std::sync::OnceLock;

use async_trait::async_trait;

use storefront::checkout::CheckoutRequest;

use crate::payments::{
    client::{StripeClient, StripeConfig},
    errors::{ConfigError, RedirectError, SessionError},
    provider::{CheckoutSession, PaymentProvider, RedirectTarget},
};

static CLIENT: OnceLock<StripeClient> = OnceLock::new();

/// Returns the shared client, initialising it on first use.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the environment does not describe a usable client. The next
/// call tries again.
pub fn client() -> Result<&'static StripeClient, ConfigError> {
    client_with(|name| std::env::var(name).ok())
}

fn client_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<&'static StripeClient, ConfigError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let config = StripeConfig::from_lookup(lookup)?;
    let client = StripeClient::new(config)?;

    tracing::debug!(api_base = %client.config().api_base, "payment client initialised");

    Ok(CLIENT.get_or_init(move || client))
}

/// [`PaymentProvider`] backed by the shared client.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalStripe;

#[async_trait]
impl PaymentProvider for GlobalStripe {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, SessionError> {
        client()?.create_session(request).await
    }

    fn redirect_target(&self, session: &CheckoutSession) -> Result<RedirectTarget, RedirectError> {
        let client = client().map_err(|error| RedirectError::InvalidTarget(error.to_string()))?;

        client.redirect_target(session)
    }
}
