//! Payment provider seam.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;

use storefront::checkout::CheckoutRequest;

use crate::payments::errors::{RedirectError, SessionError};

/// Hosted checkout session created by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Provider session identifier
    pub id: String,

    /// Hosted page URL, when the provider returns one
    pub url: Option<String>,
}

/// Absolute URL of the hosted checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creates hosted checkout sessions.
#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a session for the request.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the provider is unreachable, rejects the request, or
    /// answers with something that is not a session.
    async fn create_session(&self, request: &CheckoutRequest)
    -> Result<CheckoutSession, SessionError>;

    /// Resolve where the shopper should be sent for a session.
    ///
    /// # Errors
    ///
    /// Returns a [`RedirectError`] if the session cannot be turned into a URL.
    fn redirect_target(&self, session: &CheckoutSession) -> Result<RedirectTarget, RedirectError>;
}
