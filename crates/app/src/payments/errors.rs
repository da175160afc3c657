//! Payment provider errors.

use reqwest::StatusCode;
use thiserror::Error;

/// The payment client could not be initialised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("payment provider publishable key is missing")]
    MissingPublishableKey,

    #[error("invalid payment configuration: {0}")]
    Invalid(String),

    #[error("failed to build http client")]
    HttpClient(#[source] reqwest::Error),
}

/// Creating a hosted checkout session failed.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("payment provider is not configured: {0}")]
    Unconfigured(#[from] ConfigError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("malformed session response: {0}")]
    MalformedResponse(String),
}

/// The shopper could not be sent to the hosted checkout page.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("checkout session has no identifier")]
    MissingSession,

    #[error("invalid redirect target: {0}")]
    InvalidTarget(String),

    #[error("navigation failed: {0}")]
    Navigation(#[from] crate::navigation::NavigationError),
}
