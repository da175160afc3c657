//! Payments

pub mod client;
pub mod errors;
pub mod global;
pub mod provider;
pub mod secret;
mod wire;

pub use client::{StripeClient, StripeConfig};
pub use errors::{ConfigError, RedirectError, SessionError};
pub use global::GlobalStripe;
pub use provider::{CheckoutSession, MockPaymentProvider, PaymentProvider, RedirectTarget};
pub use secret::PublishableKey;
