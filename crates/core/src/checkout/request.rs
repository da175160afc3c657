//! Checkout Request
//!
//! Ephemeral payload describing the cart to the payment provider. Built at checkout time and
//! dropped as soon as the session request has been sent.

use thiserror::Error;

use crate::{cart::CartSnapshot, quantity::Quantity};

/// Placeholder the provider replaces with the created session id.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Errors raised while building a checkout request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutRequestError {
    /// There is nothing to pay for.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// Kind of hosted checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutMode {
    /// One-off payment.
    #[default]
    Payment,
}

impl CheckoutMode {
    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
        }
    }
}

/// Where the provider sends the shopper after the hosted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUrls {
    /// Success URL, carrying the session id placeholder.
    pub success_url: String,

    /// Cancel URL, pointing back to the cart page.
    pub cancel_url: String,
}

impl CallbackUrls {
    /// Build callback URLs for a storefront origin such as `https://shop.example`.
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');

        Self {
            success_url: format!("{origin}/success?session_id={SESSION_ID_PLACEHOLDER}"),
            cancel_url: format!("{origin}/cart"),
        }
    }
}

/// One priced line of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineItem {
    /// `"{title} - {tier}"`
    pub display_name: String,

    /// Unit price in minor currency units.
    pub unit_amount_minor: i64,

    /// Lowercase ISO currency code.
    pub currency: String,

    /// Number of units.
    pub quantity: Quantity,
}

/// Payment-session request built from a cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Session mode
    pub mode: CheckoutMode,

    /// Success callback
    pub success_url: String,

    /// Cancel callback
    pub cancel_url: String,

    /// Priced lines, in cart order
    pub line_items: Vec<CheckoutLineItem>,
}

impl CheckoutRequest {
    /// Build a request with one line per cart entry.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutRequestError::EmptyCart`] if the snapshot has no entries.
    pub fn from_snapshot(
        snapshot: &CartSnapshot,
        callbacks: &CallbackUrls,
    ) -> Result<Self, CheckoutRequestError> {
        if snapshot.is_empty() {
            return Err(CheckoutRequestError::EmptyCart);
        }

        let currency = snapshot.currency().iso_alpha_code.to_ascii_lowercase();

        let line_items = snapshot
            .iter()
            .map(|entry| CheckoutLineItem {
                display_name: entry.display_name(),
                unit_amount_minor: entry.unit_price().to_minor_units(),
                currency: currency.clone(),
                quantity: entry.quantity(),
            })
            .collect();

        Ok(Self {
            mode: CheckoutMode::Payment,
            success_url: callbacks.success_url.clone(),
            cancel_url: callbacks.cancel_url.clone(),
            line_items,
        })
    }
}
