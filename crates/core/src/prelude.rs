//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartSnapshot},
    checkout::{
        CallbackUrls, CheckoutFailure, CheckoutGate, CheckoutLineItem, CheckoutMode,
        CheckoutRequest, CheckoutRequestError, CheckoutState, CheckoutTicket,
    },
    entries::{CartEntry, EntryKey, Template, TemplateId, Tier},
    pricing::{FormattedPrice, TotalPriceError},
    quantity::{Quantity, QuantityError},
    store::{CartStore, InMemoryCartStore, SnapshotObserver, SubscriptionKey},
    view::{CartIntent, CartLine, CartPage, CheckoutButton, ErrorBanner, ItemizedCart},
};
