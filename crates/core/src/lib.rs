//! Storefront
//!
//! Shopping cart domain for the storefront: cart entries and quantities, the observable cart
//! store, the hosted-checkout request, the checkout state machine and the cart page view model.

pub mod cart;
pub mod checkout;
pub mod entries;
pub mod prelude;
pub mod pricing;
pub mod quantity;
pub mod store;
pub mod view;
