//! Checkout

pub mod gate;
pub mod request;
pub mod state;

pub use gate::{CheckoutGate, CheckoutTicket};
pub use request::{
    CallbackUrls, CheckoutLineItem, CheckoutMode, CheckoutRequest, CheckoutRequestError,
};
pub use state::{CheckoutFailure, CheckoutState};
