//! Cart page application: payment provider integration, checkout flow and front-end plumbing.

pub mod checkout;
pub mod config;
pub mod context;
pub mod controller;
pub mod fixtures;
pub mod navigation;
pub mod observability;
pub mod payments;
pub mod render;
