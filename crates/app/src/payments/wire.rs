//! Hosted checkout session wire format.

use serde::{Deserialize, Serialize};

use storefront::checkout::{CheckoutLineItem, CheckoutRequest};

#[derive(Debug, Serialize)]
pub(crate) struct SessionPayload<'a> {
    mode: &'static str,
    success_url: &'a str,
    cancel_url: &'a str,
    line_items: Vec<LineItemPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct LineItemPayload<'a> {
    price_data: PriceData<'a>,
    quantity: u8,
}

#[derive(Debug, Serialize)]
struct PriceData<'a> {
    currency: &'a str,
    product_data: ProductData<'a>,
    unit_amount: i64,
}

#[derive(Debug, Serialize)]
struct ProductData<'a> {
    name: &'a str,
}

impl<'a> From<&'a CheckoutRequest> for SessionPayload<'a> {
    fn from(request: &'a CheckoutRequest) -> Self {
        Self {
            mode: request.mode.as_str(),
            success_url: &request.success_url,
            cancel_url: &request.cancel_url,
            line_items: request.line_items.iter().map(LineItemPayload::from).collect(),
        }
    }
}

impl<'a> From<&'a CheckoutLineItem> for LineItemPayload<'a> {
    fn from(item: &'a CheckoutLineItem) -> Self {
        Self {
            price_data: PriceData {
                currency: &item.currency,
                product_data: ProductData {
                    name: &item.display_name,
                },
                unit_amount: item.unit_amount_minor,
            },
            quantity: item.quantity.get(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    #[serde(default)]
    pub(crate) id: Option<String>,

    #[serde(default)]
    pub(crate) url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
}
