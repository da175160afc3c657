//! Shopper intents raised by the cart page.

use tracing::warn;

use crate::{
    entries::EntryKey,
    quantity::{Quantity, QuantityError},
    store::CartStore,
};

/// Something the shopper did on the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    /// A quantity was picked, carried in its textual form.
    SelectQuantity {
        /// Line the selector belongs to
        key: EntryKey,

        /// Selected option value
        value: String,
    },

    /// The removal control was activated.
    Remove {
        /// Line to remove
        key: EntryKey,
    },

    /// The checkout control was activated.
    Checkout,

    /// The failure banner was dismissed.
    DismissError,
}

/// Parse the selected value and forward it to the store as a single quantity update.
///
/// # Errors
///
/// Returns a [`QuantityError`] and leaves the store untouched if the value is not a selectable
/// quantity.
pub fn select_quantity(
    store: &dyn CartStore,
    key: &EntryKey,
    value: &str,
) -> Result<Quantity, QuantityError> {
    let quantity = value.parse::<Quantity>().inspect_err(|error| {
        warn!(entry = %key, value, %error, "ignoring quantity selection");
    })?;

    store.update_quantity(&key.template, &key.tier, quantity);

    Ok(quantity)
}

/// Forward a removal to the store. No confirmation step.
pub fn remove(store: &dyn CartStore, key: &EntryKey) {
    store.remove_item(&key.template, &key.tier);
}
