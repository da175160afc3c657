//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    entries::{CartEntry, EntryKey, Tier, TemplateId},
    pricing::{TotalPriceError, total_price},
};

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An entry's currency differs from the cart currency (index, entry currency, cart currency).
    #[error("Entry {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Two entries share the same template and tier.
    #[error("Duplicate cart entry {0}")]
    DuplicateEntry(EntryKey),

    /// The total could not be calculated.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}

/// Ordered entries currently held by a cart.
///
/// The total is always derived from the entries and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    entries: Vec<CartEntry>,
    currency: &'static Currency,
}

impl CartSnapshot {
    /// Create an empty snapshot in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            entries: Vec::new(),
            currency,
        }
    }

    /// Create a snapshot with the given entries.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an entry is in another currency, or if two entries share a key.
    pub fn with_entries(
        entries: impl Into<Vec<CartEntry>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let entries = entries.into();

        for (i, entry) in entries.iter().enumerate() {
            check_currency(i, entry, currency)?;

            let duplicated = entries
                .iter()
                .take(i)
                .any(|earlier| earlier.is_keyed_by(&entry.template().id, entry.tier()));

            if duplicated {
                return Err(CartError::DuplicateEntry(entry.key()));
            }
        }

        Ok(Self { entries, currency })
    }

    /// Sum of `unit_price × quantity` over every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Total`] if the money arithmetic fails.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        Ok(total_price(&self.entries, self.currency)?)
    }

    /// Look up an entry by template and tier.
    pub fn get(&self, template: &TemplateId, tier: &Tier) -> Option<&CartEntry> {
        self.entries
            .iter()
            .find(|entry| entry.is_keyed_by(template, tier))
    }

    /// Iterate over the entries in cart order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub(crate) fn push(&mut self, entry: CartEntry) -> Result<(), CartError> {
        check_currency(self.entries.len(), &entry, self.currency)?;

        self.entries.push(entry);

        Ok(())
    }

    pub(crate) fn get_mut(&mut self, template: &TemplateId, tier: &Tier) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.is_keyed_by(template, tier))
    }

    pub(crate) fn remove(&mut self, template: &TemplateId, tier: &Tier) -> Option<CartEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.is_keyed_by(template, tier))?;

        Some(self.entries.remove(position))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

fn check_currency(
    index: usize,
    entry: &CartEntry,
    currency: &'static Currency,
) -> Result<(), CartError> {
    let entry_currency = entry.unit_price().currency();

    if entry_currency == currency {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch(
            index,
            entry_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::{entries::Template, quantity::Quantity};

    use super::*;

    fn entry(id: &str, tier: &str, minor: i64) -> CartEntry {
        CartEntry::new(
            Template {
                id: TemplateId::new(id),
                title: id.to_uppercase(),
                image: format!("/images/{id}.png"),
            },
            Tier::new(tier),
            Money::from_minor(minor, USD),
            Quantity::ONE,
        )
    }

    #[test]
    fn new_snapshot_is_empty_with_zero_total() -> TestResult {
        let snapshot = CartSnapshot::new(USD);

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn with_entries_currency_mismatch_errors() {
        let result = CartSnapshot::with_entries([entry("a", "standard", 100)], GBP);

        match result {
            Err(CartError::CurrencyMismatch(idx, entry_currency, cart_currency)) => {
                assert_eq!(idx, 0);
                assert_eq!(entry_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn with_entries_rejects_duplicate_keys() {
        let result = CartSnapshot::with_entries(
            [entry("a", "standard", 100), entry("a", "standard", 200)],
            USD,
        );

        assert!(
            matches!(result, Err(CartError::DuplicateEntry(ref key)) if key.to_string() == "a-standard"),
            "expected DuplicateEntry, got {result:?}"
        );
    }

    #[test]
    fn same_template_in_two_tiers_is_allowed() -> TestResult {
        let snapshot = CartSnapshot::with_entries(
            [entry("a", "standard", 100), entry("a", "extended", 300)],
            USD,
        )?;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.total()?, Money::from_minor(400, USD));

        Ok(())
    }

    #[test]
    fn get_finds_by_template_and_tier() -> TestResult {
        let snapshot = CartSnapshot::with_entries(
            [entry("a", "standard", 100), entry("b", "standard", 200)],
            USD,
        )?;

        let found = snapshot.get(&TemplateId::new("b"), &Tier::new("standard"));

        assert_eq!(found.map(|e| e.unit_price().to_minor_units()), Some(200));
        assert!(snapshot.get(&TemplateId::new("b"), &Tier::new("pro")).is_none());

        Ok(())
    }

    #[test]
    fn remove_keeps_order_of_remaining_entries() -> TestResult {
        let mut snapshot = CartSnapshot::with_entries(
            [
                entry("a", "standard", 100),
                entry("b", "standard", 200),
                entry("c", "standard", 300),
            ],
            USD,
        )?;

        let removed = snapshot.remove(&TemplateId::new("b"), &Tier::new("standard"));

        assert!(removed.is_some());

        let ids: Vec<&str> = snapshot.iter().map(|e| e.template().id.as_str()).collect();

        assert_eq!(ids, vec!["a", "c"]);

        Ok(())
    }
}
