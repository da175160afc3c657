//! Cart Fixtures
//!
//! YAML cart files used by the command line front end.

use std::{fs, io, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront::{
    cart::{CartError, CartSnapshot},
    entries::{CartEntry, Template, TemplateId, Tier},
    quantity::{Quantity, QuantityError},
};

/// Errors that can occur while reading or writing a cart fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to access cart file")]
    Io(#[from] io::Error),

    #[error("failed to parse cart file")]
    Yaml(#[from] serde_norway::Error),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Cart file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartFixture {
    /// ISO currency code shared by every item
    pub currency: String,

    /// Items in cart order
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFixture {
    pub template: TemplateFixture,
    pub tier: String,

    /// Unit price in major units, e.g. `"10.00"`
    pub price: String,

    pub quantity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFixture {
    pub id: String,
    pub title: String,
    pub image: String,
}

impl CartFixture {
    /// Read a cart file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cart fixture.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Write the cart file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be serialised or written.
    pub fn save(&self, path: &Path) -> Result<(), FixtureError> {
        let contents = serde_norway::to_string(self)?;

        fs::write(path, contents)?;

        Ok(())
    }

    /// Build the snapshot this fixture describes.
    ///
    /// # Errors
    ///
    /// Returns an error if a price, currency or quantity is invalid, or if the items do not
    /// form a valid cart.
    pub fn to_snapshot(&self) -> Result<CartSnapshot, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let entries = self
            .items
            .iter()
            .map(|item| -> Result<CartEntry, FixtureError> {
                Ok(CartEntry::new(
                    Template {
                        id: TemplateId::new(item.template.id.clone()),
                        title: item.template.title.clone(),
                        image: item.template.image.clone(),
                    },
                    Tier::new(item.tier.clone()),
                    Money::from_minor(parse_price(&item.price)?, currency),
                    Quantity::try_from(item.quantity)?,
                ))
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(CartSnapshot::with_entries(entries, currency)?)
    }

    /// Describe a snapshot as a fixture.
    #[must_use]
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        Self {
            currency: snapshot.currency().iso_alpha_code.to_string(),
            items: snapshot
                .iter()
                .map(|entry| {
                    let template = entry.template();

                    ItemFixture {
                        template: TemplateFixture {
                            id: template.id.as_str().to_string(),
                            title: template.title.clone(),
                            image: template.image.clone(),
                        },
                        tier: entry.tier().as_str().to_string(),
                        price: Decimal::new(entry.unit_price().to_minor_units(), 2).to_string(),
                        quantity: entry.quantity().get(),
                    }
                })
                .collect(),
        }
    }
}

/// Parse a major-unit price string (e.g. `"19.99"`) into minor units.
///
/// # Errors
///
/// Returns an error if the amount is not a non-negative decimal that fits in minor units.
pub fn parse_price(s: &str) -> Result<i64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))
}

fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const CART: &str = r#"
currency: USD
items:
  - template: { id: a, title: Poster, image: /images/poster.png }
    tier: standard
    price: "19.99"
    quantity: 2
  - template: { id: b, title: Flyer, image: /images/flyer.png }
    tier: premium
    price: "5"
    quantity: 1
"#;

    #[test]
    fn parses_fixture_into_snapshot() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str(CART)?;
        let snapshot = fixture.to_snapshot()?;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.total()?.to_minor_units(), 44_98);

        Ok(())
    }

    #[test]
    fn saved_fixture_reloads_identically() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.yml");

        let snapshot = serde_norway::from_str::<CartFixture>(CART)?.to_snapshot()?;

        CartFixture::from_snapshot(&snapshot).save(&path)?;

        let reloaded = CartFixture::load(&path)?;

        assert_eq!(reloaded.items[1].price, "5.00");
        assert_eq!(reloaded.to_snapshot()?, snapshot);

        Ok(())
    }

    #[test]
    fn missing_items_is_an_empty_cart() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str("currency: GBP\n")?;

        assert!(fixture.to_snapshot()?.is_empty());

        Ok(())
    }

    #[test]
    fn rejects_bad_prices_and_quantities() -> TestResult {
        assert!(matches!(parse_price("-1.00"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("ten"), Err(FixtureError::InvalidPrice(_))));
        assert_eq!(parse_price("2.999")?, 300);

        let mut fixture: CartFixture = serde_norway::from_str(CART)?;

        fixture.items[0].quantity = 11;

        assert!(matches!(fixture.to_snapshot(), Err(FixtureError::Quantity(_))));

        Ok(())
    }

    #[test]
    fn rejects_unknown_currency() -> TestResult {
        let fixture: CartFixture = serde_norway::from_str("currency: XYZ\nitems: []\n")?;

        assert!(matches!(
            fixture.to_snapshot(),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));

        Ok(())
    }
}
