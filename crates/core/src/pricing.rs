//! Prices

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::entries::CartEntry;

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total did not fit in minor units.
    #[error("line total overflowed for {0}")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `unit_price × quantity` for a single entry.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total(entry: &CartEntry) -> Result<Money<'static, Currency>, TotalPriceError> {
    let unit = entry.unit_price();

    let minor_units = unit
        .to_minor_units()
        .checked_mul(i64::from(entry.quantity()))
        .ok_or_else(|| TotalPriceError::Overflow(entry.key().to_string()))?;

    Ok(Money::from_minor(minor_units, unit.currency()))
}

/// Calculates the sum of every line total, in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total did not fit in minor units.
/// - [`TotalPriceError::Money`]: an entry was priced in another currency.
pub fn total_price(
    entries: &[CartEntry],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let total = entries
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, entry| {
            Ok::<_, TotalPriceError>(acc.add(line_total(entry)?)?)
        })?;

    Ok(total)
}

/// A money amount rendered with exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrice {
    amount: String,
    symbol: &'static str,
    code: &'static str,
}

impl FormattedPrice {
    /// Format the given money value.
    pub fn from_money(money: &Money<'_, Currency>) -> Self {
        let currency = money.currency();
        let code = currency.iso_alpha_code;

        Self {
            amount: format_amount(money.to_minor_units(), currency.exponent),
            symbol: currency_symbol(code),
            code,
        }
    }

    /// The bare amount, e.g. `"44.98"`.
    pub fn amount(&self) -> &str {
        &self.amount
    }
}

impl fmt::Display for FormattedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{} {}", self.amount, self.code)
        } else if let Some(unsigned) = self.amount.strip_prefix('-') {
            write!(f, "-{}{unsigned}", self.symbol)
        } else {
            write!(f, "{}{}", self.symbol, self.amount)
        }
    }
}

/// Format a minor-unit amount as major units with two decimals.
///
/// `exponent` is the number of minor-unit digits of the currency: 2 for USD, 0 for JPY.
pub fn format_amount(minor_units: i64, exponent: u32) -> String {
    let major_units = Decimal::try_new(minor_units, exponent)
        .unwrap_or_else(|_| Decimal::from(minor_units))
        .round_dp(2);

    format!("{major_units:.2}")
}

fn currency_symbol(code: &str) -> &'static str {
    match code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{CHF, GBP, JPY, USD};
    use testresult::TestResult;

    use crate::{
        entries::{Template, TemplateId, Tier},
        quantity::Quantity,
    };

    use super::*;

    fn entry(id: &str, minor: i64, quantity: u8) -> Result<CartEntry, crate::quantity::QuantityError> {
        Ok(CartEntry::new(
            Template {
                id: TemplateId::new(id),
                title: id.to_uppercase(),
                image: String::new(),
            },
            Tier::new("standard"),
            Money::from_minor(minor, USD),
            Quantity::new(quantity)?,
        ))
    }

    #[test]
    fn total_price_sums_price_times_quantity() -> TestResult {
        let entries = [entry("a", 19_99, 2)?, entry("b", 5_00, 1)?];

        let total = total_price(&entries, USD)?;

        assert_eq!(total, Money::from_minor(44_98, USD));
        assert_eq!(FormattedPrice::from_money(&total).amount(), "44.98");

        Ok(())
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_price(&[], USD)?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn total_price_rejects_mixed_currencies() -> TestResult {
        let entries = [entry("a", 1_00, 1)?];

        assert!(matches!(
            total_price(&entries, GBP),
            Err(TotalPriceError::Money(_))
        ));

        Ok(())
    }

    #[test]
    fn format_amount_always_has_two_decimals() {
        assert_eq!(format_amount(0, 2), "0.00");
        assert_eq!(format_amount(5, 2), "0.05");
        assert_eq!(format_amount(10_00, 2), "10.00");
        assert_eq!(format_amount(-1_50, 2), "-1.50");
    }

    #[test]
    fn format_amount_scales_by_currency_exponent() {
        assert_eq!(format_amount(1_000, 0), "1000.00");
        assert_eq!(format_amount(1_234, 3), "1.23");
        assert_eq!(format_amount(-7, 0), "-7.00");
    }

    #[test]
    fn zero_decimal_currency_is_not_divided_by_one_hundred() {
        let price = FormattedPrice::from_money(&Money::from_minor(1_000, JPY));

        assert_eq!(price.amount(), "1000.00");
        assert_eq!(price.to_string(), "1000.00 JPY");
    }

    #[test]
    fn formatted_price_display_uses_symbol_or_code() {
        assert_eq!(
            FormattedPrice::from_money(&Money::from_minor(12_34, USD)).to_string(),
            "$12.34"
        );
        assert_eq!(
            FormattedPrice::from_money(&Money::from_minor(-2_00, GBP)).to_string(),
            "-£2.00"
        );
        assert_eq!(
            FormattedPrice::from_money(&Money::from_minor(1_00, CHF)).to_string(),
            "1.00 CHF"
        );
    }
}
