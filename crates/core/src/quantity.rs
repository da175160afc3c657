//! Quantities

use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised when a quantity cannot be produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// The value was outside the selectable range.
    #[error("quantity {0} is outside the range 1..=10")]
    OutOfRange(i64),

    /// The text could not be parsed as an integer.
    #[error("invalid quantity: {0:?}")]
    Invalid(String),
}

/// Number of units of a cart entry, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u8);

impl Quantity {
    /// Smallest selectable quantity.
    pub const MIN: u8 = 1;

    /// Largest selectable quantity.
    pub const MAX: u8 = 10;

    /// A single unit.
    pub const ONE: Quantity = Quantity(1);

    /// Create a quantity, rejecting values outside `1..=10`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] when `value` is not selectable.
    pub fn new(value: u8) -> Result<Self, QuantityError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuantityError::OutOfRange(i64::from(value)))
        }
    }

    /// Every selectable quantity, ascending.
    pub fn options() -> SmallVec<[Quantity; 10]> {
        (Self::MIN..=Self::MAX).map(Quantity).collect()
    }

    /// Returns the raw number of units.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Adds two quantities, clamping at [`Quantity::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.0).min(Self::MAX))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let value = trimmed
            .parse::<i64>()
            .map_err(|_err| QuantityError::Invalid(s.to_string()))?;

        u8::try_from(value)
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or(QuantityError::OutOfRange(value))
    }
}

impl TryFrom<u8> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        i64::from(quantity.0)
    }
}
