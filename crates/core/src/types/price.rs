//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices are fixed-point decimals, never floats. All cart and checkout
//! arithmetic goes through [`rust_decimal::Decimal`] so that `12.99 * 2` is
//! exactly `25.98`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Prices must not be negative.
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in US dollars.
///
/// MillBrook Pizza only trades in USD, so no currency code is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount multiplied by a quantity, for line subtotals.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }

    /// A zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }
}

impl std::fmt::Display for Price {
    /// Format for display with a dollar sign and two decimal places
    /// (e.g., `$12.99`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
