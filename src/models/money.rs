//! Monetary value types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount in a given currency.
///
/// # Example
///
/// ```
/// use per_diem_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let money = Money::new(Decimal::new(15000, 2), "CZK");
/// assert_eq!(money.to_string(), "150.00 CZK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
}

impl Money {
    /// Creates a money value.
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// The result of one per-diem computation: the amount in the country's own
/// currency and the same amount converted to the reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyPair {
    /// Amount in the currency the allowance is defined in.
    pub original: Money,
    /// Amount in the reporting currency.
    pub converted: Money,
}
