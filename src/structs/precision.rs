use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ConfigError;

/* Working precision of the profit arithmetic, in significant digits.

It is handed to every Holding when it is created, there is no process wide decimal context.
Quantities are never rounded, only the profit products and their running sum. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalPrecision {
    significant_digits: u32,
}

impl DecimalPrecision {
    pub const DEFAULT_DIGITS: u32 = 8;

    pub fn new(significant_digits: u32) -> Result<Self, ConfigError> {
        // Decimal can't hold more than 28 significant digits
        if significant_digits == 0 || significant_digits > 28 {
            return Err(ConfigError::InvalidValue {
                key: "precision",
                value: significant_digits.to_string(),
                reason: String::from("expected between 1 and 28 significant digits"),
            });
        }
        Ok(DecimalPrecision { significant_digits })
    }

    pub fn significant_digits(&self) -> u32 {
        self.significant_digits
    }

    /* Round half to even, like a decimal context would do after each operation.
    Rounding pads with zeros up to the digit count, they are stripped again. */
    pub fn apply(&self, value: Decimal) -> Decimal {
        value
            .round_sf_with_strategy(self.significant_digits, RoundingStrategy::MidpointNearestEven)
            .unwrap_or(value)
            .normalize()
    }

    /* None when the exact result doesn't fit in a Decimal */
    pub fn mul(&self, a: Decimal, b: Decimal) -> Option<Decimal> {
        a.checked_mul(b).map(|v| self.apply(v))
    }

    pub fn add(&self, a: Decimal, b: Decimal) -> Option<Decimal> {
        a.checked_add(b).map(|v| self.apply(v))
    }

    pub fn sub(&self, a: Decimal, b: Decimal) -> Option<Decimal> {
        a.checked_sub(b).map(|v| self.apply(v))
    }
}

impl Default for DecimalPrecision {
    fn default() -> Self {
        DecimalPrecision {
            significant_digits: Self::DEFAULT_DIGITS,
        }
    }
}
