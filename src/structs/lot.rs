use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/* An acquisition that hasn't been fully disposed yet.
Only the quantity changes over its life, price and timestamp stay the ones of the acquisition. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lot {
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/* The part of a lot consumed by a disposal */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumedSlice {
    pub amount: Decimal,
    pub lot_price: Decimal,
    pub lot_timestamp: DateTime<Utc>,
}

impl ConsumedSlice {
    pub fn from_lot(lot: &Lot, amount: Decimal) -> Self {
        ConsumedSlice {
            amount,
            lot_price: lot.price,
            lot_timestamp: lot.timestamp,
        }
    }
}

/* Result of a disposal: the slices in consumption order and the realized profit in counter currency */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposal {
    pub consumed: Vec<ConsumedSlice>,
    pub profit: Decimal,
}

impl Disposal {
    pub fn empty() -> Self {
        Disposal {
            consumed: Vec::new(),
            profit: Decimal::ZERO,
        }
    }

    pub fn consumed_amount(&self) -> Decimal {
        self.consumed.iter().map(|slice| slice.amount).sum()
    }
}
