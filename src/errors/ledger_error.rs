use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Not enough funds available: requested {requested}, holding {held}")]
    InsufficientFunds { requested: Decimal, held: Decimal },
    #[error("Quantity must not be negative, got {quantity} at {timestamp}")]
    NegativeQuantity {
        quantity: Decimal,
        timestamp: DateTime<Utc>,
    },
    #[error("Arithmetic overflow while computing the {what}")]
    Overflow { what: &'static str },
}
