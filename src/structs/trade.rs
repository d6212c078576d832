use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::CurrencyPair;

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum TradeDirection {
    Acquisition,
    Disposal,
}

impl TradeDirection {
    /* The exports only mark buys, everything else is a sale */
    pub fn from_export(value: &str) -> Self {
        if value == "buy" {
            TradeDirection::Acquisition
        } else {
            TradeDirection::Disposal
        }
    }
}

/* One line of the exchange export. volume is in base currency, price in counter currency per unit of base */
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub pair: CurrencyPair,
    pub volume: Decimal,
    pub price: Decimal,
    pub direction: TradeDirection,
}

impl Trade {
    pub fn is_acquisition(&self) -> bool {
        self.direction == TradeDirection::Acquisition
    }
}
