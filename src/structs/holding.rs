use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::LedgerError;

use super::{ConsumedSlice, DecimalPrecision, Disposal, Lot};

/* FIFO ledger of one currency.

Lots are kept oldest first. `total` is always the sum of the lot quantities, and every lot
in the queue has a strictly positive quantity.

acquire -> push a new lot (at the tail in practice, trades come in chronological order)
dispose -> consume lots from the head, splitting the last one if needed, and compute the profit
*/
#[derive(Debug, Clone)]
pub struct Holding {
    lots: VecDeque<Lot>,
    total: Decimal,
    precision: DecimalPrecision,
}

impl Holding {
    pub fn new(precision: DecimalPrecision) -> Self {
        Holding {
            lots: VecDeque::new(),
            total: Decimal::ZERO,
            precision,
        }
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn precision(&self) -> DecimalPrecision {
        self.precision
    }

    pub fn acquire(
        &mut self,
        quantity: Decimal,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if quantity < Decimal::ZERO {
            return Err(LedgerError::NegativeQuantity {
                quantity,
                timestamp,
            });
        }
        if quantity.is_zero() {
            debug!(%price, %timestamp, "ignoring zero quantity acquisition");
            return Ok(());
        }

        let total = self
            .total
            .checked_add(quantity)
            .ok_or(LedgerError::Overflow { what: "held quantity" })?;

        let lot = Lot {
            quantity,
            price,
            timestamp,
        };
        match self.lots.back() {
            Some(last) if last.timestamp > timestamp => {
                warn!(%timestamp, last = %last.timestamp, "acquisition older than the newest lot, inserting in order");
                // after every lot with the same or an earlier timestamp
                let index = self.lots.partition_point(|l| l.timestamp <= timestamp);
                self.lots.insert(index, lot);
            }
            _ => self.lots.push_back(lot),
        }
        self.total = total;
        Ok(())
    }

    /* Consume `quantity` from the oldest lots.

    Slices and profit are computed first, lots are only consumed once nothing can fail anymore,
    so a failed disposal leaves the holding as it was. */
    pub fn dispose(
        &mut self,
        quantity: Decimal,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Disposal, LedgerError> {
        if quantity < Decimal::ZERO {
            return Err(LedgerError::NegativeQuantity {
                quantity,
                timestamp,
            });
        }
        if quantity > self.total {
            return Err(LedgerError::InsufficientFunds {
                requested: quantity,
                held: self.total,
            });
        }

        let mut disposal = Disposal::empty();
        let mut needed = quantity;
        // total >= needed guarantees enough lots to cover it
        for lot in self.lots.iter() {
            if needed.is_zero() {
                break;
            }
            let amount = lot.quantity.min(needed);
            disposal.profit = self.realize(disposal.profit, amount, price, lot.price)?;
            disposal.consumed.push(ConsumedSlice::from_lot(lot, amount));
            needed -= amount;
        }

        for slice in &disposal.consumed {
            match self.lots.front_mut() {
                // only the last slice can leave something in its lot
                Some(head) if head.quantity > slice.amount => head.quantity -= slice.amount,
                _ => {
                    self.lots.pop_front();
                }
            }
        }
        self.total -= quantity;
        Ok(disposal)
    }

    /* profit + amount * (sell_price - lot_price), rounded at each step */
    fn realize(
        &self,
        profit: Decimal,
        amount: Decimal,
        sell_price: Decimal,
        lot_price: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.precision
            .sub(sell_price, lot_price)
            .and_then(|diff| self.precision.mul(amount, diff))
            .and_then(|gain| self.precision.add(profit, gain))
            .ok_or(LedgerError::Overflow { what: "profit" })
    }
}

impl Default for Holding {
    fn default() -> Self {
        Holding::new(DecimalPrecision::default())
    }
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quantity: {}, lots: {}", self.total, self.lots.len())
    }
}
