/* Batch calculation of the realized gains.

Trades are sorted by time (stable, so trades with the same timestamp keep the file order), then each one
goes to the holding of its base currency. Holdings are created the first time a currency shows up.

Each disposal is reported as soon as it is computed: if a later trade fails, what was already
reported stays visible.
*/
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    errors::{AnalyzeError, LedgerError},
    structs::{Config, ConsumedSlice, Currency, Holding, Trade},
};

use super::Reporter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisposalRecord {
    pub currency: Currency,
    pub counter: Currency,
    pub timestamp: DateTime<Utc>,
    pub volume: Decimal,
    pub price: Decimal,
    pub profit: Decimal,
    pub consumed: Vec<ConsumedSlice>,
}

/* State of a holding at the end of the run */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldingSummary {
    pub currency: Currency,
    pub realized_profit: Decimal,
    pub remaining: Decimal,
    pub open_lots: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub reporting_currency: Currency,
    pub disposals: Vec<DisposalRecord>,
    pub holdings: Vec<HoldingSummary>,
}

pub fn analyze<R: Reporter>(
    mut trades: Vec<Trade>,
    config: &Config,
    reporter: &mut R,
) -> Result<AnalysisReport, AnalyzeError> {
    info!(trades = trades.len(), "analyzing trades");
    trades.sort_by_key(|trade| trade.timestamp);

    let mut holdings: HashMap<Currency, Holding> = HashMap::new();
    let mut realized: HashMap<Currency, Decimal> = HashMap::new();
    let mut disposals = Vec::new();

    for trade in trades {
        let pair = &trade.pair;
        if pair.counter != config.reporting_currency {
            // No conversion is done, the profit stays in the counter currency
            warn!(
                "pair {pair} is not priced in {}, its profit is not converted",
                config.reporting_currency
            );
        }

        let currency = &pair.base;
        let holding = holdings
            .entry(currency.clone())
            .or_insert_with(|| Holding::new(config.precision));

        if trade.is_acquisition() {
            debug!(%currency, volume = %trade.volume, price = %trade.price, "acquire");
            holding
                .acquire(trade.volume, trade.price, trade.timestamp)
                .map_err(|source| AnalyzeError::Ledger {
                    currency: currency.to_string(),
                    source,
                })?;
        } else {
            debug!(%currency, volume = %trade.volume, price = %trade.price, "dispose");
            let disposal = holding
                .dispose(trade.volume, trade.price, trade.timestamp)
                .map_err(|source| AnalyzeError::Ledger {
                    currency: currency.to_string(),
                    source,
                })?;

            let total = realized.entry(currency.clone()).or_insert(Decimal::ZERO);
            *total = holding
                .precision()
                .add(*total, disposal.profit)
                .ok_or_else(|| AnalyzeError::Ledger {
                    currency: currency.to_string(),
                    source: LedgerError::Overflow {
                        what: "realized profit",
                    },
                })?;

            let record = DisposalRecord {
                currency: currency.clone(),
                counter: pair.counter.clone(),
                timestamp: trade.timestamp,
                volume: trade.volume,
                price: trade.price,
                profit: disposal.profit,
                consumed: disposal.consumed,
            };
            reporter.report_disposal(&record)?;
            disposals.push(record);
        }
        debug!(%currency, %holding, "holding updated");
    }

    let mut summaries: Vec<HoldingSummary> = holdings
        .iter()
        .map(|(currency, holding)| HoldingSummary {
            currency: currency.clone(),
            realized_profit: realized.get(currency).copied().unwrap_or(Decimal::ZERO),
            remaining: holding.total(),
            open_lots: holding.len(),
        })
        .collect();
    summaries.sort_by(|a, b| a.currency.cmp(&b.currency));

    let report = AnalysisReport {
        reporting_currency: config.reporting_currency.clone(),
        disposals,
        holdings: summaries,
    };
    reporter.finish(&report)?;
    info!(disposals = report.disposals.len(), "analysis done");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use crate::structs::{CurrencyPair, TradeDirection};

    use super::*;

    /* Keeps what it receives so the tests can check what was reported and when */
    #[derive(Default)]
    struct Recorder {
        disposals: Vec<DisposalRecord>,
        finished: bool,
    }

    impl Reporter for Recorder {
        fn report_disposal(&mut self, record: &DisposalRecord) -> std::io::Result<()> {
            self.disposals.push(record.clone());
            Ok(())
        }

        fn finish(&mut self, _report: &AnalysisReport) -> std::io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn trade(day: u32, base: &str, counter: &str, volume: Decimal, price: Decimal, buy: bool) -> Trade {
        Trade {
            timestamp: Utc.with_ymd_and_hms(2017, 1, day, 12, 0, 0).unwrap(),
            pair: CurrencyPair {
                base: Currency::new(base),
                counter: Currency::new(counter),
            },
            volume,
            price,
            direction: if buy {
                TradeDirection::Acquisition
            } else {
                TradeDirection::Disposal
            },
        }
    }

    #[test]
    fn test_trades_are_sorted_before_processing() {
        // the sale comes first in the file but last in time
        let trades = vec![
            trade(3, "BT", "EUR", dec!(4), dec!(300), false),
            trade(2, "BT", "EUR", dec!(3), dec!(200), true),
            trade(1, "BT", "EUR", dec!(2), dec!(100), true),
        ];
        let mut recorder = Recorder::default();
        let report = analyze(trades, &Config::default(), &mut recorder).unwrap();

        assert_eq!(recorder.disposals.len(), 1);
        assert!(recorder.finished);
        let record = &report.disposals[0];
        assert_eq!(record.currency, Currency::new("BT"));
        assert_eq!(record.profit, dec!(600));
        assert_eq!(record.consumed.len(), 2);
        assert_eq!(
            report.holdings,
            vec![HoldingSummary {
                currency: Currency::new("BT"),
                realized_profit: dec!(600),
                remaining: dec!(1),
                open_lots: 1,
            }]
        );
    }

    #[test]
    fn test_one_holding_per_base_currency() {
        let trades = vec![
            trade(1, "ETH", "EUR", dec!(10), dec!(8), true),
            trade(1, "LTC", "EUR", dec!(5), dec!(3), true),
            trade(2, "ETH", "EUR", dec!(4), dec!(10), false),
            trade(3, "LTC", "EUR", dec!(5), dec!(2), false),
            trade(4, "ETH", "EUR", dec!(6), dec!(9), false),
        ];
        let mut recorder = Recorder::default();
        let report = analyze(trades, &Config::default(), &mut recorder).unwrap();

        let profits: Vec<(String, Decimal)> = recorder
            .disposals
            .iter()
            .map(|r| (r.currency.to_string(), r.profit))
            .collect();
        assert_eq!(
            profits,
            vec![
                ("ETH".to_string(), dec!(8)),
                ("LTC".to_string(), dec!(-5)),
                ("ETH".to_string(), dec!(6)),
            ]
        );

        assert_eq!(report.holdings.len(), 2);
        assert_eq!(report.holdings[0].currency, Currency::new("ETH"));
        assert_eq!(report.holdings[0].realized_profit, dec!(14));
        assert_eq!(report.holdings[0].realized_profit.to_string(), "14");
        assert_eq!(report.holdings[0].remaining, dec!(0));
        assert_eq!(report.holdings[1].realized_profit.to_string(), "-5");
    }

    #[test]
    fn test_same_timestamp_keeps_file_order() {
        // buy and sell at the same time: the buy is first in the file so the sale can be covered
        let trades = vec![
            trade(1, "ETH", "EUR", dec!(1), dec!(10), true),
            trade(1, "ETH", "EUR", dec!(1), dec!(12), false),
        ];
        let report = analyze(trades, &Config::default(), &mut Recorder::default()).unwrap();
        assert_eq!(report.disposals[0].profit, dec!(2));
    }

    #[test]
    fn test_non_reporting_counter_is_still_processed() {
        let trades = vec![
            trade(1, "ETC", "ETH", dec!(10), dec!(0.05), true),
            trade(2, "ETC", "ETH", dec!(10), dec!(0.07), false),
        ];
        let report = analyze(trades, &Config::default(), &mut Recorder::default()).unwrap();
        assert_eq!(report.disposals[0].counter, Currency::new("ETH"));
        assert_eq!(report.disposals[0].profit, dec!(0.2));
    }

    #[test]
    fn test_insufficient_funds_aborts_after_earlier_reports() {
        let trades = vec![
            trade(1, "ETH", "EUR", dec!(5), dec!(1), true),
            trade(2, "ETH", "EUR", dec!(1), dec!(2), false),
            trade(3, "ETH", "EUR", dec!(10), dec!(2), false),
            trade(4, "ETH", "EUR", dec!(1), dec!(2), false),
        ];
        let mut recorder = Recorder::default();
        let err = analyze(trades, &Config::default(), &mut recorder).unwrap_err();

        match err {
            AnalyzeError::Ledger { currency, source } => {
                assert_eq!(currency, "ETH");
                assert_eq!(
                    source,
                    LedgerError::InsufficientFunds {
                        requested: dec!(10),
                        held: dec!(4)
                    }
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(recorder.disposals.len(), 1);
        assert!(!recorder.finished);
    }

    #[test]
    fn test_overflowing_profit_aborts_the_run() {
        let trades = vec![
            trade(1, "ETH", "EUR", dec!(100000000000000000), dec!(0), true),
            trade(2, "ETH", "EUR", dec!(100000000000000000), dec!(1000000000000), false),
        ];
        let mut recorder = Recorder::default();
        let err = analyze(trades, &Config::default(), &mut recorder).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::Ledger {
                source: LedgerError::Overflow { .. },
                ..
            }
        ));
        assert!(recorder.disposals.is_empty());
    }
}
