use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::{AnalyzeError, InputError},
    structs::{Currency, CurrencyPair, Trade, TradeDirection},
    utils::parse_timestamp,
};

pub const TIME: &str = "time";
pub const PAIR: &str = "pair";
pub const VOLUME: &str = "vol";
pub const PRICE: &str = "price";
pub const TYPE: &str = "type";

/* Position of the required columns in the header */
struct Columns {
    time: usize,
    pair: usize,
    volume: usize,
    price: usize,
    r#type: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, InputError> {
        let find = |field: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == field)
                .ok_or(InputError::MalformedRecord { line: 1, field })
        };
        Ok(Columns {
            time: find(TIME)?,
            pair: find(PAIR)?,
            volume: find(VOLUME)?,
            price: find(PRICE)?,
            r#type: find(TYPE)?,
        })
    }
}

/* Read a trades export (Kraken "trades.csv" layout). The file is closed when the reader is dropped,
whatever the outcome. */
pub fn read_trades_file(path: impl AsRef<Path>, vocabulary: &[Currency]) -> Result<Vec<Trade>, AnalyzeError> {
    let file = File::open(path.as_ref()).map_err(InputError::from)?;
    read_trades(file, vocabulary)
}

pub fn read_trades<R: Read>(reader: R, vocabulary: &[Currency]) -> Result<Vec<Trade>, AnalyzeError> {
    // rows shorter than the header are reported as malformed records, not csv errors
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(rdr.headers().map_err(InputError::from)?)?;

    let mut trades = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(InputError::from)?;
        let trade = parse_record(&record, &columns, vocabulary)?;
        debug!(pair = %trade.pair, timestamp = %trade.timestamp, "read trade");
        trades.push(trade);
    }
    Ok(trades)
}

fn parse_record(record: &StringRecord, columns: &Columns, vocabulary: &[Currency]) -> Result<Trade, AnalyzeError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let field = |index: usize, name: &'static str| {
        record
            .get(index)
            .ok_or(InputError::MalformedRecord { line, field: name })
    };

    let time = field(columns.time, TIME)?;
    let pair = field(columns.pair, PAIR)?;
    let volume = field(columns.volume, VOLUME)?;
    let price = field(columns.price, PRICE)?;
    let r#type = field(columns.r#type, TYPE)?;

    let timestamp = parse_timestamp(time).ok_or_else(|| InputError::Timestamp {
        line,
        value: time.to_string(),
    })?;

    Ok(Trade {
        timestamp,
        pair: CurrencyPair::parse(pair.trim(), vocabulary)?,
        volume: parse_decimal(volume, VOLUME, line)?,
        price: parse_decimal(price, PRICE, line)?,
        direction: TradeDirection::from_export(r#type.trim()),
    })
}

fn parse_decimal(value: &str, field: &'static str, line: u64) -> Result<Decimal, InputError> {
    Decimal::from_str_exact(value.trim()).map_err(|e| InputError::InvalidDecimal {
        line,
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
