use std::env;

use crate::errors::ConfigError;

use super::{Currency, DecimalPrecision};

pub const DEFAULT_CURRENCIES: [&str; 10] = [
    "EUR", "BT", "LTC", "RP", "GNO", "XMR", "ETC", "ETH", "XLM", "DASH",
];

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

/* Settings of a run. Read from the environment (and a .env file) by the binary,
built directly in tests. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub reporting_currency: Currency,
    pub precision: DecimalPrecision,
    pub known_currencies: Vec<Currency>,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reporting_currency: Currency::new("EUR"),
            precision: DecimalPrecision::default(),
            known_currencies: DEFAULT_CURRENCIES.iter().map(|c| Currency::new(*c)).collect(),
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub const REPORTING_CURRENCY: &'static str = "FIFOGAINS_REPORTING_CURRENCY";
    pub const PRECISION: &'static str = "FIFOGAINS_PRECISION";
    pub const CURRENCIES: &'static str = "FIFOGAINS_CURRENCIES";
    pub const OUTPUT: &'static str = "FIFOGAINS_OUTPUT";

    /* Missing variables keep their default value */
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = Config::default();

        if let Ok(value) = env::var(Self::CURRENCIES) {
            let currencies: Vec<Currency> = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(Currency::new)
                .collect();
            if currencies.len() < 2 {
                return Err(ConfigError::InvalidValue {
                    key: Self::CURRENCIES,
                    value,
                    reason: String::from("at least two currencies are needed to form a pair"),
                });
            }
            config.known_currencies = currencies;
        }

        if let Ok(value) = env::var(Self::REPORTING_CURRENCY) {
            let currency = Currency::new(value.trim());
            if !config.known_currencies.contains(&currency) {
                return Err(ConfigError::InvalidValue {
                    key: Self::REPORTING_CURRENCY,
                    value,
                    reason: String::from("not one of the known currencies"),
                });
            }
            config.reporting_currency = currency;
        }

        if let Ok(value) = env::var(Self::PRECISION) {
            let digits: u32 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: Self::PRECISION,
                value: value.clone(),
                reason: String::from("not a positive integer"),
            })?;
            config.precision = DecimalPrecision::new(digits)?;
        }

        if let Ok(value) = env::var(Self::OUTPUT) {
            config.output = match value.trim().to_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: Self::OUTPUT,
                        value,
                        reason: String::from("expected 'text' or 'json'"),
                    })
                }
            };
        }

        Ok(config)
    }
}
