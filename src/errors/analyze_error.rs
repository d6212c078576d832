use thiserror::Error;

use super::{ConfigError, InputError, LedgerError, ParseError};

/* Top level error of a run. Nothing is retried: the first failure aborts the batch */
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{currency}: {source}")]
    Ledger {
        currency: String,
        #[source]
        source: LedgerError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl AnalyzeError {
    /* Malformed files get a generic diagnostic instead of the detailed error */
    pub fn is_malformed_input(&self) -> bool {
        match self {
            AnalyzeError::Input(e) => e.is_malformed(),
            _ => false,
        }
    }
}
