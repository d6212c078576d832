use thiserror::Error;

/* Everything that can go wrong while turning the exported file into trades */
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Missing field '{field}' on line {line}")]
    MalformedRecord { line: u64, field: &'static str },
    #[error("Could not parse timestamp '{value}' on line {line}")]
    Timestamp { line: u64, value: String },
    #[error("Invalid decimal '{value}' for field '{field}' on line {line}: {reason}")]
    InvalidDecimal {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, InputError::MalformedRecord { .. })
    }
}
