use thiserror::Error;

/* Raised by the currency pair resolver when a token can't be split in two known currencies */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Could not parse currency pair '{token}'")]
    UnknownPair { token: String },
    #[error("Currency pair '{token}' is ambiguous, it also contains '{extra}'")]
    AmbiguousPair { token: String, extra: String },
}
