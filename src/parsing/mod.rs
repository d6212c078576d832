pub mod kraken_csv;
pub use kraken_csv::*;
