pub mod currency;
pub use currency::*;

pub mod trade;
pub use trade::*;

pub mod lot;
pub use lot::*;

pub mod precision;
pub use precision::*;

pub mod holding;
pub use holding::*;

pub mod config;
pub use config::*;
