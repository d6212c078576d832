pub mod parse_error;
pub use parse_error::*;

pub mod ledger_error;
pub use ledger_error::*;

pub mod input_error;
pub use input_error::*;

pub mod config_error;
pub use config_error::*;

pub mod analyze_error;
pub use analyze_error::*;
