pub mod analyze;
pub use analyze::*;

pub mod report;
pub use report::*;
