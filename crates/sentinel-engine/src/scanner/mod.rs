//! Scanner adapters producing raw violations.

pub mod axe;
pub mod command;

pub use axe::parse_axe_results;
pub use command::CommandScanner;
