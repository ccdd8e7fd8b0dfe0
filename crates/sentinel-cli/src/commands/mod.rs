//! Subcommand implementations. Each returns a printable, coded error.

mod run;
mod serve;

pub use run::{compare_baseline, init_db, scan};
pub use serve::serve;
