//! Tracing and structured logging.

pub mod setup;

pub use setup::init_tracing;
