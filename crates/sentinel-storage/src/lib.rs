//! # sentinel-storage
//!
//! Persistent store for inspections and barriers. One serialized write
//! connection, a round-robin read pool, and `user_version` migrations.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
