pub mod health;
pub mod regression;
pub mod webhook;
