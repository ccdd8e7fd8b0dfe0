//! Query modules, one per table.

pub mod barriers;
pub mod inspections;
