//! Domain model: inspections, barriers, and raw scanner output.

pub mod barrier;
pub mod inspection;
pub mod raw_violation;

pub use barrier::{decode_list, encode_list, Barrier, BarrierKey, Classification, Impact, NewBarrier};
pub use inspection::{Environment, Inspection, ScanTarget};
pub use raw_violation::{RawNode, RawViolation};
