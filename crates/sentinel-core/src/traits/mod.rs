//! Seams to the external collaborators.

pub mod notifier;
pub mod scanner;

pub use notifier::Notifier;
pub use scanner::AccessibilityScanner;
