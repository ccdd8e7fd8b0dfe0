//! Page renderer + accessibility scanner seam.

use crate::errors::CollaboratorError;
use crate::types::{RawViolation, ScanTarget};

/// Renders a target page and runs the accessibility rule engine on it.
///
/// Implementations own navigation, script injection, and any timeouts; the
/// sentinel only consumes the violations they return.
pub trait AccessibilityScanner: Send + Sync {
    fn scan(&self, target: &ScanTarget) -> Result<Vec<RawViolation>, CollaboratorError>;
}

impl<T: AccessibilityScanner + ?Sized> AccessibilityScanner for std::sync::Arc<T> {
    fn scan(&self, target: &ScanTarget) -> Result<Vec<RawViolation>, CollaboratorError> {
        (**self).scan(target)
    }
}
