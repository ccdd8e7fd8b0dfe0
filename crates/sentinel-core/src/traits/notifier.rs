//! Notification delivery seam.

use crate::errors::CollaboratorError;

/// Delivers a rendered regression report downstream.
///
/// Called at most once per comparison run, and only when regressions exist.
pub trait Notifier: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    fn deliver(&self, html_content: &str) -> Result<(), CollaboratorError>;
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn deliver(&self, html_content: &str) -> Result<(), CollaboratorError> {
        (**self).deliver(html_content)
    }
}
