//! Notification dispatcher.

pub mod report;
pub mod webhook;

pub use report::render_report;
pub use webhook::WebhookNotifier;

use sentinel_core::traits::Notifier;
use sentinel_core::types::Barrier;

/// What happened to a comparison's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Nothing to report; no delivery was attempted.
    Suppressed,
    Delivered,
    /// One attempt was made and failed. Never retried.
    Failed { reason: String },
}

/// Render and deliver a report for `regressions` if there are any.
pub fn dispatch(notifier: &dyn Notifier, url: &str, regressions: &[Barrier]) -> DeliveryStatus {
    if regressions.is_empty() {
        tracing::info!(url, "no regressions detected");
        return DeliveryStatus::Suppressed;
    }

    let html = render_report(regressions);
    match notifier.deliver(&html) {
        Ok(()) => {
            tracing::info!(
                url,
                notifier = notifier.name(),
                regressions = regressions.len(),
                "regression notification sent"
            );
            DeliveryStatus::Delivered
        }
        Err(e) => {
            tracing::error!(
                url,
                notifier = notifier.name(),
                error = %e,
                timestamp = %chrono::Utc::now().to_rfc3339(),
                "regression notification failed"
            );
            DeliveryStatus::Failed { reason: e.to_string() }
        }
    }
}
