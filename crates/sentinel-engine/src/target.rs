//! Scan target resolution.

use std::path::Path;

use sentinel_core::errors::PipelineError;
use sentinel_core::types::{Environment, ScanTarget};

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// Resolve a CLI or webhook target.
///
/// An existing local file becomes `file://<absolute path>` with environment
/// `local`. Otherwise the target must be an `http`, `https` or `file` URL and
/// is used verbatim as a production URL. Targets are handed to the scanner
/// command as arguments, so anything else (notably a leading `-`) is
/// rejected.
pub fn resolve_target(raw: &str) -> Result<ScanTarget, PipelineError> {
    let invalid = |reason: &str| PipelineError::InvalidTarget {
        target: raw.to_string(),
        reason: reason.to_string(),
    };
    if raw.trim().is_empty() {
        return Err(invalid("target is empty"));
    }

    let path = Path::new(raw);
    if path.exists() {
        if let Ok(abs) = std::fs::canonicalize(path) {
            return Ok(ScanTarget::new(format!("file://{}", abs.display()), Environment::Local));
        }
    }

    if raw.starts_with('-') {
        return Err(invalid("targets may not start with `-`"));
    }
    if !has_url_scheme(raw) {
        return Err(invalid("expected an existing file or an http(s):// or file:// URL"));
    }
    Ok(ScanTarget::production(raw))
}

fn has_url_scheme(raw: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| {
        raw.len() > scheme.len()
            && raw
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
