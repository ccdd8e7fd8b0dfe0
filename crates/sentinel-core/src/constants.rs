//! Fixed vocabulary shared across the workspace.

/// Prefix identifying a WCAG success-criterion tag in scanner output.
pub const WCAG_TAG_PREFIX: &str = "wcag";

/// Separator used when a list (selectors, tags, groups) is stored as one column.
pub const LIST_SEPARATOR: &str = ", ";

/// Stored in place of an empty tag or group list.
pub const EMPTY_LIST_MARKER: &str = "None";

/// Header carrying the shared secret between the engine and the gateway.
pub const AUTH_HEADER: &str = "x-auth-token";

/// WCAG tag → affected user groups. Tags not listed map to no group.
pub const WCAG_USER_GROUPS: &[(&str, &[&str])] = &[
    ("wcag111", &["Blind", "Low Vision"]),
    ("wcag131", &["Cognitive Disabilities"]),
    ("wcag244", &["Motor Impairments"]),
    ("wcag412", &["Low Vision", "Cognitive Disabilities"]),
];

/// Default database file name when none is configured.
pub const DEFAULT_DB_FILE: &str = "sentinel.db";

/// Default gateway listen port.
pub const DEFAULT_GATEWAY_PORT: u16 = 3000;

/// Requests allowed per client per rate-limit window.
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 100;

/// Rate-limit window length: 15 minutes.
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
