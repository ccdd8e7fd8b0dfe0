//! Barrier — one accessibility defect at one DOM location of one URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{EMPTY_LIST_MARKER, LIST_SEPARATOR};

/// Impact severity as reported by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
    Unknown,
}

impl Impact {
    /// Parse the engine's impact string. Missing or unrecognised values
    /// become `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("minor") => Self::Minor,
            Some("moderate") => Self::Moderate,
            Some("serious") => Self::Serious,
            Some("critical") => Self::Critical,
            _ => Self::Unknown,
        }
    }

    /// Stored form. `Unknown` is stored as NULL.
    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            Self::Minor => Some("minor"),
            Self::Moderate => Some("moderate"),
            Self::Serious => Some("serious"),
            Self::Critical => Some("critical"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_stored().unwrap_or("unknown"))
    }
}

/// Whether a violation maps to at least one WCAG success criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    WcagGuideline,
    BestPracticeOnly,
}

impl Classification {
    /// Guideline iff at least one WCAG tag is present.
    pub fn from_wcag_tags<S: AsRef<str>>(wcag_tags: &[S]) -> Self {
        if wcag_tags.is_empty() {
            Self::BestPracticeOnly
        } else {
            Self::WcagGuideline
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WcagGuideline => "WCAG Guideline",
            Self::BestPracticeOnly => "Best Practice Only",
        }
    }

    pub fn parse(stored: &str) -> Option<Self> {
        match stored {
            "WCAG Guideline" => Some(Self::WcagGuideline),
            "Best Practice Only" => Some(Self::BestPracticeOnly),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The global identity of a barrier: `(rule, node_targets, url)`.
///
/// Used both for storage deduplication and for the baseline diff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarrierKey {
    pub rule: String,
    pub node_targets: String,
    pub url: String,
}

impl BarrierKey {
    pub fn new(
        rule: impl Into<String>,
        node_targets: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            node_targets: node_targets.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for BarrierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} ({})", self.rule, self.node_targets, self.url)
    }
}

/// A normalized barrier candidate, not yet owned by an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBarrier {
    pub url: String,
    pub rule: String,
    pub impact: Impact,
    pub description: String,
    pub wcag_tags: Vec<String>,
    pub classification: Classification,
    pub affected_user_groups: Vec<String>,
    pub help_url: String,
    /// DOM selectors joined with `", "`.
    pub node_targets: String,
    /// HTML snippet of the offending node, already escaped.
    pub html: String,
}

impl NewBarrier {
    pub fn key(&self) -> BarrierKey {
        BarrierKey::new(&self.rule, &self.node_targets, &self.url)
    }
}

/// A persisted barrier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    pub barrier_id: i64,
    pub inspection_id: i64,
    pub url: String,
    pub rule: String,
    pub impact: Impact,
    pub description: String,
    pub wcag_tags: Vec<String>,
    pub classification: Classification,
    pub affected_user_groups: Vec<String>,
    pub help_url: String,
    pub node_targets: String,
    pub html: String,
}

impl Barrier {
    pub fn key(&self) -> BarrierKey {
        BarrierKey::new(&self.rule, &self.node_targets, &self.url)
    }

    pub fn is_guideline(&self) -> bool {
        self.classification == Classification::WcagGuideline
    }
}

/// Encode a list as one column: `", "`-joined, `None` when empty.
pub fn encode_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_MARKER.to_string();
    }
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Inverse of [`encode_list`].
pub fn decode_list(stored: &str) -> Vec<String> {
    if stored.is_empty() || stored == EMPTY_LIST_MARKER {
        return Vec::new();
    }
    stored
        .split(LIST_SEPARATOR)
        .map(str::to_string)
        .collect()
}
