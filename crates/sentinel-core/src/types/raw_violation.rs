//! Raw violation records as emitted by the accessibility rule engine
//! (axe-core result shape).

use serde::{Deserialize, Deserializer, Serialize};

/// One rule violation with every DOM node it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawViolation {
    /// Rule identifier, e.g. `color-contrast`.
    pub id: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

/// One DOM node implicated by a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    /// Selector path to the node. Frame-crossing selectors (nested arrays in
    /// the engine output) are flattened to one comma-joined entry.
    #[serde(default, deserialize_with = "deserialize_targets")]
    pub target: Vec<String>,
    #[serde(default)]
    pub html: String,
}

impl RawNode {
    pub fn new(target: &[&str], html: impl Into<String>) -> Self {
        Self {
            target: target.iter().map(|s| s.to_string()).collect(),
            html: html.into(),
        }
    }
}

impl RawViolation {
    pub fn new(id: impl Into<String>, tags: &[&str], nodes: Vec<RawNode>) -> Self {
        Self {
            id: id.into(),
            impact: None,
            description: String::new(),
            help_url: String::new(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            nodes,
        }
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_help_url(mut self, help_url: impl Into<String>) -> Self {
        self.help_url = help_url.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetEntry {
    Single(String),
    Nested(Vec<String>),
}

fn deserialize_targets<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<TargetEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            TargetEntry::Single(s) => s,
            TargetEntry::Nested(parts) => parts.join(","),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_axe_violation_shape() {
        let json = r##"{
            "id": "image-alt",
            "impact": "critical",
            "description": "Ensures <img> elements have alternate text",
            "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
            "tags": ["cat.text-alternatives", "wcag2a", "wcag111"],
            "nodes": [{"target": ["img#logo"], "html": "<img id=\"logo\">"}]
        }"##;
        let v: RawViolation = serde_json::from_str(json).unwrap();
        assert_eq!(v.id, "image-alt");
        assert_eq!(v.impact.as_deref(), Some("critical"));
        assert_eq!(v.nodes[0].target, vec!["img#logo"]);
    }

    #[test]
    fn nested_frame_targets_are_flattened() {
        let json = r#"{"target": [["iframe#pay", "button.submit"], "div.x"], "html": ""}"#;
        let node: RawNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.target, vec!["iframe#pay,button.submit", "div.x"]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let v: RawViolation = serde_json::from_str(r#"{"id": "region"}"#).unwrap();
        assert!(v.impact.is_none());
        assert!(v.tags.is_empty());
        assert!(v.nodes.is_empty());
    }
}
