//! Reading axe-core result JSON.

use serde::Deserialize;

use sentinel_core::types::RawViolation;

#[derive(Debug, Deserialize)]
struct AxeResults {
    #[serde(default)]
    violations: Vec<RawViolation>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AxeOutput {
    Many(Vec<AxeResults>),
    One(AxeResults),
}

/// Parse the violations out of axe-core output: one results object, or an
/// array of them (one per page, as the axe CLI prints). Passes, incomplete
/// and inapplicable entries are ignored.
pub fn parse_axe_results(json: &str) -> Result<Vec<RawViolation>, serde_json::Error> {
    let output: AxeOutput = serde_json::from_str(json)?;
    Ok(match output {
        AxeOutput::One(r) => r.violations,
        AxeOutput::Many(all) => all.into_iter().flat_map(|r| r.violations).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "url": "http://example.test/",
        "passes": [{"id": "document-title"}],
        "violations": [{
            "id": "image-alt",
            "impact": "critical",
            "description": "Ensures <img> elements have alternate text",
            "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
            "tags": ["cat.text-alternatives", "wcag2a", "wcag111"],
            "nodes": [{"target": ["img.logo"], "html": "<img class=\"logo\">"}]
        }]
    }"#;

    #[test]
    fn parses_single_result_object() {
        let v = parse_axe_results(SAMPLE).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].id, "image-alt");
        assert_eq!(v[0].impact.as_deref(), Some("critical"));
        assert_eq!(v[0].nodes[0].target, vec!["img.logo".to_string()]);
    }

    #[test]
    fn parses_array_of_results() {
        let json = format!("[{SAMPLE}, {{\"violations\": []}}, {SAMPLE}]");
        assert_eq!(parse_axe_results(&json).unwrap().len(), 2);
    }

    #[test]
    fn null_impact_is_accepted() {
        let json = r#"{"violations":[{"id":"x","impact":null,"tags":[],"nodes":[]}]}"#;
        assert_eq!(parse_axe_results(json).unwrap()[0].impact, None);
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_axe_results("Error: browser crashed").is_err());
    }
}
