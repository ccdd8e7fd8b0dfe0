//! Derivations applied to raw scanner output before it is stored.

use sentinel_core::constants::{LIST_SEPARATOR, WCAG_TAG_PREFIX, WCAG_USER_GROUPS};
use sentinel_core::types::{Classification, Impact, NewBarrier, RawViolation};

/// The WCAG subset of a violation's tags, in original order.
pub fn wcag_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|t| t.starts_with(WCAG_TAG_PREFIX))
        .cloned()
        .collect()
}

/// User groups affected by the given WCAG tags. De-duplicated, first-seen
/// order. Tags without a mapping contribute nothing.
pub fn affected_user_groups(wcag_tags: &[String]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for tag in wcag_tags {
        let Some((_, mapped)) = WCAG_USER_GROUPS.iter().find(|(t, _)| *t == tag.as_str()) else {
            continue;
        };
        for group in mapped.iter() {
            if !groups.iter().any(|g| g == group) {
                groups.push(group.to_string());
            }
        }
    }
    groups
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Join a node's selector path into the stored `node_targets` form.
pub fn join_targets(targets: &[String]) -> String {
    targets.join(LIST_SEPARATOR)
}

/// One candidate barrier per DOM node of `violation`.
pub fn candidates(url: &str, violation: &RawViolation) -> Vec<NewBarrier> {
    let wcag = wcag_tags(&violation.tags);
    let classification = Classification::from_wcag_tags(&wcag);
    let groups = affected_user_groups(&wcag);
    let impact = Impact::parse(violation.impact.as_deref());

    violation
        .nodes
        .iter()
        .map(|node| NewBarrier {
            url: url.to_string(),
            rule: violation.id.clone(),
            impact,
            description: violation.description.clone(),
            wcag_tags: wcag.clone(),
            classification,
            affected_user_groups: groups.clone(),
            help_url: violation.help_url.clone(),
            node_targets: join_targets(&node.target),
            html: escape_html(&node.html),
        })
        .collect()
}
