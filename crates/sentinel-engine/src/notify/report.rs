//! Regression report rendered as an HTML fragment.

use std::fmt::Write;

use sentinel_core::types::Barrier;

use crate::recorder::normalize::escape_html;

const NOT_AVAILABLE: &str = "N/A";

pub const REPORT_HEADING: &str = "Accessibility Regression Test Failed";
pub const REPORT_INTRO: &str = "A past client has made changes to their website that have \
resulted in their website falling out of compliance.";

/// Render the report for a non-empty regression set.
///
/// Text fields are escaped here. The `html` snippet was escaped when it was
/// recorded and is emitted as stored.
pub fn render_report(regressions: &[Barrier]) -> String {
    let mut out = String::new();
    let _ = write!(out, "<h1>{REPORT_HEADING}</h1>\n<p>{REPORT_INTRO}</p>\n");
    for barrier in regressions {
        render_barrier(&mut out, barrier);
    }
    out.trim().to_string()
}

fn render_barrier(out: &mut String, b: &Barrier) {
    let help_href = if b.help_url.is_empty() {
        "#".to_string()
    } else {
        escape_html(&b.help_url)
    };
    let _ = write!(
        out,
        "<hr>\n\
         <p><strong>URL:</strong> {url}</p>\n\
         <p><strong>Rule Violated:</strong> {rule}</p>\n\
         <p><strong>WCAG Guideline or Best Practice:</strong> {class}</p>\n\
         <p><strong>Page Element:</strong> {targets}</p>\n\
         <p><strong>More Rule Info:</strong> <a href=\"{help_href}\" target=\"_blank\">{help}</a></p>\n\
         <p><strong>Impact:</strong> {impact}</p>\n\
         <p><strong>Description:</strong> {description}</p>\n\
         <p><strong>HTML:</strong> {html}</p>\n",
        url = text(&b.url),
        rule = text(&b.rule),
        class = b.classification.as_str(),
        targets = text(&b.node_targets),
        help = text(&b.help_url),
        impact = b.impact.as_stored().unwrap_or(NOT_AVAILABLE),
        description = text(&b.description),
        html = if b.html.is_empty() { NOT_AVAILABLE } else { b.html.as_str() },
    );
}

fn text(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        escape_html(value)
    }
}
