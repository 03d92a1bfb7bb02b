//! HTML pages for the upload form and the summary result.
//!
//! Templates are compiled into the binary and filled by plain placeholder substitution. Every
//! substituted value is HTML-escaped.

use axum::response::Html;

use crate::processing::SummaryReport;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const RESULT_HTML: &str = include_str!("../templates/result.html");
const PLACEHOLDER_OPEN: &str = "{{ ";
const PLACEHOLDER_CLOSE: &str = " }}";

/// Render the upload form.
pub fn render_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Render the result page for a processed upload.
pub fn render_result(report: &SummaryReport) -> Html<String> {
    let summary = &report.summary;
    let mut details = format!(
        "Strategy: {} · {} words · {} model call(s)",
        summary.strategy.as_str(),
        summary.input_words,
        summary.model_invocations
    );
    if let Some(bounds) = summary.bounds {
        details.push_str(&format!(
            " · length {}–{}",
            bounds.min_length, bounds.max_length
        ));
    }
    fill_result(&report.filename, &summary.summary, &details)
}

/// Render the result page for an upload whose text could not be extracted.
pub fn render_failure(filename: &str, message: &str) -> Html<String> {
    fill_result(filename, message, "No summary was produced.")
}

fn fill_result(filename: &str, summary: &str, details: &str) -> Html<String> {
    // Single left-to-right pass: substituted values are never scanned for placeholders.
    let mut page = String::with_capacity(RESULT_HTML.len() + summary.len());
    let mut rest = RESULT_HTML;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let Some(len) = rest[start..].find(PLACEHOLDER_CLOSE) else {
            break;
        };
        let end = start + len + PLACEHOLDER_CLOSE.len();
        let value = match &rest[start + PLACEHOLDER_OPEN.len()..start + len] {
            "filename" => filename,
            "summary" => summary,
            "details" => details,
            _ => {
                page.push_str(&rest[..end]);
                rest = &rest[end..];
                continue;
            }
        };
        page.push_str(&rest[..start]);
        page.push_str(&html_escape::encode_text(value));
        rest = &rest[end..];
    }
    page.push_str(rest);
    Html(page)
}
