//! HTML report for the current search result.
//!
//! The document is regenerated from scratch on every export; the previous
//! file is overwritten.

use std::path::Path;

use pricelens_catalog::{CatalogError, PriceRecord};

use crate::table::HEADERS;
use crate::util::{format_amount, format_metric};

/// Escape the 5 characters that are significant in HTML text and attributes.
fn escape_html(s: &str) -> String {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return s.to_string();
    }
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub(crate) fn render_html(records: &[&PriceRecord], title: &str, generated_at: &str) -> String {
    let title = escape_html(title);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str(&format!("  <title>{title}</title>\n"));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("  <h1>{title}</h1>\n"));
    out.push_str("  <table>\n    <tr>\n");
    for header in HEADERS {
        out.push_str(&format!("      <th>{}</th>\n", escape_html(header)));
    }
    out.push_str("    </tr>\n");

    for (idx, record) in records.iter().enumerate() {
        out.push_str("    <tr>\n");
        let cells = [
            (idx + 1).to_string(),
            escape_html(&record.product),
            format_amount(record.price),
            format_amount(record.weight),
            escape_html(&record.source_file),
            format_metric(record.price_per_unit),
        ];
        for cell in cells {
            out.push_str(&format!("      <td>{cell}</td>\n"));
        }
        out.push_str("    </tr>\n");
    }

    out.push_str("  </table>\n");
    out.push_str(&format!(
        "  <p>{} item(s), generated {}</p>\n",
        records.len(),
        escape_html(generated_at)
    ));
    out.push_str("</body>\n</html>\n");
    out
}

/// Render and write the report, replacing any existing file at `path`.
pub(crate) fn write_report(path: &Path, records: &[&PriceRecord], title: &str) -> Result<(), CatalogError> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = render_html(records, title, &generated_at);
    std::fs::write(path, html).map_err(|e| CatalogError::io(path, e))
}
