//! Interactive search loop.
//!
//! The loop is generic over its input and output so it can be driven from a
//! terminal or from an in-memory buffer in tests.

use std::io::{self, BufRead, Write};
use std::path::Path;

use pricelens_catalog::{search, Catalog, CatalogError, SearchOutcome};

use crate::html::write_report;
use crate::table::render_table;

pub(crate) const PROMPT: &str = "Enter part of a product name (or \"exit\" to quit): ";
pub(crate) const FAREWELL: &str = "Done.";
pub(crate) const NOTHING_FOUND: &str = "nothing found";

/// Where (and whether) a non-empty result is exported.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Export<'a> {
    pub path: Option<&'a Path>,
    pub title: &'a str,
}

/// What happened to the HTML report for one query.
#[derive(Debug)]
pub(crate) enum ExportStatus {
    /// No matches, or export disabled.
    Skipped,
    Written,
    Failed(CatalogError),
}

/// Run one search, print the table to `out`, and export the result set.
///
/// An empty result prints `nothing found` and leaves the report untouched.
/// Export failures are returned, not printed; the caller decides whether
/// they are fatal.
pub(crate) fn run_query<W: Write>(
    catalog: &Catalog,
    fragment: &str,
    export: Export<'_>,
    out: &mut W,
) -> io::Result<ExportStatus> {
    let records = match search(catalog, fragment) {
        SearchOutcome::NoMatches => {
            writeln!(out, "{NOTHING_FOUND}")?;
            return Ok(ExportStatus::Skipped);
        }
        SearchOutcome::Matches(records) => records,
    };

    write!(out, "{}", render_table(&records))?;

    let Some(path) = export.path else {
        return Ok(ExportStatus::Skipped);
    };
    match write_report(path, &records, export.title) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), rows = records.len(), "report written");
            Ok(ExportStatus::Written)
        }
        Err(e) => Ok(ExportStatus::Failed(e)),
    }
}

/// `cannot write report <path>: <cause>`
pub(crate) fn export_error_message(export: Export<'_>, e: &CatalogError) -> String {
    let path = export.path.map(|p| p.display().to_string()).unwrap_or_default();
    match e {
        CatalogError::Io { source, .. } => format!("cannot write report {path}: {source}"),
        other => format!("cannot write report {path}: {other}"),
    }
}

fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Prompt, read a fragment, search, repeat until `exit` or end of input.
///
/// Report write failures and undecodable input lines go to `err` and the
/// loop keeps going.
pub(crate) fn run<R: BufRead, W: Write, E: Write>(
    catalog: &Catalog,
    export: Export<'_>,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // EOF: finish the prompt line before the farewell
            writeln!(out)?;
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(bytes = buf.len(), "input line is not valid UTF-8");
            writeln!(err, "error: input is not valid UTF-8")?;
            continue;
        };
        if is_exit(line) {
            break;
        }

        let fragment = line.trim_end_matches(['\n', '\r']);
        if let ExportStatus::Failed(e) = run_query(catalog, fragment, export, out)? {
            tracing::warn!(error = %e, "report export failed");
            writeln!(err, "error: {}", export_error_message(export, &e))?;
        }
    }

    writeln!(out, "{FAREWELL}")?;
    Ok(())
}
