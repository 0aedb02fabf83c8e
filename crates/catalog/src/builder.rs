use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::classify;
use crate::config::IngestSettings;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{Catalog, Role};
use crate::normalize::normalize;
use crate::source::{list_candidates, read_text, SourceFile};

/// Counters for one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub files_considered: usize,
    pub files_ingested: usize,
    pub files_skipped: usize,
    pub rows_accepted: usize,
    pub rows_skipped: usize,
}

/// Why a whole file was left out.
enum FileFault {
    Unreadable(String),
    MissingColumns(Vec<Role>),
}

struct FileOutcome {
    accepted: usize,
    skipped: usize,
}

/// Scan `dir` and build the catalog. Faults go to `sink`; this never fails.
pub fn build(dir: &Path, settings: &IngestSettings, sink: &mut dyn DiagnosticSink) -> Catalog {
    build_with_report(dir, settings, sink).0
}

pub fn build_with_report(
    dir: &Path,
    settings: &IngestSettings,
    sink: &mut dyn DiagnosticSink,
) -> (Catalog, IngestReport) {
    let mut catalog = Catalog::new();
    let mut report = IngestReport::default();

    let files = match list_candidates(dir, &settings.name_contains, &settings.extension) {
        Ok(files) => files,
        Err(e) => {
            sink.report(Diagnostic::DirectoryUnreadable {
                dir: dir.to_path_buf(),
                cause: e.to_string(),
            });
            return (catalog, report);
        }
    };

    if files.is_empty() {
        sink.report(Diagnostic::NoSources { dir: dir.to_path_buf() });
        return (catalog, report);
    }

    for file in &files {
        report.files_considered += 1;
        debug!(file = %file.name, "reading price list");

        match ingest_file(file, settings, &mut catalog, sink) {
            Ok(outcome) => {
                info!(
                    file = %file.name,
                    accepted = outcome.accepted,
                    skipped = outcome.skipped,
                    "ingested price list"
                );
                report.files_ingested += 1;
                report.rows_accepted += outcome.accepted;
                report.rows_skipped += outcome.skipped;
            }
            Err(fault) => {
                report.files_skipped += 1;
                sink.report(match fault {
                    FileFault::Unreadable(cause) => Diagnostic::FileError {
                        file: file.name.clone(),
                        cause,
                    },
                    FileFault::MissingColumns(missing) => Diagnostic::MissingColumns {
                        file: file.name.clone(),
                        missing,
                    },
                });
            }
        }
    }

    (catalog, report)
}

fn ingest_file(
    file: &SourceFile,
    settings: &IngestSettings,
    catalog: &mut Catalog,
    sink: &mut dyn DiagnosticSink,
) -> Result<FileOutcome, FileFault> {
    let text = read_text(&file.path).map_err(|e| FileFault::Unreadable(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(settings.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FileFault::Unreadable(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let roles = classify(&headers, &settings.vocabulary)
        .resolve()
        .map_err(FileFault::MissingColumns)?;

    debug!(
        file = %file.name,
        product = %roles.product.name,
        price = %roles.price.name,
        weight = %roles.weight.name,
        "resolved columns"
    );

    let mut outcome = FileOutcome { accepted: 0, skipped: 0 };

    // The text is valid UTF-8 and the reader is flexible, so the only
    // errors left are I/O ones, which fail the whole file.
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FileFault::Unreadable(e.to_string()))?;

    for (idx, record) in records.iter().enumerate() {
        // Header is line 1; used only when the reader has no position
        let fallback_line = idx as u64 + 2;
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
        let row = normalize(record, &roles, &file.name, line, settings.policy);

        match row {
            Ok(record) => {
                catalog.push(record);
                outcome.accepted += 1;
            }
            Err(fault) => {
                sink.report(Diagnostic::RowSkipped(fault));
                outcome.skipped += 1;
            }
        }
    }

    Ok(outcome)
}
