//! Non-fatal ingestion events.
//!
//! The builder never aborts on a bad file or row. It describes what it skipped
//! as a [`Diagnostic`] and hands it to a [`DiagnosticSink`]; the caller
//! decides whether to print, log, or collect.

use std::path::PathBuf;

use crate::model::Role;
use crate::normalize::RowFault;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No file in the directory matched the name token and extension.
    NoSources { dir: PathBuf },
    /// The directory itself could not be listed.
    DirectoryUnreadable { dir: PathBuf, cause: String },
    /// A candidate file could not be read or decoded.
    FileError { file: String, cause: String },
    /// A file's header row lacks one or more roles; the whole file is skipped.
    MissingColumns { file: String, missing: Vec<Role> },
    /// A single data row was rejected.
    RowSkipped(RowFault),
}

impl Diagnostic {
    /// The file this event is attributed to, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::NoSources { .. } | Self::DirectoryUnreadable { .. } => None,
            Self::FileError { file, .. } | Self::MissingColumns { file, .. } => Some(file),
            Self::RowSkipped(fault) => Some(&fault.file),
        }
    }

    /// `false` only for the informational "nothing to load" event.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::NoSources { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSources { dir } => {
                write!(f, "no price lists found in {}", dir.display())
            }
            Self::DirectoryUnreadable { dir, cause } => {
                write!(f, "cannot list {}: {cause}", dir.display())
            }
            Self::FileError { file, cause } => write!(f, "file skipped: {file}: {cause}"),
            Self::MissingColumns { file, missing } => {
                let names: Vec<String> = missing.iter().map(|r| r.to_string()).collect();
                write!(f, "file skipped: {file}: missing columns: {}", names.join(", "))
            }
            Self::RowSkipped(fault) => write!(f, "row skipped: {fault}"),
        }
    }
}

/// Receiver for ingestion diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RowFaultKind;

    #[test]
    fn display_missing_columns() {
        let d = Diagnostic::MissingColumns {
            file: "price_2.csv".into(),
            missing: vec![Role::Price, Role::Weight],
        };
        assert_eq!(d.to_string(), "file skipped: price_2.csv: missing columns: price, weight");
        assert_eq!(d.file(), Some("price_2.csv"));
        assert!(d.is_warning());
    }

    #[test]
    fn display_row_skipped() {
        let d = Diagnostic::RowSkipped(RowFault {
            file: "price_1.csv".into(),
            line: 4,
            cells: vec!["".into(), "10".into(), "1".into()],
            kind: RowFaultKind::EmptyProduct,
        });
        assert_eq!(d.to_string(), "row skipped: price_1.csv, line 4: empty product name [,10,1]");
    }

    #[test]
    fn no_sources_is_informational() {
        let d = Diagnostic::NoSources { dir: PathBuf::from("lists") };
        assert!(!d.is_warning());
        assert_eq!(d.file(), None);
        assert_eq!(d.to_string(), "no price lists found in lists");
    }

    #[test]
    fn vec_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::NoSources { dir: PathBuf::from(".") });
        assert_eq!(sink.len(), 1);
    }
}
