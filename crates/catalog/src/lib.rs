//! `pricelens-catalog`: Price-list ingestion and search engine.
//!
//! Pure engine crate: scans a directory of CSV price lists, reconciles their
//! column naming, and answers product searches. No terminal or rendering
//! dependencies.

pub mod builder;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod normalize;
pub mod query;
pub mod source;

pub use builder::{build, build_with_report, IngestReport};
pub use classify::{classify, Vocabulary};
pub use config::{NumberPolicy, Settings};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use error::CatalogError;
pub use model::{Catalog, ColumnRef, ColumnRoles, PriceRecord, Role};
pub use query::{search, SearchOutcome};
