use std::io::Write;

use pricelens_catalog::{Diagnostic, DiagnosticSink};

/// Prints ingestion diagnostics as `warning:` / `note:` lines and logs them.
pub(crate) struct ConsoleSink<W: Write> {
    out: W,
    quiet: bool,
    pub(crate) warnings: usize,
}

impl<W: Write> ConsoleSink<W> {
    pub(crate) fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet, warnings: 0 }
    }
}

impl<W: Write> DiagnosticSink for ConsoleSink<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        let file = diagnostic.file().unwrap_or("-");
        if diagnostic.is_warning() {
            self.warnings += 1;
            tracing::warn!(file, "{diagnostic}");
        } else {
            tracing::info!("{diagnostic}");
        }

        if self.quiet {
            return;
        }
        let prefix = if diagnostic.is_warning() { "warning" } else { "note" };
        // A closed stderr must not abort ingestion
        let _ = writeln!(self.out, "{prefix}: {diagnostic}");
    }
}
