//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//! Skipped files and rows are never an error: ingestion diagnostics and empty
//! search results still exit with `EXIT_SUCCESS`.
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unspecified)                   |
//! | 2    | CLI usage error (bad args)                    |
//! | 3    | Config file unreadable, unparseable, invalid  |
//! | 4    | I/O error outside ingestion (stdout, report)  |

/// Success - command completed, possibly with diagnostics.
pub const EXIT_SUCCESS: u8 = 0;

// 1 is reserved; 2 is set by clap itself on bad arguments.

/// Config error - `--config` missing, TOML parse or validation failure.
pub const EXIT_CONFIG: u8 = 3;

/// I/O error - report export or terminal write failed in one-shot mode.
pub const EXIT_IO: u8 = 4;
