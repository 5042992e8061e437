//! Input/output, configuration and error handling

/// Command-line interface and subcommand processing
pub mod cli;
/// Named constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Pack generation progress display
pub mod progress;
/// Level records, packs and JSON persistence
pub mod record;
