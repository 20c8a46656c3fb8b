//! roomwatch - Status dashboard for server-room telemetry logs
//!
//! This library reads the newest record from an append-only telemetry log,
//! parses it into a structured snapshot and renders it as an HTML dashboard.
//!
//! ## Module Structure
//!
//! - [`reader`] - Newest-record lookup in the log file
//! - [`parsers`] - Record line parsing and the snapshot types
//! - [`render`] - HTML dashboard and error pages
//! - [`writer`] - Record composition and appending for the acquisition side
//! - [`settings`] - Dashboard settings persistence
//! - [`error`] - Error taxonomy shared by all of the above

pub mod error;
pub mod parsers;
pub mod reader;
pub mod render;
pub mod settings;
pub mod writer;

pub use error::TelemetryError;
pub use parsers::{Parseable, Snapshot, StatusLine};

use std::path::Path;

/// Read the newest record at `path` and parse it.
pub fn load_snapshot(path: &Path) -> error::Result<Snapshot> {
    let line = reader::read_last_record(path)?;
    StatusLine.parse(&line)
}
