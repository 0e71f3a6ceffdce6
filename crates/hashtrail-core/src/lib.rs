//! Core types and configuration for hashtrail.
//!
//! This crate provides the value types shared by the scan engine and the
//! command-line front end: the run configuration, the digest algorithm
//! selector, per-file metadata and report records, warnings, errors and the
//! end-of-run summary.

mod algorithm;
mod config;
mod error;
mod record;
mod summary;

pub use algorithm::DigestAlgorithm;
pub use config::{DEFAULT_REPORT_NAME, RunConfig, RunConfigBuilder};
pub use error::{ConfigError, ScanError, ScanWarning, WarningKind};
pub use record::{FileMetadata, FileRecord, REPORT_COLUMNS, Timestamps, format_timestamp};
pub use summary::WalkSummary;
