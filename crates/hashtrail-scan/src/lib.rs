//! Tree walking, hashing and report writing engine for hashtrail.
//!
//! # Overview
//!
//! `hashtrail-scan` walks a directory tree, hashes every regular file and
//! writes one CSV row per hashed file. The pipeline is:
//!
//! - **Walker** ([`HashWalker`]) enumerates entries depth-first in sorted
//!   order and owns the report for the whole run
//! - **Classifier** ([`FileProcessor`]) skips links, non-files and vanished
//!   paths, and reports unreadable files as errors
//! - **Metadata** ([`extract_metadata`]) takes one status snapshot per file
//!   before its content is read
//! - **Digest engine** ([`digest`], [`digest_reader`]) produces uppercase hex
//! - **Report** ([`ReportWriter`]) writes a fixed header and flushes each row
//!
//! # Example
//!
//! ```rust,no_run
//! use hashtrail_scan::{DigestAlgorithm, HashWalker, RunConfig};
//!
//! let config = RunConfig::new("/srv/data", "/var/reports", DigestAlgorithm::Sha256);
//! let walker = HashWalker::new(config).unwrap();
//! let summary = walker.walk().unwrap();
//!
//! println!("Hashed {} files, {} errors", summary.processed, summary.errors);
//! ```
//!
//! # Progress Monitoring
//!
//! Verbose runs publish one update per hashed file:
//!
//! ```rust,no_run
//! use hashtrail_scan::{DigestAlgorithm, HashWalker, RunConfig};
//!
//! let mut config = RunConfig::new("/srv/data", "/var/reports", DigestAlgorithm::Md5);
//! config.verbose = true;
//! let walker = HashWalker::new(config).unwrap();
//! let mut progress_rx = walker.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         println!("{}: {}", progress.files_processed, progress.current_path.display());
//!     }
//! });
//! ```

mod classify;
mod digest;
mod metadata;
mod progress;
mod report;
mod walker;

pub use classify::{FileOutcome, FileProcessor};
pub use digest::{DigestHasher, READ_BUFFER_SIZE, digest, digest_reader};
pub use metadata::{EntryKind, StatSnapshot, extract_metadata};
pub use progress::ScanProgress;
pub use report::ReportWriter;
pub use walker::HashWalker;

pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use hashtrail_core::{
    ConfigError, DigestAlgorithm, FileMetadata, FileRecord, RunConfig, ScanError, ScanWarning,
    Timestamps, WalkSummary, WarningKind,
};
