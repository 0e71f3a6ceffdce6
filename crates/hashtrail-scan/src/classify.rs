//! Per-file classification and processing.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use hashtrail_core::{DigestAlgorithm, FileRecord, RunConfig, ScanWarning};

use crate::digest::digest_reader;
use crate::metadata::{EntryKind, extract_metadata};

/// What happened to one candidate path.
#[derive(Debug)]
pub enum FileOutcome {
    /// Hashed; the record belongs in the report.
    Processed(FileRecord),
    /// Intentionally excluded (link, non-file, vanished).
    Skipped(ScanWarning),
    /// Should have been hashed but could not be read.
    Errored(ScanWarning),
}

impl FileOutcome {
    fn from_warning(warning: ScanWarning) -> Self {
        if warning.is_error() {
            Self::Errored(warning)
        } else {
            Self::Skipped(warning)
        }
    }
}

/// Classifies a path and, for regular files, produces a report record.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    algorithm: DigestAlgorithm,
}

impl FileProcessor {
    /// Create a processor for the run described by `config`.
    pub fn new(config: &RunConfig) -> Self {
        Self::with_algorithm(config.algorithm)
    }

    /// Create a processor for a single algorithm.
    pub fn with_algorithm(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Process one path, logging exactly one line for the outcome.
    pub fn process(&self, path: &Path) -> FileOutcome {
        let outcome = self.classify(path);
        match &outcome {
            FileOutcome::Processed(record) => {
                info!("Processed {} ({} bytes)", path.display(), record.metadata.size);
            }
            FileOutcome::Skipped(warning) => warn!("Skipped: {}", warning.message),
            FileOutcome::Errored(warning) => {
                warn!("Error on {}: {}", warning.path.display(), warning.message);
            }
        }
        outcome
    }

    fn classify(&self, path: &Path) -> FileOutcome {
        let snapshot = match extract_metadata(path) {
            Ok(snapshot) => snapshot,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return FileOutcome::from_warning(ScanWarning::vanished(path));
            }
            Err(e) => return FileOutcome::from_warning(ScanWarning::metadata_error(path, &e)),
        };

        match snapshot.kind {
            EntryKind::File => {}
            EntryKind::Symlink => return FileOutcome::from_warning(ScanWarning::symlink(path)),
            EntryKind::Directory | EntryKind::Other => {
                return FileOutcome::from_warning(ScanWarning::not_a_file(path));
            }
        }

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return FileOutcome::from_warning(ScanWarning::open_error(path, &e)),
        };

        let digest = digest_reader(&mut file, self.algorithm);
        drop(file);
        let digest = match digest {
            Ok(digest) => digest,
            Err(e) => return FileOutcome::from_warning(ScanWarning::read_error(path, &e)),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        FileOutcome::Processed(FileRecord::new(name, path, snapshot.metadata, digest))
    }
}
