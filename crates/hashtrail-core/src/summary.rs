//! End-of-run summary.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters and timing for a finished (or cancelled) walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Files hashed and written to the report.
    pub processed: u64,
    /// Entries skipped (links, non-files, vanished paths).
    pub skipped: u64,
    /// Files or directories that could not be read.
    pub errors: u64,
    /// Content bytes fed to the digest engine.
    pub bytes_hashed: u64,
    /// Wall-clock duration of the walk.
    pub elapsed: Duration,
    /// Report file written by the run.
    pub report_path: PathBuf,
    /// Whether the walk stopped early on request.
    pub cancelled: bool,
}

impl WalkSummary {
    /// Total entries the classifier looked at.
    pub fn total_entries(&self) -> u64 {
        self.processed + self.skipped + self.errors
    }

    /// Whether every classified entry was either processed or skipped.
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && !self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let summary = WalkSummary {
            processed: 5,
            skipped: 2,
            errors: 1,
            ..Default::default()
        };
        assert_eq!(summary.total_entries(), 8);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_serializes_to_json() {
        let summary = WalkSummary {
            processed: 3,
            report_path: PathBuf::from("/out/report.csv"),
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["processed"], 3);
        assert_eq!(json["report_path"], "/out/report.csv");
    }
}
