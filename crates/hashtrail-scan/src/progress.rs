//! Walk progress reporting and run counters.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use hashtrail_core::WalkSummary;

/// Progress information published after each processed file.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Files hashed so far.
    pub files_processed: u64,
    /// Entries skipped so far.
    pub files_skipped: u64,
    /// Per-file errors so far.
    pub errors_count: u64,
    /// Content bytes hashed so far.
    pub bytes_hashed: u64,
    /// File that was just processed.
    pub current_path: PathBuf,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            files_skipped: 0,
            errors_count: 0,
            bytes_hashed: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate hashing rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_processed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate hashing rate in bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.bytes_hashed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Run counters with timing. Counters only ever increase.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_processed: u64,
    files_skipped: u64,
    errors_count: u64,
    bytes_hashed: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_processed: 0,
            files_skipped: 0,
            errors_count: 0,
            bytes_hashed: 0,
        }
    }

    pub fn record_processed(&mut self, size: u64) {
        self.files_processed += 1;
        self.bytes_hashed += size;
    }

    pub fn record_skip(&mut self) {
        self.files_skipped += 1;
    }

    pub fn record_error(&mut self) {
        self.errors_count += 1;
    }

    pub fn snapshot(&self, current_path: PathBuf) -> ScanProgress {
        ScanProgress {
            files_processed: self.files_processed,
            files_skipped: self.files_skipped,
            errors_count: self.errors_count,
            bytes_hashed: self.bytes_hashed,
            current_path,
            elapsed: self.start_time.elapsed(),
        }
    }

    pub fn finish(&self, report_path: PathBuf, cancelled: bool) -> WalkSummary {
        WalkSummary {
            processed: self.files_processed,
            skipped: self.files_skipped,
            errors: self.errors_count,
            bytes_hashed: self.bytes_hashed,
            elapsed: self.start_time.elapsed(),
            report_path,
            cancelled,
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts() {
        let mut tracker = ProgressTracker::new();
        tracker.record_processed(10);
        tracker.record_processed(5);
        tracker.record_skip();
        tracker.record_error();

        let progress = tracker.snapshot(PathBuf::from("/x"));
        assert_eq!(progress.files_processed, 2);
        assert_eq!(progress.bytes_hashed, 15);
        assert_eq!(progress.current_path, PathBuf::from("/x"));

        let summary = tracker.finish(PathBuf::from("/out/r.csv"), false);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert!(!summary.cancelled);
    }

    #[test]
    fn test_rates_with_zero_elapsed() {
        let progress = ScanProgress::new();
        assert_eq!(progress.files_per_second(), 0.0);
        assert_eq!(progress.bytes_per_second(), 0.0);
    }
}
