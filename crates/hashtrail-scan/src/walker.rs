//! JWalk-based sequential tree walker.

use std::path::{Path, PathBuf};
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hashtrail_core::{ConfigError, RunConfig, ScanError, ScanWarning, WalkSummary};

use crate::classify::{FileOutcome, FileProcessor};
use crate::progress::{ProgressTracker, ScanProgress};
use crate::report::ReportWriter;

/// Walks a directory tree, hashing every regular file into one report.
///
/// Entries are visited depth-first with each directory's entries sorted by
/// name, so two runs over the same tree produce rows in the same order.
pub struct HashWalker {
    config: RunConfig,
    progress_tx: broadcast::Sender<ScanProgress>,
    cancel: CancellationToken,
    excluded: Vec<PathBuf>,
}

impl HashWalker {
    /// Validate `config` and create a walker for it.
    ///
    /// Nothing is written when validation fails.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (progress_tx, _) = broadcast::channel(100);
        Ok(Self {
            config,
            progress_tx,
            cancel: CancellationToken::new(),
            excluded: Vec::new(),
        })
    }

    /// Stop the walk early when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Never classify `path`, e.g. a log file living under the root.
    pub fn with_excluded(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded.push(path.into());
        self
    }

    /// Subscribe to per-file progress updates (sent only in verbose runs).
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk the whole tree.
    ///
    /// Per-file problems are logged and counted; only report failures abort.
    /// The report is opened once before the first entry and closed once after
    /// the last, on every exit path.
    pub fn walk(&self) -> Result<WalkSummary, ScanError> {
        let start = Instant::now();
        let root = self
            .config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&self.config.root, e))?;

        info!("Root path: {}", root.display());
        info!("Digest algorithm: {}", self.config.algorithm);

        let report_path = self.config.report_path();
        let mut report = ReportWriter::create(&report_path, self.config.algorithm)?;
        let excluded = self.excluded_paths(&report_path);

        let mut tracker = ProgressTracker::new();
        let walked = self.walk_entries(&root, &excluded, &mut report, &mut tracker);
        let closed = report.close();

        let cancelled = walked?;
        closed?;

        let summary = tracker.finish(report_path, cancelled);
        info!(
            "Walk finished: {} processed, {} skipped, {} errors in {:.2}s",
            summary.processed,
            summary.skipped,
            summary.errors,
            start.elapsed().as_secs_f64()
        );
        Ok(summary)
    }

    /// Returns `true` when the walk stopped because of cancellation.
    fn walk_entries(
        &self,
        root: &Path,
        excluded: &[PathBuf],
        report: &mut ReportWriter,
        tracker: &mut ProgressTracker,
    ) -> Result<bool, ScanError> {
        let processor = FileProcessor::new(&self.config);

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1);

        for entry_result in walker {
            if self.cancel.is_cancelled() {
                info!("Cancellation requested, stopping walk");
                return Ok(true);
            }

            let mut entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let warning = ScanWarning::directory_error(path, err.to_string());
                    record_directory_error(&warning, tracker);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_dir() {
                // jwalk reports an unlistable directory on the entry itself.
                if let Some(err) = entry.read_children_error.take() {
                    let warning = ScanWarning::directory_error(&path, err.to_string());
                    record_directory_error(&warning, tracker);
                } else {
                    debug!("Entering {}", path.display());
                }
                continue;
            }
            if excluded.contains(&path) {
                debug!("Not hashing own output {}", path.display());
                continue;
            }

            match processor.process(&path) {
                FileOutcome::Processed(record) => {
                    report.write_record(&record)?;
                    tracker.record_processed(record.metadata.size);
                    if self.config.verbose {
                        let _ = self.progress_tx.send(tracker.snapshot(path));
                    }
                }
                FileOutcome::Skipped(_) => tracker.record_skip(),
                FileOutcome::Errored(_) => tracker.record_error(),
            }
        }

        Ok(false)
    }

    /// Canonical paths of the report and any extra exclusions that exist.
    fn excluded_paths(&self, report_path: &Path) -> Vec<PathBuf> {
        std::iter::once(report_path)
            .chain(self.excluded.iter().map(PathBuf::as_path))
            .filter_map(|p| p.canonicalize().ok())
            .collect()
    }
}

fn record_directory_error(warning: &ScanWarning, tracker: &mut ProgressTracker) {
    warn!("Cannot read {}: {}", warning.path.display(), warning.message);
    tracker.record_error();
}
