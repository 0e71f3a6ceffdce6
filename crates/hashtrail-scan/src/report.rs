//! CSV report writer.
//!
//! Owns the report file for one run. Every field is quoted; the header is
//! written on creation and each row is flushed to the file as soon as it is
//! written, so an interrupted run keeps every row produced before the
//! interruption.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Writer, WriterBuilder};
use tracing::{debug, warn};

use hashtrail_core::{DigestAlgorithm, FileRecord, ScanError};

/// Append-only report sink.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
    writer: Option<Writer<File>>,
    rows: u64,
}

impl ReportWriter {
    /// Create the report file and write the header row.
    pub fn create(path: impl Into<PathBuf>, algorithm: DigestAlgorithm) -> Result<Self, ScanError> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| ScanError::ReportCreate {
            path: path.clone(),
            source,
        })?;
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(file);

        let mut report = Self {
            path,
            writer: Some(writer),
            rows: 0,
        };
        report.write_fields(&FileRecord::header(algorithm))?;
        debug!("Report opened at {}", report.path.display());
        Ok(report)
    }

    /// Append one row.
    pub fn write_record(&mut self, record: &FileRecord) -> Result<(), ScanError> {
        self.write_fields(&record.to_row())?;
        self.rows += 1;
        Ok(())
    }

    fn write_fields(&mut self, fields: &[String]) -> Result<(), ScanError> {
        let path = &self.path;
        let write_error = |source: io::Error| ScanError::ReportWrite {
            path: path.clone(),
            source,
        };

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| write_error(io::Error::other("report already closed")))?;
        writer
            .write_record(fields)
            .map_err(|e| write_error(e.into()))?;
        writer.flush().map_err(write_error)
    }

    /// Flush, sync and release the file. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), ScanError> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        let file = writer.into_inner().map_err(|e| ScanError::ReportWrite {
            path: self.path.clone(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| ScanError::ReportWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!("Report closed after {} rows", self.rows);
        Ok(())
    }

    /// Whether the file has been released.
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Location of the report.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ReportWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close report: {}", e);
        }
    }
}
