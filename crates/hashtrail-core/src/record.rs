//! Per-file metadata and report records.

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::algorithm::DigestAlgorithm;

/// Report columns. The digest column is labelled with the algorithm in use.
pub const REPORT_COLUMNS: [&str; 10] = [
    "File",
    "Path",
    "Size",
    "Modified Time",
    "Accessed Time",
    "Created Time",
    "<algorithm>",
    "Owner",
    "Group",
    "Mode",
];

const DIGEST_COLUMN: usize = 6;

/// Render a timestamp for the report, in UTC.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

/// MAC timestamps of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Last access time.
    pub accessed: Option<SystemTime>,
    /// Creation time, or inode change time where birth time is unavailable.
    pub created: Option<SystemTime>,
}

impl Timestamps {
    /// Create timestamps with all available times.
    pub fn new(
        modified: Option<SystemTime>,
        accessed: Option<SystemTime>,
        created: Option<SystemTime>,
    ) -> Self {
        Self {
            modified,
            accessed,
            created,
        }
    }
}

/// Status snapshot of one file, taken before its content is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Size in bytes.
    pub size: u64,
    /// MAC times.
    pub timestamps: Timestamps,
    /// Numeric owner id.
    pub uid: u32,
    /// Numeric group id.
    pub gid: u32,
    /// Full mode word (file type and permission bits).
    pub mode: u32,
}

/// One report row describing a processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name without directories.
    pub name: CompactString,
    /// Full path as visited.
    pub path: PathBuf,
    /// Metadata snapshot.
    pub metadata: FileMetadata,
    /// Uppercase hex digest of the content.
    pub digest: String,
}

impl FileRecord {
    /// Assemble a record.
    pub fn new(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        metadata: FileMetadata,
        digest: String,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            metadata,
            digest,
        }
    }

    /// Header row for a report using `algorithm`.
    pub fn header(algorithm: DigestAlgorithm) -> [String; 10] {
        let mut header = REPORT_COLUMNS.map(str::to_string);
        header[DIGEST_COLUMN] = algorithm.label();
        header
    }

    /// Fields in report column order.
    pub fn to_row(&self) -> [String; 10] {
        let ts = &self.metadata.timestamps;
        let time = |t: Option<SystemTime>| t.map(format_timestamp).unwrap_or_default();
        [
            self.name.to_string(),
            self.path.to_string_lossy().into_owned(),
            self.metadata.size.to_string(),
            time(ts.modified),
            time(ts.accessed),
            time(ts.created),
            self.digest.clone(),
            self.metadata.uid.to_string(),
            self.metadata.gid.to_string(),
            format!("{:o}", self.metadata.mode),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> FileRecord {
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        FileRecord::new(
            "notes.txt",
            "/data/notes.txt",
            FileMetadata {
                size: 42,
                timestamps: Timestamps::new(Some(t), Some(t), None),
                uid: 1000,
                gid: 100,
                mode: 0o100644,
            },
            "ABCDEF".to_string(),
        )
    }

    #[test]
    fn test_format_timestamp() {
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(format_timestamp(t), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_header_uses_algorithm_label() {
        let header = FileRecord::header(DigestAlgorithm::Sha512);
        assert_eq!(header[0], "File");
        assert_eq!(header[6], "SHA512");
        assert_eq!(header[9], "Mode");
    }

    #[test]
    fn test_row_order() {
        let row = sample().to_row();
        assert_eq!(row[0], "notes.txt");
        assert_eq!(row[1], "/data/notes.txt");
        assert_eq!(row[2], "42");
        assert_eq!(row[3], "2023-11-14 22:13:20 UTC");
        assert_eq!(row[5], "");
        assert_eq!(row[6], "ABCDEF");
        assert_eq!(row[7], "1000");
        assert_eq!(row[8], "100");
        assert_eq!(row[9], "100644");
    }
}
