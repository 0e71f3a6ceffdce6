//! Error and warning types for hashing runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with the run configuration, detected before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Root path does not exist.
    #[error("Root path not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    RootNotADirectory { path: PathBuf },

    /// Root directory cannot be listed.
    #[error("Root path is not readable: {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report directory does not exist.
    #[error("Report directory not found: {path}")]
    ReportDirNotFound { path: PathBuf },

    /// Report directory is not a directory.
    #[error("Report path is not a directory: {path}")]
    ReportDirNotADirectory { path: PathBuf },

    /// Report directory does not accept new files.
    #[error("Report directory is not writable: {path}: {source}")]
    ReportDirNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No digest algorithm was selected.
    #[error("No digest algorithm selected")]
    MissingAlgorithm,

    /// Algorithm name is not one of the supported set.
    #[error("Unknown digest algorithm: {name} (expected md5, sha256 or sha512)")]
    UnknownAlgorithm { name: String },

    /// Any other invalid setting.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The report file could not be created.
    #[error("Cannot create report {path}: {source}")]
    ReportCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row or the header could not be written.
    #[error("Cannot write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Kind of per-file warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Path disappeared between discovery and processing.
    Vanished,
    /// Symbolic link, never followed.
    Symlink,
    /// Directory, device, socket, FIFO or other non-regular entry.
    NotAFile,
    /// Status query failed for a reason other than the path vanishing.
    MetadataError,
    /// File could not be opened.
    OpenError,
    /// File was opened but reading its content failed.
    ReadError,
    /// A directory could not be listed.
    DirectoryError,
}

impl WarningKind {
    /// Whether this warning counts toward the run's error counter.
    ///
    /// Everything else is a skip.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::OpenError | Self::ReadError | Self::DirectoryError
        )
    }
}

/// Non-fatal condition for a single path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path the warning refers to.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Path vanished before it could be processed.
    pub fn vanished(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Path vanished: {}", path.display()),
            path,
            kind: WarningKind::Vanished,
        }
    }

    /// Symbolic link skipped.
    pub fn symlink(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Symbolic link not followed: {}", path.display()),
            path,
            kind: WarningKind::Symlink,
        }
    }

    /// Entry is not a regular file.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Not a regular file: {}", path.display()),
            path,
            kind: WarningKind::NotAFile,
        }
    }

    /// Status query failed.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Metadata error: {error}"), WarningKind::MetadataError)
    }

    /// Open failed.
    pub fn open_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Open failed: {error}"), WarningKind::OpenError)
    }

    /// Read failed after a successful open.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Read error: {error}"), WarningKind::ReadError)
    }

    /// Directory listing failed.
    pub fn directory_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningKind::DirectoryError)
    }

    /// Whether this warning counts as an error rather than a skip.
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_from_config() {
        let err: ScanError = ConfigError::MissingAlgorithm.into();
        assert!(matches!(err, ScanError::Config(ConfigError::MissingAlgorithm)));
        assert_eq!(err.to_string(), "No digest algorithm selected");
    }

    #[test]
    fn test_skip_kinds_are_not_errors() {
        for kind in [
            WarningKind::Vanished,
            WarningKind::Symlink,
            WarningKind::NotAFile,
            WarningKind::MetadataError,
        ] {
            assert!(!kind.is_error(), "{kind:?} should be a skip");
        }
    }

    #[test]
    fn test_error_kinds() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(ScanWarning::open_error("/x", &io).is_error());
        assert!(ScanWarning::read_error("/x", &io).is_error());
        assert!(ScanWarning::directory_error("/x", "denied").is_error());
    }

    #[test]
    fn test_warning_messages() {
        let warning = ScanWarning::symlink("/test/link");
        assert_eq!(warning.kind, WarningKind::Symlink);
        assert!(warning.message.contains("/test/link"));

        let warning = ScanWarning::vanished("/test/gone");
        assert!(warning.message.starts_with("Path vanished"));
    }
}
