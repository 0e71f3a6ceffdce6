//! Metadata extraction.
//!
//! One `lstat`-style query per path supplies both the entry type used for
//! classification and the metadata written to the report. It is taken before
//! the content is opened, so the recorded access time is the one the file had
//! when the scan reached it. Reading the content afterwards may still move the
//! access time on disk, depending on mount options (`relatime`, `noatime`).

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use hashtrail_core::{FileMetadata, Timestamps};

/// Entry type as seen without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Sockets, FIFOs, devices.
    Other,
}

/// Result of the single status query for a path.
#[derive(Debug, Clone, Copy)]
pub struct StatSnapshot {
    /// Entry type.
    pub kind: EntryKind,
    /// Metadata for the report.
    pub metadata: FileMetadata,
}

/// Query the status of `path` without following a final symlink.
pub fn extract_metadata(path: &Path) -> io::Result<StatSnapshot> {
    let metadata = fs::symlink_metadata(path)?;
    Ok(snapshot(&metadata))
}

/// Convert std metadata into a snapshot.
pub fn snapshot(metadata: &Metadata) -> StatSnapshot {
    let file_type = metadata.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    StatSnapshot {
        kind,
        metadata: FileMetadata {
            size: metadata.len(),
            timestamps: Timestamps::new(
                metadata.modified().ok(),
                metadata.accessed().ok(),
                metadata.created().ok().or_else(|| get_ctime(metadata)),
            ),
            uid: get_uid(metadata),
            gid: get_gid(metadata),
            mode: get_mode(metadata),
        },
    }
}

// Cross-platform metadata helpers

/// Inode change time, used when the platform reports no birth time.
#[cfg(unix)]
fn get_ctime(metadata: &Metadata) -> Option<SystemTime> {
    let secs = u64::try_from(metadata.ctime()).ok()?;
    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    SystemTime::UNIX_EPOCH.checked_add(std::time::Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn get_ctime(_metadata: &Metadata) -> Option<SystemTime> {
    None
}

#[cfg(unix)]
fn get_uid(metadata: &Metadata) -> u32 {
    metadata.uid()
}

#[cfg(not(unix))]
fn get_uid(_metadata: &Metadata) -> u32 {
    0
}

#[cfg(unix)]
fn get_gid(metadata: &Metadata) -> u32 {
    metadata.gid()
}

#[cfg(not(unix))]
fn get_gid(_metadata: &Metadata) -> u32 {
    0
}

#[cfg(unix)]
fn get_mode(metadata: &Metadata) -> u32 {
    metadata.mode()
}

#[cfg(not(unix))]
fn get_mode(_metadata: &Metadata) -> u32 {
    0
}
