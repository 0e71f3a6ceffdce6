//! Run configuration types.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::algorithm::DigestAlgorithm;
use crate::error::ConfigError;

/// File name of the report written into the report directory.
pub const DEFAULT_REPORT_NAME: &str = "file_system_report.csv";

/// Configuration for one hashing run.
///
/// Built once at startup and passed by reference to every component. Nothing
/// in the engine reads ambient state.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RunConfig {
    /// Root directory to hash.
    pub root: PathBuf,

    /// Directory receiving the report.
    pub report_dir: PathBuf,

    /// Digest algorithm applied to every file.
    pub algorithm: DigestAlgorithm,

    /// Publish a progress message for each processed file.
    #[builder(default = "false")]
    #[serde(default)]
    pub verbose: bool,

    /// Report file name inside `report_dir`.
    #[builder(default = "default_report_name()")]
    #[serde(default = "default_report_name")]
    pub report_name: String,
}

fn default_report_name() -> String {
    DEFAULT_REPORT_NAME.to_string()
}

impl RunConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        match self.report_dir {
            Some(ref dir) if dir.as_os_str().is_empty() => {
                return Err("Report directory cannot be empty".to_string());
            }
            None => return Err("Report directory is required".to_string()),
            _ => {}
        }
        if let Some(ref name) = self.report_name {
            let plain = Path::new(name).file_name().is_some_and(|n| n == name.as_str());
            if !plain {
                return Err(format!("Report name must be a plain file name: {name:?}"));
            }
        }
        Ok(())
    }
}

impl From<RunConfigBuilderError> for ConfigError {
    fn from(err: RunConfigBuilderError) -> Self {
        match err {
            RunConfigBuilderError::UninitializedField("algorithm") => ConfigError::MissingAlgorithm,
            RunConfigBuilderError::UninitializedField(field) => ConfigError::Invalid {
                message: format!("{field} is required"),
            },
            RunConfigBuilderError::ValidationError(message) => ConfigError::Invalid { message },
        }
    }
}

impl RunConfig {
    /// Create a new run config builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Create a config with default report name and verbosity off.
    pub fn new(
        root: impl Into<PathBuf>,
        report_dir: impl Into<PathBuf>,
        algorithm: DigestAlgorithm,
    ) -> Self {
        Self {
            root: root.into(),
            report_dir: report_dir.into(),
            algorithm,
            verbose: false,
            report_name: default_report_name(),
        }
    }

    /// Full path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.report_dir.join(&self.report_name)
    }

    /// Check the filesystem preconditions of the run.
    ///
    /// The root must be a listable directory and the report directory must
    /// accept new files. Nothing is left behind in the report directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_root()?;
        self.validate_report_dir()
    }

    fn validate_root(&self) -> Result<(), ConfigError> {
        let path = &self.root;
        let metadata = fs::metadata(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::RootNotFound { path: path.clone() },
            _ => ConfigError::RootUnreadable {
                path: path.clone(),
                source,
            },
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::RootNotADirectory { path: path.clone() });
        }
        fs::read_dir(path).map_err(|source| ConfigError::RootUnreadable {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }

    fn validate_report_dir(&self) -> Result<(), ConfigError> {
        let path = &self.report_dir;
        let metadata = fs::metadata(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConfigError::ReportDirNotFound { path: path.clone() },
            _ => ConfigError::ReportDirNotWritable {
                path: path.clone(),
                source,
            },
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::ReportDirNotADirectory { path: path.clone() });
        }

        let probe = tempfile::Builder::new()
            .prefix(".hashtrail-probe-")
            .tempfile_in(path)
            .map_err(|source| ConfigError::ReportDirNotWritable {
                path: path.clone(),
                source,
            })?;
        if let Err(e) = probe.close() {
            warn!("Could not remove write probe in {}: {}", path.display(), e);
        }
        Ok(())
    }
}
