//! Output path management for blobstore-render
//!
//! ## Job Directory Resolution Order
//!
//! 1. An explicit `--job-dir` argument
//! 2. `BLOBSTORE_RENDER_JOB_DIR` environment variable (if set)
//! 3. The current working directory
//!
//! Rendered files land under `<job dir>/config/`, matching the layout the
//! backup/restore job expects.

use std::path::PathBuf;

use crate::error::RenderError;

/// Environment variable overriding the job directory
pub const JOB_DIR_ENV: &str = "BLOBSTORE_RENDER_JOB_DIR";

/// Manages all paths written by blobstore-render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPaths {
    /// Root of the job's rendered files
    job_dir: PathBuf,
}

impl RenderPaths {
    /// Resolve the job directory from the environment or the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, RenderError> {
        let job_dir = match std::env::var(JOB_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| {
                RenderError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self { job_dir })
    }

    /// Create RenderPaths with a custom job directory
    pub fn with_job_dir(job_dir: PathBuf) -> Self {
        Self { job_dir }
    }

    pub fn job_dir(&self) -> &PathBuf {
        &self.job_dir
    }

    /// Get the config directory (<job dir>/config/)
    pub fn config_dir(&self) -> PathBuf {
        self.job_dir.join("config")
    }

    /// Get the path to buckets.json
    pub fn buckets_file(&self) -> PathBuf {
        self.config_dir().join("buckets.json")
    }

    /// Get the path to the job-level GCP service-account key
    pub fn service_account_key_file(&self) -> PathBuf {
        self.config_dir().join("gcp-service-account-key.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), RenderError> {
        std::fs::create_dir_all(self.config_dir())
            .map_err(|e| RenderError::Io(format!("Failed to create config directory: {}", e)))
    }
}
