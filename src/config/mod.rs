//! Configuration module for blobstore-render
//!
//! This module provides:
//! - job directory and output file resolution
//! - render settings (file-backed, overridable from the command line)

pub mod paths;
pub mod settings;

pub use paths::RenderPaths;
pub use settings::RenderSettings;
