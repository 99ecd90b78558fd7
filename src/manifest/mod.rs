//! Deployment manifest
//!
//! The manifest is read eagerly for its top-level switches but bucket blocks
//! stay as raw YAML values until validation asks for them. A disabled job is
//! therefore accepted whatever its bucket section contains.

pub mod normalize;
pub mod raw;

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Top-level job properties for a blobstore backup/restorer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Global enable flag; everything else is ignored when false
    pub enabled: bool,

    /// Job-level service-account key (GCS), as a JSON string or inline mapping
    pub gcp_service_account_key: Option<Value>,

    /// Role name to bucket configuration block, in declaration order
    pub buckets: Option<Value>,
}

impl Manifest {
    /// Parse a manifest from YAML (JSON is accepted too)
    pub fn from_yaml_str(contents: &str) -> RenderResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(contents)
            .map_err(|e| RenderError::Manifest(format!("Failed to parse manifest: {}", e)))?;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => serde_yaml::from_value(value)
                .map_err(|e| RenderError::Manifest(format!("Failed to read manifest: {}", e))),
            _ => Err(RenderError::Manifest(
                "manifest must be a mapping of job properties".into(),
            )),
        }
    }

    /// Load a manifest from disk
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Io(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "loaded manifest");
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
impl Manifest {
    /// A manifest with the feature switched on and the given bucket blocks
    pub(crate) fn enabled_with_buckets(buckets: Value) -> Self {
        Self {
            enabled: true,
            gcp_service_account_key: None,
            buckets: Some(buckets),
        }
    }
}
