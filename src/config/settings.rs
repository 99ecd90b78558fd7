//! Render settings for blobstore-render
//!
//! Settings come from an optional YAML or JSON file (`--settings`); command
//! line arguments and their environment variables take precedence over it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::models::BackendFamily;

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings controlling a render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Backend family to render for, unless given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendFamily>,

    /// Pretty-print buckets.json
    #[serde(default)]
    pub pretty: bool,

    /// Log filter directive (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backend: None,
            pretty: false,
            log_level: default_log_level(),
        }
    }
}

impl RenderSettings {
    /// Load settings from a file, or use defaults when no file is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, RenderError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents)
            .map_err(|e| RenderError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Pick the backend family, command line first
    pub fn resolve_backend(
        &self,
        from_cli: Option<BackendFamily>,
    ) -> Result<BackendFamily, RenderError> {
        from_cli.or(self.backend).ok_or_else(|| {
            RenderError::Config(
                "no backend family given; pass --backend or set `backend` in the settings file"
                    .into(),
            )
        })
    }

    /// Pick the log level, command line first
    pub fn resolve_log_level<'a>(&'a self, from_cli: Option<&'a str>) -> &'a str {
        from_cli
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(&self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = RenderSettings::default();
        assert_eq!(settings.backend, None);
        assert!(!settings.pretty);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let settings = RenderSettings::load_or_default(None).unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_load_yaml_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yml");
        std::fs::write(&path, "backend: s3-unversioned\npretty: true\n").unwrap();

        let settings = RenderSettings::load_or_default(Some(&path)).unwrap();
        assert_eq!(settings.backend, Some(BackendFamily::S3Unversioned));
        assert!(settings.pretty);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_json_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"backend": "gcs", "log_level": "debug"}"#).unwrap();

        let settings = RenderSettings::load_or_default(Some(&path)).unwrap();
        assert_eq!(settings.backend, Some(BackendFamily::Gcs));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_unknown_backend_in_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yml");
        std::fs::write(&path, "backend: swift\n").unwrap();

        let result = RenderSettings::load_or_default(Some(&path));
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn test_resolve_backend_precedence() {
        let settings = RenderSettings {
            backend: Some(BackendFamily::Gcs),
            ..Default::default()
        };
        assert_eq!(
            settings.resolve_backend(Some(BackendFamily::Azure)).unwrap(),
            BackendFamily::Azure
        );
        assert_eq!(settings.resolve_backend(None).unwrap(), BackendFamily::Gcs);
        assert!(RenderSettings::default().resolve_backend(None).is_err());
    }

    #[test]
    fn test_resolve_log_level() {
        let settings = RenderSettings::default();
        assert_eq!(settings.resolve_log_level(Some("debug")), "debug");
        assert_eq!(settings.resolve_log_level(Some(" ")), "info");
        assert_eq!(settings.resolve_log_level(None), "info");
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = RenderSettings {
            backend: Some(BackendFamily::S3Versioned),
            pretty: true,
            log_level: "warn".into(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, deserialized);
    }
}
