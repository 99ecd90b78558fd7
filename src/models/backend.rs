//! Backend family model
//!
//! Each supported blobstore flavour names its bucket and credential fields
//! differently. `BackendFamily` holds that vocabulary so the validator and the
//! renderer never hard-code field names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported blobstore backend families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendFamily {
    /// S3 buckets with object versioning (live bucket only)
    S3Versioned,
    /// S3 buckets copied into a dedicated backup bucket
    S3Unversioned,
    /// Google Cloud Storage buckets with a backup bucket
    Gcs,
    /// Azure Blob Storage containers (soft-delete snapshots, no backup container)
    Azure,
}

impl BackendFamily {
    /// All families, in a stable order
    pub const ALL: [BackendFamily; 4] = [
        Self::S3Versioned,
        Self::S3Unversioned,
        Self::Gcs,
        Self::Azure,
    ];

    /// Parse a backend family from its kebab-case name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "s3-versioned" | "s3_versioned" => Some(Self::S3Versioned),
            "s3-unversioned" | "s3_unversioned" => Some(Self::S3Unversioned),
            "gcs" => Some(Self::Gcs),
            "azure" => Some(Self::Azure),
            _ => None,
        }
    }

    /// Kebab-case name, as accepted by `parse`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3Versioned => "s3-versioned",
            Self::S3Unversioned => "s3-unversioned",
            Self::Gcs => "gcs",
            Self::Azure => "azure",
        }
    }

    /// Name of the deployment job that consumes the rendered configuration
    pub fn job_name(&self) -> &'static str {
        match self {
            Self::S3Versioned => "s3-versioned-blobstore-backup-restorer",
            Self::S3Unversioned => "s3-unversioned-blobstore-backup-restorer",
            Self::Gcs => "gcs-blobstore-backup-restorer",
            Self::Azure => "azure-blobstore-backup-restorer",
        }
    }

    /// Manifest field holding the live bucket identifier
    pub fn live_field(&self) -> &'static str {
        match self {
            Self::Gcs => "bucket_name",
            Self::S3Versioned | Self::S3Unversioned | Self::Azure => "name",
        }
    }

    /// Manifest field holding the backup bucket identifier, if the family has one
    pub fn backup_field(&self) -> Option<&'static str> {
        match self {
            Self::S3Unversioned => Some("backup.name"),
            Self::Gcs => Some("backup_bucket_name"),
            Self::S3Versioned | Self::Azure => None,
        }
    }

    /// Whether roles pair a live bucket with a backup bucket
    pub fn has_backup_pair(&self) -> bool {
        self.backup_field().is_some()
    }

    /// Whether the family carries a structured service-account key
    pub fn uses_service_account_key(&self) -> bool {
        matches!(self, Self::Gcs)
    }
}

impl fmt::Display for BackendFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
            format!(
                "unknown backend family '{}' (expected one of: {})",
                s,
                known.join(", ")
            )
        })
    }
}

/// Azure cloud environments a container can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzureEnvironment {
    /// Public Azure cloud (default)
    AzureCloud,
    AzureChinaCloud,
    AzureUSGovernment,
    AzureGermanCloud,
}

impl AzureEnvironment {
    /// Environment assumed when the manifest leaves it blank
    pub const DEFAULT: AzureEnvironment = AzureEnvironment::AzureCloud;

    /// Parse an environment name (exact match, as the restore binary expects)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AzureCloud" => Some(Self::AzureCloud),
            "AzureChinaCloud" => Some(Self::AzureChinaCloud),
            "AzureUSGovernment" => Some(Self::AzureUSGovernment),
            "AzureGermanCloud" => Some(Self::AzureGermanCloud),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AzureCloud => "AzureCloud",
            Self::AzureChinaCloud => "AzureChinaCloud",
            Self::AzureUSGovernment => "AzureUSGovernment",
            Self::AzureGermanCloud => "AzureGermanCloud",
        }
    }
}

impl fmt::Display for AzureEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_family() {
        assert_eq!(BackendFamily::parse("gcs"), Some(BackendFamily::Gcs));
        assert_eq!(
            BackendFamily::parse(" S3-Unversioned "),
            Some(BackendFamily::S3Unversioned)
        );
        assert_eq!(
            BackendFamily::parse("s3_versioned"),
            Some(BackendFamily::S3Versioned)
        );
        assert_eq!(BackendFamily::parse("swift"), None);
    }

    #[test]
    fn test_from_str_error_lists_families() {
        let err = "swift".parse::<BackendFamily>().unwrap_err();
        assert!(err.contains("swift"));
        assert!(err.contains("s3-versioned, s3-unversioned, gcs, azure"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for family in BackendFamily::ALL {
            assert_eq!(BackendFamily::parse(&family.to_string()), Some(family));
        }
    }

    #[test]
    fn test_field_vocabulary() {
        assert_eq!(BackendFamily::Gcs.live_field(), "bucket_name");
        assert_eq!(BackendFamily::Gcs.backup_field(), Some("backup_bucket_name"));
        assert_eq!(BackendFamily::S3Unversioned.backup_field(), Some("backup.name"));
        assert!(!BackendFamily::S3Versioned.has_backup_pair());
        assert!(!BackendFamily::Azure.has_backup_pair());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&BackendFamily::S3Unversioned).unwrap();
        assert_eq!(json, "\"s3-unversioned\"");
    }

    #[test]
    fn test_azure_environment() {
        assert_eq!(
            AzureEnvironment::parse("AzureChinaCloud"),
            Some(AzureEnvironment::AzureChinaCloud)
        );
        assert_eq!(AzureEnvironment::parse("azurecloud"), None);
    }
}
