//! Raw per-role bucket blocks, one shape per backend family
//!
//! Every field is optional here; presence rules are enforced later by the
//! validator, on the normalized descriptor.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;

/// A scalar manifest value read as text
///
/// Operators sometimes write numeric-looking names unquoted (`name: 2024`), so
/// numbers are accepted and kept in their canonical text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarText(pub String);

impl ScalarText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarTextVisitor;

        impl<'de> Visitor<'de> for ScalarTextVisitor {
            type Value = ScalarText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ScalarText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarTextVisitor)
    }
}

/// S3 bucket block (versioned and unversioned share one shape)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawS3Bucket {
    pub name: Option<ScalarText>,
    pub region: Option<ScalarText>,
    pub aws_access_key_id: Option<ScalarText>,
    pub aws_secret_access_key: Option<ScalarText>,
    pub aws_assumed_role_arn: Option<ScalarText>,
    pub endpoint: Option<ScalarText>,
    pub use_iam_profile: Option<bool>,
    pub force_path_style: Option<bool>,
    pub backup: Option<RawBackupBucket>,
}

/// Backup target of an unversioned S3 bucket
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBackupBucket {
    pub name: Option<ScalarText>,
    pub region: Option<ScalarText>,
}

/// GCS bucket block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGcsBucket {
    pub bucket_name: Option<ScalarText>,
    pub backup_bucket_name: Option<ScalarText>,
    /// JSON text, or an inline YAML mapping holding the key fields
    pub gcp_service_account_key: Option<Value>,
}

/// Azure container block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAzureContainer {
    pub name: Option<ScalarText>,
    pub azure_storage_account: Option<ScalarText>,
    pub azure_storage_key: Option<ScalarText>,
    pub environment: Option<ScalarText>,
    pub restore_from: Option<RawRestoreFrom>,
}

/// Source account an Azure container restores from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRestoreFrom {
    pub azure_storage_account: Option<ScalarText>,
    pub azure_storage_key: Option<ScalarText>,
}
