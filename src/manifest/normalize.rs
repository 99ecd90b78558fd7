//! Raw bucket blocks to normalized descriptors
//!
//! All string fields are trimmed, and absent, null, or whitespace-only values
//! collapse to `None`. Nothing here decides whether a configuration is
//! acceptable; that is the validator's job.

use serde_yaml::Value;
use tracing::debug;

use super::raw::{RawAzureContainer, RawGcsBucket, RawS3Bucket, ScalarText};
use super::Manifest;
use crate::models::{
    AzureEnvironment, BackendFamily, BucketDescriptor, BucketRole, Credentials, Location,
    RestoreFrom, Secret, SharedSecret,
};
use crate::validation::ValidationError;

/// Trim a raw scalar, treating blank as absent
pub fn normalize_text(raw: Option<ScalarText>) -> Option<String> {
    raw.and_then(|text| {
        let trimmed = text.as_str().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// The manifest's bucket entries, in declaration order
pub fn bucket_entries(manifest: &Manifest) -> Result<Vec<(&Value, &Value)>, ValidationError> {
    match &manifest.buckets {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping.iter().collect()),
        Some(_) => Err(ValidationError::MalformedManifest {
            reason: "buckets must be a mapping of role names to bucket configuration".into(),
        }),
    }
}

/// Turn a manifest key into a role
pub fn role_key(key: &Value) -> Result<BucketRole, ValidationError> {
    match key {
        Value::String(raw) => BucketRole::parse(raw).ok_or(ValidationError::BlankKey),
        Value::Number(n) => BucketRole::parse(&n.to_string()).ok_or(ValidationError::BlankKey),
        Value::Null => Err(ValidationError::BlankKey),
        _ => Err(ValidationError::MalformedManifest {
            reason: "bucket role keys must be strings".into(),
        }),
    }
}

/// Normalize one role's block
///
/// Returns `Ok(None)` when the block is null: the role is declared but carries
/// no configuration, so no descriptor is produced for it.
pub fn normalize_block(
    family: BackendFamily,
    role: BucketRole,
    block: &Value,
) -> Result<Option<BucketDescriptor>, ValidationError> {
    if block.is_null() {
        debug!(role = %role, "skipping role with null configuration block");
        return Ok(None);
    }

    if !block.is_mapping() {
        return Err(ValidationError::MalformedBlock {
            role: role.to_string(),
            reason: "bucket configuration must be a mapping".into(),
        });
    }

    let descriptor = match family {
        BackendFamily::S3Versioned | BackendFamily::S3Unversioned => {
            normalize_s3(family, role.clone(), read_block(&role, block)?)
        }
        BackendFamily::Gcs => normalize_gcs(role.clone(), read_block(&role, block)?),
        BackendFamily::Azure => normalize_azure(role.clone(), read_block(&role, block)?),
    };

    debug!(role = %role, family = %family, "normalized bucket block");
    Ok(Some(descriptor))
}

/// Job-level service-account key, if one was supplied
pub fn job_service_account_key(manifest: &Manifest) -> Option<Secret> {
    manifest
        .gcp_service_account_key
        .as_ref()
        .and_then(payload_text)
}

fn read_block<T>(role: &BucketRole, block: &Value) -> Result<T, ValidationError>
where
    T: serde::de::DeserializeOwned,
{
    serde_yaml::from_value(block.clone()).map_err(|e| ValidationError::MalformedBlock {
        role: role.to_string(),
        reason: e.to_string(),
    })
}

fn normalize_s3(family: BackendFamily, role: BucketRole, raw: RawS3Bucket) -> BucketDescriptor {
    let (backup_name, backup_region) = match (family, raw.backup) {
        (BackendFamily::S3Unversioned, Some(backup)) => {
            (normalize_text(backup.name), normalize_text(backup.region))
        }
        _ => (None, None),
    };

    BucketDescriptor {
        family,
        role,
        live_identifier: normalize_text(raw.name),
        backup_identifier: backup_name,
        credentials: Credentials {
            shared_secret: SharedSecret::from_parts(
                normalize_text(raw.aws_access_key_id),
                normalize_text(raw.aws_secret_access_key),
            ),
            identity_reference: raw.use_iam_profile.unwrap_or(false),
            service_account_key: None,
        },
        location: Location {
            region: normalize_text(raw.region),
            backup_region,
            endpoint: normalize_text(raw.endpoint),
            force_path_style: raw.force_path_style.unwrap_or(false),
            assumed_role_arn: normalize_text(raw.aws_assumed_role_arn),
            ..Default::default()
        },
    }
}

fn normalize_gcs(role: BucketRole, raw: RawGcsBucket) -> BucketDescriptor {
    BucketDescriptor {
        family: BackendFamily::Gcs,
        role,
        live_identifier: normalize_text(raw.bucket_name),
        backup_identifier: normalize_text(raw.backup_bucket_name),
        credentials: Credentials {
            service_account_key: raw.gcp_service_account_key.as_ref().and_then(payload_text),
            ..Default::default()
        },
        location: Location::default(),
    }
}

fn normalize_azure(role: BucketRole, raw: RawAzureContainer) -> BucketDescriptor {
    let restore_from = raw.restore_from.and_then(|from| {
        let storage_account = normalize_text(from.azure_storage_account);
        let storage_key = normalize_text(from.azure_storage_key).map(Secret::from);
        if storage_account.is_none() && storage_key.is_none() {
            None
        } else {
            Some(RestoreFrom {
                storage_account,
                storage_key,
            })
        }
    });

    let environment = normalize_text(raw.environment)
        .unwrap_or_else(|| AzureEnvironment::DEFAULT.as_str().to_string());

    BucketDescriptor {
        family: BackendFamily::Azure,
        role,
        live_identifier: normalize_text(raw.name),
        backup_identifier: None,
        credentials: Credentials {
            shared_secret: SharedSecret::from_parts(
                normalize_text(raw.azure_storage_account),
                normalize_text(raw.azure_storage_key),
            ),
            ..Default::default()
        },
        location: Location {
            environment: Some(environment),
            restore_from,
            ..Default::default()
        },
    }
}

/// Text of a structured credential value
///
/// Strings are taken as-is (trimmed). Inline YAML structures are re-encoded as
/// JSON; if that is impossible the YAML text is kept so the payload check
/// reports it.
fn payload_text(value: &Value) -> Option<Secret> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => serde_json::to_string(other)
            .or_else(|_| serde_yaml::to_string(other))
            .unwrap_or_default(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(Secret::new(text))
    }
}
