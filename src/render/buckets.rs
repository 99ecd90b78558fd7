//! `config/buckets.json` documents
//!
//! One wire shape per backend family, using the field names the
//! backup/restore binaries unmarshal. Roles keep their manifest order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::{BackendFamily, BucketDescriptor};
use crate::validation::ValidatedBuckets;

#[derive(Debug, Serialize)]
struct S3VersionedBucket<'a> {
    name: &'a str,
    region: &'a str,
    aws_access_key_id: &'a str,
    aws_secret_access_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aws_assumed_role_arn: Option<&'a str>,
    endpoint: &'a str,
    use_iam_profile: bool,
    force_path_style: bool,
}

#[derive(Debug, Serialize)]
struct S3UnversionedBucket<'a> {
    name: &'a str,
    region: &'a str,
    aws_access_key_id: &'a str,
    aws_secret_access_key: &'a str,
    endpoint: &'a str,
    use_iam_profile: bool,
    force_path_style: bool,
    backup: S3BackupBucket<'a>,
}

#[derive(Debug, Serialize)]
struct S3BackupBucket<'a> {
    name: &'a str,
    region: &'a str,
}

#[derive(Debug, Serialize)]
struct GcsBucket<'a> {
    bucket_name: &'a str,
    backup_bucket_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcp_service_account_key: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AzureContainer<'a> {
    name: &'a str,
    azure_storage_account: &'a str,
    azure_storage_key: &'a str,
    environment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    restore_from: Option<AzureRestoreFrom<'a>>,
}

#[derive(Debug, Serialize)]
struct AzureRestoreFrom<'a> {
    azure_storage_account: &'a str,
    azure_storage_key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BucketEntry<'a> {
    S3Versioned(S3VersionedBucket<'a>),
    S3Unversioned(S3UnversionedBucket<'a>),
    Gcs(GcsBucket<'a>),
    Azure(AzureContainer<'a>),
}

impl<'a> BucketEntry<'a> {
    fn from_descriptor(d: &'a BucketDescriptor) -> Self {
        let creds = &d.credentials;
        let key_id = creds
            .shared_secret
            .as_ref()
            .and_then(|pair| pair.key_id.as_deref())
            .unwrap_or("");
        let secret = creds
            .shared_secret
            .as_ref()
            .and_then(|pair| pair.secret.as_ref())
            .map(|s| s.as_str())
            .unwrap_or("");
        let loc = &d.location;

        match d.family {
            BackendFamily::S3Versioned => Self::S3Versioned(S3VersionedBucket {
                name: d.live().unwrap_or(""),
                region: loc.region.as_deref().unwrap_or(""),
                aws_access_key_id: key_id,
                aws_secret_access_key: secret,
                aws_assumed_role_arn: loc.assumed_role_arn.as_deref(),
                endpoint: loc.endpoint.as_deref().unwrap_or(""),
                use_iam_profile: creds.identity_reference,
                force_path_style: loc.force_path_style,
            }),
            BackendFamily::S3Unversioned => Self::S3Unversioned(S3UnversionedBucket {
                name: d.live().unwrap_or(""),
                region: loc.region.as_deref().unwrap_or(""),
                aws_access_key_id: key_id,
                aws_secret_access_key: secret,
                endpoint: loc.endpoint.as_deref().unwrap_or(""),
                use_iam_profile: creds.identity_reference,
                force_path_style: loc.force_path_style,
                backup: S3BackupBucket {
                    name: d.backup().unwrap_or(""),
                    region: loc.backup_region.as_deref().unwrap_or(""),
                },
            }),
            BackendFamily::Gcs => Self::Gcs(GcsBucket {
                bucket_name: d.live().unwrap_or(""),
                backup_bucket_name: d.backup().unwrap_or(""),
                gcp_service_account_key: creds.service_account_key.as_ref().map(|k| k.as_str()),
            }),
            BackendFamily::Azure => Self::Azure(AzureContainer {
                name: d.live().unwrap_or(""),
                azure_storage_account: key_id,
                azure_storage_key: secret,
                environment: loc.environment.as_deref().unwrap_or(""),
                restore_from: loc.restore_from.as_ref().map(|from| AzureRestoreFrom {
                    azure_storage_account: from.storage_account.as_deref().unwrap_or(""),
                    azure_storage_key: from
                        .storage_key
                        .as_ref()
                        .map(|k| k.as_str())
                        .unwrap_or(""),
                }),
            }),
        }
    }
}

/// The `buckets.json` object: role name to wire entry, in declaration order
pub struct BucketsDocument<'a> {
    entries: Vec<(&'a str, BucketEntry<'a>)>,
}

impl<'a> BucketsDocument<'a> {
    pub fn new(buckets: &'a ValidatedBuckets) -> Self {
        let entries = buckets
            .descriptors
            .iter()
            .map(|d| (d.role.as_str(), BucketEntry::from_descriptor(d)))
            .collect();
        Self { entries }
    }
}

impl Serialize for BucketsDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, entry) in &self.entries {
            map.serialize_entry(role, entry)?;
        }
        map.end()
    }
}
