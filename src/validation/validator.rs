//! Validator: one fail-fast pass over the declared bucket set
//!
//! Check order:
//!
//! 1. feature disabled: accept, nothing else runs
//! 2. role keys non-blank and unique once trimmed (blocks are normalized in
//!    the same pass)
//! 3. required identifier fields present
//! 4. live and backup identifiers distinct per role
//! 5. credential policy
//! 6. structured credential payloads parse (roles, then the job-level key)
//! 7. backend-specific fields
//! 8. cross-role collisions
//!
//! Each check runs over every role in manifest order before the next check
//! starts, so a role-local problem is always reported ahead of a cross-role
//! one.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::manifest::{normalize, Manifest};
use crate::models::{AzureEnvironment, BackendFamily, BucketDescriptor};

use super::{collisions, credentials, ValidatedBuckets, ValidationError, Verdict};

/// Validates manifests for one backend family
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    family: BackendFamily,
}

impl Validator {
    pub fn new(family: BackendFamily) -> Self {
        Self { family }
    }

    /// Decide whether the manifest's bucket declarations are safe to render
    pub fn validate(&self, manifest: &Manifest) -> Verdict {
        match self.run(manifest) {
            Ok(buckets) => {
                info!(
                    family = %self.family,
                    enabled = buckets.enabled,
                    roles = buckets.descriptors.len(),
                    "bucket configuration accepted"
                );
                Verdict::Accepted(buckets)
            }
            Err(err) => {
                warn!(family = %self.family, kind = err.kind(), "bucket configuration rejected: {}", err);
                Verdict::Rejected(err)
            }
        }
    }

    fn run(&self, manifest: &Manifest) -> Result<ValidatedBuckets, ValidationError> {
        if !manifest.enabled {
            debug!(family = %self.family, "backup disabled, skipping bucket validation");
            return Ok(ValidatedBuckets::disabled(self.family));
        }

        let descriptors = self.normalize_roles(manifest)?;

        for descriptor in &descriptors {
            self.check_required_fields(descriptor)?;
        }

        for descriptor in &descriptors {
            collisions::check_distinct(descriptor)?;
        }

        for descriptor in &descriptors {
            credentials::evaluate(descriptor)?;
        }

        for descriptor in &descriptors {
            if let Some(key) = &descriptor.credentials.service_account_key {
                credentials::check_service_account_key(Some(&descriptor.role), key)?;
            }
        }
        let service_account_key = if self.family.uses_service_account_key() {
            normalize::job_service_account_key(manifest)
        } else {
            None
        };
        if let Some(key) = &service_account_key {
            credentials::check_service_account_key(None, key)?;
        }

        for descriptor in &descriptors {
            self.check_backend_fields(descriptor)?;
        }

        collisions::evaluate(&descriptors)?;

        Ok(ValidatedBuckets {
            family: self.family,
            enabled: true,
            descriptors,
            service_account_key,
        })
    }

    fn normalize_roles(&self, manifest: &Manifest) -> Result<Vec<BucketDescriptor>, ValidationError> {
        let entries = normalize::bucket_entries(manifest)?;
        let mut descriptors = Vec::with_capacity(entries.len());
        let mut seen = HashSet::with_capacity(entries.len());

        for (key, block) in entries {
            let role = normalize::role_key(key)?;
            if !seen.insert(role.clone()) {
                return Err(ValidationError::DuplicateRole {
                    role: role.to_string(),
                });
            }
            if let Some(descriptor) = normalize::normalize_block(self.family, role, block)? {
                descriptors.push(descriptor);
            }
        }

        Ok(descriptors)
    }

    fn check_required_fields(&self, descriptor: &BucketDescriptor) -> Result<(), ValidationError> {
        let live_field = self.family.live_field();
        let missing: Vec<&str> = match self.family.backup_field() {
            Some(backup_field) => {
                let mut missing = Vec::new();
                if descriptor.live().is_none() {
                    missing.push(live_field);
                }
                if descriptor.backup().is_none() {
                    missing.push(backup_field);
                }
                missing
            }
            None if descriptor.live().is_none() => vec![live_field],
            None => Vec::new(),
        };

        if missing.is_empty() {
            return Ok(());
        }

        Err(ValidationError::MissingField {
            role: descriptor.role.to_string(),
            fields: missing.join(" and "),
        })
    }

    fn check_backend_fields(&self, descriptor: &BucketDescriptor) -> Result<(), ValidationError> {
        if self.family != BackendFamily::Azure {
            return Ok(());
        }

        match descriptor.location.environment.as_deref() {
            None => Ok(()),
            Some(env) if AzureEnvironment::parse(env).is_some() => Ok(()),
            Some(env) => Err(ValidationError::UnsupportedEnvironment {
                role: descriptor.role.to_string(),
                value: env.to_string(),
            }),
        }
    }
}

/// Validate a manifest for a backend family
pub fn validate(family: BackendFamily, manifest: &Manifest) -> Verdict {
    Validator::new(family).validate(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(yaml: &str) -> Manifest {
        Manifest::from_yaml_str(yaml).unwrap()
    }

    fn rejection(family: BackendFamily, yaml: &str) -> ValidationError {
        match validate(family, &manifest(yaml)) {
            Verdict::Rejected(err) => err,
            Verdict::Accepted(buckets) => panic!("expected rejection, got {:?}", buckets),
        }
    }

    fn accepted(family: BackendFamily, yaml: &str) -> ValidatedBuckets {
        match validate(family, &manifest(yaml)) {
            Verdict::Accepted(buckets) => buckets,
            Verdict::Rejected(err) => panic!("expected acceptance, got {}", err),
        }
    }

    #[test]
    fn test_disabled_skips_everything() {
        let buckets = accepted(
            BackendFamily::Gcs,
            r#"
enabled: false
gcp_service_account_key: "{not valid json}"
buckets:
  " ": {bucket_name: same, backup_bucket_name: same}
  droplets: [not, a, mapping]
"#,
        );
        assert!(!buckets.enabled);
        assert!(buckets.descriptors.is_empty());
        assert!(buckets.service_account_key.is_none());
    }

    #[test]
    fn test_absent_enabled_flag_means_disabled() {
        let buckets = accepted(BackendFamily::S3Versioned, "buckets:\n  droplets: ~\n");
        assert!(!buckets.enabled);
    }

    #[test]
    fn test_self_collision_names_role() {
        let err = rejection(
            BackendFamily::Gcs,
            r#"
enabled: true
buckets:
  droplets:
    bucket_name: my_bucket
    backup_bucket_name: my_bucket
    gcp_service_account_key: "{}"
"#,
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration for droplets, bucket_name and backup_bucket_name must be distinct"
        );
    }

    #[test]
    fn test_cross_collision_names_identifier() {
        let err = rejection(
            BackendFamily::Gcs,
            r#"
enabled: true
buckets:
  droplets:
    bucket_name: bucket1
    backup_bucket_name: bucket2
    gcp_service_account_key: "{}"
  packages:
    bucket_name: bucket2
    backup_bucket_name: bucket3
    gcp_service_account_key: "{}"
"#,
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration, bucket2 is used as a source bucket and a backup bucket"
        );
    }

    #[test]
    fn test_credential_conflict_names_role() {
        let err = rejection(
            BackendFamily::S3Versioned,
            r#"
enabled: true
buckets:
  droplets:
    name: the_droplets_bucket
    region: eu-west-1
    aws_access_key_id: AWS_ACCESS_KEY_ID
    aws_secret_access_key: AWS_SECRET_ACCESS_KEY
    use_iam_profile: true
"#,
        );
        assert_eq!(
            err,
            ValidationError::CredentialConflict {
                role: "droplets".into()
            }
        );
    }

    #[test]
    fn test_credential_conflict_independent_of_other_roles() {
        let err = rejection(
            BackendFamily::S3Unversioned,
            r#"
enabled: true
buckets:
  droplets:
    name: A
    use_iam_profile: true
    backup: {name: B}
  packages:
    name: C
    aws_access_key_id: KEY
    aws_secret_access_key: SECRET
    use_iam_profile: true
    backup: {name: D}
"#,
        );
        assert_eq!(err.role(), Some("packages"));
        assert_eq!(err.kind(), "credential_conflict");
    }

    #[test]
    fn test_valid_configuration_accepted() {
        let buckets = accepted(
            BackendFamily::S3Unversioned,
            r#"
enabled: true
buckets:
  droplets:
    name: A
    region: eu-west-1
    aws_access_key_id: AWS_ACCESS_KEY_ID
    aws_secret_access_key: AWS_SECRET_ACCESS_KEY
    endpoint: endpoint_to_s3_compatible_blobstore
    use_iam_profile: false
    backup:
      name: B
      region: eu-west-2
"#,
        );
        assert!(buckets.enabled);
        assert_eq!(buckets.descriptors.len(), 1);
        assert_eq!(buckets.descriptors[0].live(), Some("A"));
    }

    #[test]
    fn test_malformed_job_level_key() {
        let yaml = r#"
enabled: true
gcp_service_account_key: "{not valid json}"
buckets:
  droplets: {bucket_name: A, backup_bucket_name: B}
"#;
        let err = rejection(BackendFamily::Gcs, yaml);
        assert_eq!(err.kind(), "malformed_credential_payload");
        assert!(err.to_string().contains("not valid JSON"));

        let disabled = yaml.replace("enabled: true", "enabled: false");
        assert!(validate(BackendFamily::Gcs, &manifest(&disabled)).is_accepted());
    }

    #[test]
    fn test_job_level_key_checked_without_roles() {
        let err = rejection(
            BackendFamily::Gcs,
            "enabled: true\ngcp_service_account_key: 'nope'\n",
        );
        assert_eq!(err.kind(), "malformed_credential_payload");
    }

    #[test]
    fn test_job_level_key_ignored_for_other_families() {
        let buckets = accepted(
            BackendFamily::S3Versioned,
            "enabled: true\ngcp_service_account_key: 'nope'\nbuckets:\n  droplets: {name: A}\n",
        );
        assert!(buckets.service_account_key.is_none());
    }

    #[test]
    fn test_blank_role_key() {
        let err = rejection(
            BackendFamily::Gcs,
            "enabled: true\nbuckets:\n  ' ': {bucket_name: A, backup_bucket_name: B}\n",
        );
        assert_eq!(err, ValidationError::BlankKey);
    }

    #[test]
    fn test_missing_fields() {
        let err = rejection(
            BackendFamily::S3Unversioned,
            "enabled: true\nbuckets:\n  droplets:\n    name: A\n    backup:\n      region: eu-west-2\n",
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration for droplets, backup.name must be configured"
        );

        let err = rejection(
            BackendFamily::Gcs,
            "enabled: true\nbuckets:\n  droplets: {bucket_name: ' '}\n",
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration for droplets, bucket_name and backup_bucket_name must be configured"
        );

        let err = rejection(
            BackendFamily::Azure,
            "enabled: true\nbuckets:\n  droplets: {azure_storage_account: acct}\n",
        );
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn test_roles_equal_after_trimming_are_duplicates() {
        let err = rejection(
            BackendFamily::Gcs,
            r#"
enabled: true
buckets:
  droplets: {bucket_name: a, backup_bucket_name: b}
  ' droplets': {bucket_name: c, backup_bucket_name: d}
"#,
        );
        assert_eq!(
            err,
            ValidationError::DuplicateRole {
                role: "droplets".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration, droplets is declared more than once"
        );
    }

    #[test]
    fn test_null_block_role_still_counts_for_duplicates() {
        let err = rejection(
            BackendFamily::S3Versioned,
            "enabled: true\nbuckets:\n  'packages ': ~\n  packages: {name: live}\n",
        );
        assert_eq!(err.kind(), "duplicate_role");
        assert_eq!(err.role(), Some("packages"));
    }

    #[test]
    fn test_null_role_block_is_skipped() {
        let buckets = accepted(
            BackendFamily::Gcs,
            "enabled: true\nbuckets:\n  droplets: ~\n  packages: {bucket_name: A, backup_bucket_name: B}\n",
        );
        assert_eq!(buckets.descriptors.len(), 1);
        assert_eq!(buckets.descriptors[0].role.as_str(), "packages");
    }

    #[test]
    fn test_self_collision_reported_before_cross_collision() {
        let err = rejection(
            BackendFamily::Gcs,
            r#"
enabled: true
buckets:
  droplets: {bucket_name: bucket1, backup_bucket_name: bucket2}
  packages: {bucket_name: bucket2, backup_bucket_name: bucket2}
"#,
        );
        assert_eq!(err.kind(), "self_collision");
        assert_eq!(err.role(), Some("packages"));
    }

    #[test]
    fn test_required_fields_checked_for_all_roles_before_distinctness() {
        let err = rejection(
            BackendFamily::Gcs,
            r#"
enabled: true
buckets:
  droplets: {bucket_name: same, backup_bucket_name: same}
  packages: {bucket_name: only_live}
"#,
        );
        assert_eq!(err.kind(), "missing_field");
        assert_eq!(err.role(), Some("packages"));
    }

    #[test]
    fn test_azure_environment() {
        let buckets = accepted(
            BackendFamily::Azure,
            "enabled: true\nbuckets:\n  droplets: {name: c, environment: AzureChinaCloud}\n",
        );
        assert_eq!(
            buckets.descriptors[0].location.environment.as_deref(),
            Some("AzureChinaCloud")
        );

        let err = rejection(
            BackendFamily::Azure,
            "enabled: true\nbuckets:\n  droplets: {name: c, environment: Mars}\n",
        );
        assert_eq!(
            err.to_string(),
            "Invalid bucket configuration for droplets, unsupported Azure environment Mars"
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let m = manifest(
            r#"
enabled: true
buckets:
  a: {bucket_name: x, backup_bucket_name: y}
  b: {bucket_name: y, backup_bucket_name: z}
  c: {bucket_name: z, backup_bucket_name: x}
"#,
        );
        let validator = Validator::new(BackendFamily::Gcs);
        let first = validator.validate(&m);
        let second = validator.validate(&m);
        assert_eq!(first, second);
        assert_eq!(
            first.rejection().map(ToString::to_string).unwrap(),
            "Invalid bucket configuration, x is used as a source bucket and a backup bucket"
        );
    }
}
