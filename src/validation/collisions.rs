//! Bucket identity collision detection
//!
//! A bucket may be a live bucket or a backup bucket, never both. The
//! per-role check catches a role backing up into itself; the global check
//! catches one role's live bucket being another role's backup target.

use std::collections::HashSet;

use tracing::debug;

use crate::models::BucketDescriptor;

use super::ValidationError;

/// Reject a role whose live and backup identifiers are equal
pub fn check_distinct(descriptor: &BucketDescriptor) -> Result<(), ValidationError> {
    let Some(backup_field) = descriptor.family.backup_field() else {
        return Ok(());
    };

    match (descriptor.live(), descriptor.backup()) {
        (Some(live), Some(backup)) if live == backup => Err(ValidationError::SelfCollision {
            role: descriptor.role.to_string(),
            live_field: descriptor.family.live_field(),
            backup_field,
        }),
        _ => Ok(()),
    }
}

/// First live identifier that is also some role's backup identifier
///
/// Two passes: collect every backup identifier, then walk live identifiers in
/// declaration order. The reported identifier is therefore the live bucket of
/// the earliest-declared role that collides.
pub fn find_cross_collision(descriptors: &[BucketDescriptor]) -> Option<&str> {
    let backups: HashSet<&str> = descriptors.iter().filter_map(|d| d.backup()).collect();
    if backups.is_empty() {
        return None;
    }

    descriptors
        .iter()
        .filter_map(|d| d.live())
        .find(|live| backups.contains(live))
}

/// Reject a descriptor set where live and backup identifiers overlap
pub fn evaluate(descriptors: &[BucketDescriptor]) -> Result<(), ValidationError> {
    match find_cross_collision(descriptors) {
        Some(identifier) => Err(ValidationError::CrossCollision {
            identifier: identifier.to_string(),
        }),
        None => {
            debug!(roles = descriptors.len(), "no bucket identity collisions");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BackendFamily, BucketRole};

    fn pair(role: &str, live: &str, backup: &str) -> BucketDescriptor {
        BucketDescriptor::new(BackendFamily::Gcs, BucketRole::parse(role).unwrap())
            .with_identifiers(Some(live), Some(backup))
    }

    #[test]
    fn test_self_collision() {
        let d = pair("droplets", "my_bucket", "my_bucket");
        assert_eq!(
            check_distinct(&d),
            Err(ValidationError::SelfCollision {
                role: "droplets".into(),
                live_field: "bucket_name",
                backup_field: "backup_bucket_name",
            })
        );
    }

    #[test]
    fn test_self_collision_uses_family_field_names() {
        let d = BucketDescriptor::new(
            BackendFamily::S3Unversioned,
            BucketRole::parse("droplets").unwrap(),
        )
        .with_identifiers(Some("the_droplets_bucket"), Some("the_droplets_bucket"));

        assert_eq!(
            check_distinct(&d).unwrap_err().to_string(),
            "Invalid bucket configuration for droplets, name and backup.name must be distinct"
        );
    }

    #[test]
    fn test_distinct_identifiers_pass() {
        assert!(check_distinct(&pair("droplets", "A", "B")).is_ok());
    }

    #[test]
    fn test_live_only_family_skips_distinct_check() {
        let d = BucketDescriptor::new(BackendFamily::Azure, BucketRole::parse("droplets").unwrap())
            .with_identifiers(Some("same"), Some("same"));
        assert!(check_distinct(&d).is_ok());
    }

    #[test]
    fn test_cross_role_collision() {
        let descriptors = vec![
            pair("droplets", "bucket1", "bucket2"),
            pair("packages", "bucket2", "bucket3"),
        ];
        assert_eq!(
            evaluate(&descriptors),
            Err(ValidationError::CrossCollision {
                identifier: "bucket2".into()
            })
        );
    }

    #[test]
    fn test_backup_of_earlier_role_is_live_of_later_role() {
        let descriptors = vec![
            pair("droplets", "the_droplets_bucket", "my_packages_bucket"),
            pair("packages", "my_packages_bucket", "the_packages_bucket_backup"),
        ];
        assert_eq!(find_cross_collision(&descriptors), Some("my_packages_bucket"));
    }

    #[test]
    fn test_first_collision_in_declaration_order_wins() {
        let descriptors = vec![
            pair("a", "x", "y"),
            pair("b", "y", "z"),
            pair("c", "z", "x"),
        ];
        assert_eq!(find_cross_collision(&descriptors), Some("x"));

        let reordered = vec![
            pair("b", "y", "z"),
            pair("c", "z", "x"),
            pair("a", "x", "y"),
        ];
        assert_eq!(find_cross_collision(&reordered), Some("y"));
    }

    #[test]
    fn test_disjoint_sets_pass() {
        let descriptors = vec![pair("droplets", "A", "B"), pair("packages", "C", "D")];
        assert!(evaluate(&descriptors).is_ok());
        assert!(evaluate(&[]).is_ok());
    }

    #[test]
    fn test_shared_backup_bucket_is_not_a_collision() {
        let descriptors = vec![pair("droplets", "A", "shared"), pair("packages", "B", "shared")];
        assert!(evaluate(&descriptors).is_ok());
    }
}
