//! Bucket set display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BackendFamily, BucketDescriptor};
use crate::validation::ValidatedBuckets;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Live")]
    live: String,
    #[tabled(rename = "Backup")]
    backup: String,
    #[tabled(rename = "Credentials")]
    credentials: String,
}

impl BucketRow {
    fn from_descriptor(descriptor: &BucketDescriptor) -> Self {
        let backup = match descriptor.family {
            BackendFamily::S3Unversioned | BackendFamily::Gcs => {
                descriptor.backup().unwrap_or("-").to_string()
            }
            BackendFamily::S3Versioned => "(versioned)".to_string(),
            BackendFamily::Azure => "(live only)".to_string(),
        };

        Self {
            role: descriptor.role.to_string(),
            live: descriptor.live().unwrap_or("-").to_string(),
            backup,
            credentials: descriptor.credentials.mode().to_string(),
        }
    }
}

/// Format an accepted bucket set as a table
pub fn format_bucket_list(buckets: &ValidatedBuckets) -> String {
    if !buckets.enabled {
        return format!("Backup and restore is disabled for {}.", buckets.family);
    }
    if buckets.is_empty() {
        return format!("No buckets declared for {}.", buckets.family);
    }

    let rows: Vec<BucketRow> = buckets
        .descriptors
        .iter()
        .map(BucketRow::from_descriptor)
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}
