//! Renderer: turns an accepted verdict into configuration files
//!
//! A rejected verdict is returned as an error carrying the validator's message
//! unchanged, and nothing is written. Accepted verdicts produce
//! `config/buckets.json` (empty when the job is disabled) and, for GCS, the
//! job-level service-account key file.

pub mod buckets;
pub mod writer;

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::config::RenderPaths;
use crate::error::{RenderError, RenderResult};
use crate::validation::{ValidatedBuckets, Verdict};

pub use buckets::BucketsDocument;

/// What a render wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Files written, in write order
    pub files: Vec<PathBuf>,
    /// Number of roles rendered into `buckets.json`
    pub roles: usize,
    pub enabled: bool,
}

/// Render an accepted verdict into the job directory
pub fn render(verdict: Verdict, paths: &RenderPaths, pretty: bool) -> RenderResult<RenderReport> {
    let buckets = verdict.into_result()?;
    paths.ensure_directories()?;
    let mut files = Vec::new();

    let buckets_file = paths.buckets_file();
    let contents = buckets_json(&buckets, pretty)?;
    writer::write_atomic(&buckets_file, &contents)?;
    info!(
        job = buckets.family.job_name(),
        path = %buckets_file.display(),
        roles = buckets.descriptors.len(),
        "wrote bucket configuration"
    );
    files.push(buckets_file);

    let key_file = paths.service_account_key_file();
    match &buckets.service_account_key {
        Some(key) => {
            writer::write_atomic(&key_file, key.as_str().as_bytes())?;
            info!(path = %key_file.display(), "wrote service account key");
            files.push(key_file);
        }
        None => {
            if writer::remove_if_exists(&key_file)? {
                info!(path = %key_file.display(), "removed stale service account key");
            }
        }
    }

    Ok(RenderReport {
        files,
        roles: buckets.descriptors.len(),
        enabled: buckets.enabled,
    })
}

/// Render `buckets.json` for an accepted verdict to any writer
pub fn render_to_writer<W: Write>(verdict: Verdict, writer: &mut W, pretty: bool) -> RenderResult<usize> {
    let buckets = verdict.into_result()?;
    let contents = buckets_json(&buckets, pretty)?;

    writer
        .write_all(&contents)
        .map_err(|e| RenderError::Io(format!("Failed to write bucket configuration: {}", e)))?;

    Ok(buckets.descriptors.len())
}

/// Serialized `buckets.json` contents; empty for a disabled job
pub fn buckets_json(buckets: &ValidatedBuckets, pretty: bool) -> RenderResult<Vec<u8>> {
    if !buckets.enabled {
        return Ok(Vec::new());
    }

    let document = BucketsDocument::new(buckets);
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    bytes.push(b'\n');
    Ok(bytes)
}
