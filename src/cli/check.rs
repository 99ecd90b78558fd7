//! CLI command for validating a manifest without writing anything

use std::path::PathBuf;

use clap::Args;

use crate::config::RenderSettings;
use crate::display::format_bucket_list;
use crate::error::RenderResult;
use crate::models::BackendFamily;

/// Arguments for `check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Backend family (s3-versioned, s3-unversioned, gcs, azure)
    #[arg(short, long, env = "BLOBSTORE_RENDER_BACKEND")]
    pub backend: Option<BackendFamily>,

    /// Path to the bucket manifest (YAML or JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,
}

/// Handle the check command
pub fn handle_check_command(settings: &RenderSettings, args: CheckArgs) -> RenderResult<()> {
    let verdict = super::validate_manifest(settings, args.backend, &args.manifest)?;
    let buckets = verdict.into_result()?;

    println!("{}", format_bucket_list(&buckets));
    if buckets.enabled {
        println!();
        println!("Bucket configuration is valid.");
    }

    Ok(())
}
