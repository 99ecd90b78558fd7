//! CLI command for rendering bucket configuration
//!
//! Validates the manifest and writes `config/buckets.json` (plus the GCS
//! service-account key, when one is declared) into the job directory.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::{RenderPaths, RenderSettings};
use crate::error::{RenderError, RenderResult};
use crate::models::BackendFamily;
use crate::render;

/// Arguments for `render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Backend family (s3-versioned, s3-unversioned, gcs, azure)
    #[arg(short, long, env = "BLOBSTORE_RENDER_BACKEND")]
    pub backend: Option<BackendFamily>,

    /// Path to the bucket manifest (YAML or JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Job directory; files are written under <job dir>/config/
    #[arg(short, long, env = "BLOBSTORE_RENDER_JOB_DIR")]
    pub job_dir: Option<PathBuf>,

    /// Write buckets.json to stdout instead of the job directory
    #[arg(long)]
    pub stdout: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the render command
pub fn handle_render_command(settings: &RenderSettings, args: RenderArgs) -> RenderResult<()> {
    let verdict = super::validate_manifest(settings, args.backend, &args.manifest)?;
    let pretty = args.pretty || settings.pretty;

    if args.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render::render_to_writer(verdict, &mut handle, pretty)?;
        handle
            .flush()
            .map_err(|e| RenderError::Io(format!("Failed to flush stdout: {}", e)))?;
        return Ok(());
    }

    let paths = match args.job_dir {
        Some(dir) => RenderPaths::with_job_dir(dir),
        None => RenderPaths::new()?,
    };

    let report = render::render(verdict, &paths, pretty)?;

    if report.enabled {
        println!(
            "Rendered {} bucket role(s) to {}",
            report.roles,
            paths.config_dir().display()
        );
    } else {
        println!("Backup and restore is disabled; wrote an empty bucket configuration");
    }
    for file in &report.files {
        println!("  {}", file.display());
    }

    Ok(())
}
