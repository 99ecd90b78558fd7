//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the validator and renderer.

pub mod check;
pub mod render;

pub use check::{handle_check_command, CheckArgs};
pub use render::{handle_render_command, RenderArgs};

use std::path::Path;

use tracing::debug;

use crate::config::RenderSettings;
use crate::error::RenderResult;
use crate::manifest::Manifest;
use crate::models::BackendFamily;
use crate::validation::{Validator, Verdict};

/// Load the manifest and validate it for the resolved backend family
fn validate_manifest(
    settings: &RenderSettings,
    backend: Option<BackendFamily>,
    manifest_path: &Path,
) -> RenderResult<Verdict> {
    let family = settings.resolve_backend(backend)?;
    debug!(family = %family, manifest = %manifest_path.display(), "validating manifest");

    let manifest = Manifest::load(manifest_path)?;
    Ok(Validator::new(family).validate(&manifest))
}
