//! blobstore-render - Blobstore backup bucket validation and rendering
//!
//! This library validates the bucket roles a job manifest declares for one
//! storage backend family and renders them into the JSON configuration read
//! by the backup and restore scripts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Output paths and render settings
//! - `error`: Custom error types
//! - `models`: Backend families, bucket roles, descriptors and secrets
//! - `manifest`: Manifest loading and per-family normalization
//! - `validation`: The fail-fast validator and its verdict
//! - `render`: `buckets.json` serialization and atomic file writes
//! - `display`: Terminal formatting for `check`
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use blobstore_render::{validate, BackendFamily, Manifest};
//!
//! let manifest = Manifest::load("manifest.yml")?;
//! let verdict = validate(BackendFamily::Gcs, &manifest);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod manifest;
pub mod models;
pub mod render;
pub mod validation;

pub use error::{RenderError, RenderResult};
pub use manifest::Manifest;
pub use models::{BackendFamily, BucketDescriptor, BucketRole};
pub use validation::{validate, ValidatedBuckets, ValidationError, Validator, Verdict};
