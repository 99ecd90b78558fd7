//! Core data models for blobstore-render
//!
//! This module contains the data structures describing declared bucket roles:
//! backend families, role keys, credential secrets, and the normalized bucket
//! descriptor that validation and rendering work on.

pub mod backend;
pub mod descriptor;
pub mod role;
pub mod secret;

pub use backend::{AzureEnvironment, BackendFamily};
pub use descriptor::{
    BucketDescriptor, CredentialMode, Credentials, Location, RestoreFrom, SharedSecret,
};
pub use role::BucketRole;
pub use secret::Secret;
