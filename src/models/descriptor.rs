//! Bucket descriptor model
//!
//! The normalized view of one declared bucket role. Every optional field has
//! already been trimmed; `None` means absent, null, or whitespace-only in the
//! manifest.

use serde::Serialize;
use std::fmt;

use super::backend::BackendFamily;
use super::role::BucketRole;
use super::secret::Secret;

/// Access key pair credentials (S3 key ID + secret, Azure account + key)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SharedSecret {
    pub key_id: Option<String>,
    pub secret: Option<Secret>,
}

impl SharedSecret {
    /// Build a pair, returning `None` when both halves are blank
    pub fn from_parts(key_id: Option<String>, secret: Option<String>) -> Option<Self> {
        if key_id.is_none() && secret.is_none() {
            return None;
        }
        Some(Self {
            key_id,
            secret: secret.map(Secret::from),
        })
    }
}

/// Credentials declared for a role
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    /// Embedded key pair, present when either half is non-blank
    pub shared_secret: Option<SharedSecret>,

    /// Platform-assigned identity (`use_iam_profile`)
    pub identity_reference: bool,

    /// Per-bucket service-account key blob (GCS)
    pub service_account_key: Option<Secret>,
}

/// Which credential mechanism a role ends up using
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialMode {
    /// Credentials come from the ambient environment
    Ambient,
    SharedSecret,
    IdentityReference,
    ServiceAccountKey,
    /// Both a key pair and an identity reference; never accepted
    Conflicting,
}

impl Credentials {
    pub fn mode(&self) -> CredentialMode {
        match (self.shared_secret.is_some(), self.identity_reference) {
            (true, true) => CredentialMode::Conflicting,
            (true, false) => CredentialMode::SharedSecret,
            (false, true) => CredentialMode::IdentityReference,
            (false, false) if self.service_account_key.is_some() => {
                CredentialMode::ServiceAccountKey
            }
            (false, false) => CredentialMode::Ambient,
        }
    }
}

impl fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => write!(f, "ambient"),
            Self::SharedSecret => write!(f, "key pair"),
            Self::IdentityReference => write!(f, "IAM profile"),
            Self::ServiceAccountKey => write!(f, "service account key"),
            Self::Conflicting => write!(f, "conflicting"),
        }
    }
}

/// Source account an Azure container is restored from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreFrom {
    pub storage_account: Option<String>,
    pub storage_key: Option<Secret>,
}

/// Backend-specific addressing, passed through to the rendered config
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub region: Option<String>,
    pub backup_region: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    /// S3 versioned only; handed to the backup binary as-is
    pub assumed_role_arn: Option<String>,
    /// Azure only; defaulted during normalization
    pub environment: Option<String>,
    pub restore_from: Option<RestoreFrom>,
}

/// One declared bucket role after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketDescriptor {
    pub family: BackendFamily,
    pub role: BucketRole,
    pub live_identifier: Option<String>,
    pub backup_identifier: Option<String>,
    pub credentials: Credentials,
    pub location: Location,
}

impl BucketDescriptor {
    /// Create an empty descriptor for a role
    pub fn new(family: BackendFamily, role: BucketRole) -> Self {
        Self {
            family,
            role,
            live_identifier: None,
            backup_identifier: None,
            credentials: Credentials::default(),
            location: Location::default(),
        }
    }

    /// Set the live and backup identifiers
    pub fn with_identifiers(
        mut self,
        live: Option<impl Into<String>>,
        backup: Option<impl Into<String>>,
    ) -> Self {
        self.live_identifier = live.map(Into::into);
        self.backup_identifier = backup.map(Into::into);
        self
    }

    pub fn live(&self) -> Option<&str> {
        self.live_identifier.as_deref()
    }

    pub fn backup(&self) -> Option<&str> {
        self.backup_identifier.as_deref()
    }
}

impl fmt::Display for BucketDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.role,
            self.live().unwrap_or("-"),
            self.backup().unwrap_or("-")
        )
    }
}
