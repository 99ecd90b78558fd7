//! Bucket set validation
//!
//! The gate evaluated once per render: a pure function from a manifest to a
//! [`Verdict`]. No I/O happens here and the same manifest always yields the
//! same verdict.

pub mod collisions;
pub mod credentials;
pub mod error;
pub mod validator;

pub use error::ValidationError;
pub use validator::{validate, Validator};

use crate::models::{BackendFamily, BucketDescriptor, Secret};

/// Descriptors that passed every check, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBuckets {
    pub family: BackendFamily,

    /// False when the job is disabled; `descriptors` is then empty
    pub enabled: bool,

    /// Normalized descriptors in manifest declaration order
    pub descriptors: Vec<BucketDescriptor>,

    /// Job-level service-account key (GCS)
    pub service_account_key: Option<Secret>,
}

impl ValidatedBuckets {
    /// The empty, accepted result for a disabled job
    pub fn disabled(family: BackendFamily) -> Self {
        Self {
            family,
            enabled: false,
            descriptors: Vec::new(),
            service_account_key: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Outcome of validating one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(ValidatedBuckets),
    Rejected(ValidationError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The rejection reason, if any
    pub fn rejection(&self) -> Option<&ValidationError> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Accepted(_) => None,
        }
    }

    /// Convert into a `Result` for `?` propagation
    pub fn into_result(self) -> Result<ValidatedBuckets, ValidationError> {
        match self {
            Self::Accepted(buckets) => Ok(buckets),
            Self::Rejected(err) => Err(err),
        }
    }
}

impl From<Result<ValidatedBuckets, ValidationError>> for Verdict {
    fn from(result: Result<ValidatedBuckets, ValidationError>) -> Self {
        match result {
            Ok(buckets) => Self::Accepted(buckets),
            Err(err) => Self::Rejected(err),
        }
    }
}
