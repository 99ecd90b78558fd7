//! Bucket validation failures
//!
//! Every variant carries the structured data an operator needs to find the
//! problem in the manifest. The human-readable text is produced only by
//! `Display`, which is what the render step surfaces.

use thiserror::Error;

/// Why a set of bucket declarations was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A role key is empty or whitespace-only
    #[error("Invalid bucket configuration, bucket role keys must not be blank")]
    BlankKey,

    /// Two role keys name the same role once trimmed
    #[error("Invalid bucket configuration, {role} is declared more than once")]
    DuplicateRole { role: String },

    /// Required identifier fields are absent for a declared role
    #[error("Invalid bucket configuration for {role}, {fields} must be configured")]
    MissingField { role: String, fields: String },

    /// A role backs up into its own live bucket
    #[error(
        "Invalid bucket configuration for {role}, {live_field} and {backup_field} must be distinct"
    )]
    SelfCollision {
        role: String,
        live_field: &'static str,
        backup_field: &'static str,
    },

    /// An identifier is live for one role and backup for another
    #[error(
        "Invalid bucket configuration, {identifier} is used as a source bucket and a backup bucket"
    )]
    CrossCollision { identifier: String },

    /// A key pair and an identity reference were both supplied
    #[error(
        "Invalid configuration, both the access key ID and the secret key pair and an IAM profile were used for bucket {role}"
    )]
    CredentialConflict { role: String },

    /// A structured credential blob does not parse
    #[error("{}", malformed_payload_message(.role.as_deref(), .field, .reason))]
    MalformedCredentialPayload {
        /// `None` for the job-level key
        role: Option<String>,
        field: &'static str,
        reason: String,
    },

    /// A structured credential blob is valid JSON but not an object
    #[error("{}", non_object_payload_message(.role.as_deref(), .field))]
    NonObjectCredentialPayload {
        /// `None` for the job-level key
        role: Option<String>,
        field: &'static str,
    },

    /// A role's configuration block has the wrong shape
    #[error("Invalid bucket configuration for {role}, {reason}")]
    MalformedBlock { role: String, reason: String },

    /// The manifest's bucket section itself has the wrong shape
    #[error("Invalid bucket configuration, {reason}")]
    MalformedManifest { reason: String },

    /// An Azure environment name the restore binary does not know
    #[error("Invalid bucket configuration for {role}, unsupported Azure environment {value}")]
    UnsupportedEnvironment { role: String, value: String },
}

fn malformed_payload_message(role: Option<&str>, field: &str, reason: &str) -> String {
    match role {
        Some(role) => format!(
            "Invalid bucket configuration for {}, {} is not valid JSON: {}",
            role, field, reason
        ),
        None => format!("Invalid configuration, {} is not valid JSON: {}", field, reason),
    }
}

fn non_object_payload_message(role: Option<&str>, field: &str) -> String {
    match role {
        Some(role) => format!(
            "Invalid bucket configuration for {}, {} is not a JSON object",
            role, field
        ),
        None => format!("Invalid configuration, {} is not a JSON object", field),
    }
}

impl ValidationError {
    /// The role the failure is attributed to, when it is role-local
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::MissingField { role, .. }
            | Self::SelfCollision { role, .. }
            | Self::CredentialConflict { role }
            | Self::MalformedBlock { role, .. }
            | Self::UnsupportedEnvironment { role, .. }
            | Self::DuplicateRole { role } => Some(role),
            Self::MalformedCredentialPayload { role, .. }
            | Self::NonObjectCredentialPayload { role, .. } => role.as_deref(),
            Self::BlankKey | Self::CrossCollision { .. } | Self::MalformedManifest { .. } => None,
        }
    }

    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BlankKey => "blank_key",
            Self::DuplicateRole { .. } => "duplicate_role",
            Self::MissingField { .. } => "missing_field",
            Self::SelfCollision { .. } => "self_collision",
            Self::CrossCollision { .. } => "cross_collision",
            Self::CredentialConflict { .. } => "credential_conflict",
            Self::MalformedCredentialPayload { .. } => "malformed_credential_payload",
            Self::NonObjectCredentialPayload { .. } => "non_object_credential_payload",
            Self::MalformedBlock { .. } => "malformed_block",
            Self::MalformedManifest { .. } => "malformed_manifest",
            Self::UnsupportedEnvironment { .. } => "unsupported_environment",
        }
    }
}
