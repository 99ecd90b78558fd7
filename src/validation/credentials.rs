//! Credential policy
//!
//! Per-role rules only; nothing here looks across roles.

use tracing::debug;

use crate::models::{BucketDescriptor, BucketRole, Secret};

use super::ValidationError;

/// Manifest field that carries a service-account key
pub const SERVICE_ACCOUNT_KEY_FIELD: &str = "gcp_service_account_key";

/// Reject a role that declares both a key pair and an identity reference
///
/// Declaring neither is fine: the backup binary then falls back to ambient
/// credentials.
pub fn evaluate(descriptor: &BucketDescriptor) -> Result<(), ValidationError> {
    let credentials = &descriptor.credentials;
    if credentials.shared_secret.is_some() && credentials.identity_reference {
        return Err(ValidationError::CredentialConflict {
            role: descriptor.role.to_string(),
        });
    }

    debug!(role = %descriptor.role, mode = %credentials.mode(), "credential policy passed");
    Ok(())
}

/// Check that a service-account key is a well-formed JSON object
///
/// `role` is `None` for the job-level key.
pub fn check_service_account_key(
    role: Option<&BucketRole>,
    payload: &Secret,
) -> Result<(), ValidationError> {
    let value: serde_json::Value = serde_json::from_str(payload.as_str()).map_err(|e| {
        ValidationError::MalformedCredentialPayload {
            role: role.map(ToString::to_string),
            field: SERVICE_ACCOUNT_KEY_FIELD,
            reason: e.to_string(),
        }
    })?;

    if !value.is_object() {
        return Err(ValidationError::NonObjectCredentialPayload {
            role: role.map(ToString::to_string),
            field: SERVICE_ACCOUNT_KEY_FIELD,
        });
    }

    Ok(())
}
