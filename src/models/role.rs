//! Bucket role keys
//!
//! A role is the manifest key naming one logical storage slot ("droplets",
//! "packages", ...). Wrapping it keeps blank keys from ever reaching the
//! descriptor layer.

use serde::Serialize;
use std::fmt;

/// A non-blank, whitespace-trimmed bucket role name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BucketRole(String);

impl BucketRole {
    /// Parse a role key, returning `None` when it is empty or whitespace-only
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BucketRole {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let role = BucketRole::parse("  droplets ").unwrap();
        assert_eq!(role.as_str(), "droplets");
        assert_eq!(role.to_string(), "droplets");
    }

    #[test]
    fn test_blank_keys_rejected() {
        assert!(BucketRole::parse("").is_none());
        assert!(BucketRole::parse(" ").is_none());
        assert!(BucketRole::parse("\t\n").is_none());
    }
}
