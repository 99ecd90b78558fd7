//! Credential values that must not leak
//!
//! Secrets are redacted in `Debug` and `Display` output (so they never end up
//! in log lines) and their memory is zeroed on drop.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A credential string that zeros its contents on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    inner: String,
}

impl Secret {
    /// Create a new Secret
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Get the secret contents, for rendering into configuration files
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_access() {
        let secret = Secret::new("AWS_SECRET_ACCESS_KEY");
        assert_eq!(secret.as_str(), "AWS_SECRET_ACCESS_KEY");
        assert_eq!(secret.len(), 21);
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_debug_redacted() {
        let secret = Secret::new("hunter2");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("len"));
    }

    #[test]
    fn test_display_redacted() {
        let secret = Secret::from("hunter2");
        assert_eq!(secret.to_string(), "[REDACTED 7 bytes]");
    }

    #[test]
    fn test_zeroize_clears_contents() {
        let mut secret = Secret::new("hunter2");
        secret.zeroize();
        assert!(secret.is_empty());
    }
}
