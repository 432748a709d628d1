//! API credentials

use std::fmt;

/// API key and shared secret.
///
/// The secret is only ever used as signing material; it is never sent and
/// never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), secret: secret.into() }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let credentials = Credentials::new("key-123", "s3cr3t");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("key-123"));
        assert!(!rendered.contains("s3cr3t"));
        assert_eq!(credentials.secret(), "s3cr3t");
    }
}
