use std::fmt;

use crate::error::{Error, Result};

/// Secret used to sign the deployment transaction
///
/// The value is never printed; `Debug` is redacted.
#[derive(Clone, Default)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Build from an optional value (e.g. an unset environment variable)
    pub fn from_optional(secret: Option<String>) -> Self {
        Self(secret.unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Fail with [`Error::MissingSigningKey`] unless a secret is present
    pub fn ensure_present(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::MissingSigningKey);
        }
        Ok(())
    }

    /// Raw secret, normalised to carry a 0x prefix
    pub fn expose(&self) -> String {
        let secret = self.0.trim();
        if secret.starts_with("0x") {
            secret.to_string()
        } else {
            format!("0x{}", secret)
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
