//! Password container with automatic memory zeroing.
//!
//! # Security
//! - The secret lives in a `Zeroizing<String>` and is cleared on drop
//! - `Debug` never prints the secret
//! - The type implements `Deserialize` only; it cannot be serialized back out

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Placeholder rendered wherever a password would otherwise appear.
pub const REDACTED: &str = "****";

/// Database password that zeroes its memory when dropped.
///
/// An empty password means "no password"; DSN construction omits the
/// password segment entirely in that case.
///
/// # Example
///
/// ```rust
/// use tdexporter_core::security::Password;
///
/// let password = Password::new("taosdata");
/// assert!(!password.is_empty());
/// assert_eq!(format!("{password:?}"), "Password(****)");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wraps a secret in a zeroizing container.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Returns `true` when no password is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exposes the secret for DSN assembly.
    ///
    /// Callers must not log or persist the returned value.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str("Password(<empty>)")
        } else {
            write!(f, "Password({})", REDACTED)
        }
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<String> for Password {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for Password {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}
