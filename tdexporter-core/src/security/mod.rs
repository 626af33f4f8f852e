//! Credential protection utilities.
//!
//! # Security Guarantees
//! - Passwords are stored in `Zeroizing` containers for automatic memory clearing
//! - Passwords are never printed by `Debug` and never serialized
//! - DSNs destined for logs are rendered with [`REDACTED`] in place of the password

mod credentials;

pub use credentials::{Password, REDACTED};
