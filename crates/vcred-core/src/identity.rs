//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers in the credential registry.
//! String-based identifiers validate format at construction time, so a
//! [`Did`] held anywhere in the system is known to be well-formed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>`
/// where method is lowercase alphanumeric and method-specific-id is non-empty.
///
/// # Validation
///
/// - Must start with `did:`
/// - Method name must be at least 1 character, lowercase alphanumeric
/// - Must have a `:` separator after method
/// - Method-specific identifier must be non-empty
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Did(String);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Validate DID format without constructing.
    fn validate(s: &str) -> Result<(), ValidationError> {
        if !s.starts_with("did:") {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        let rest = &s[4..]; // after "did:"
        match rest.find(':') {
            None => return Err(ValidationError::InvalidDid(s.to_string())),
            Some(pos) => {
                let method = &rest[..pos];
                let identifier = &rest[pos + 1..];

                // Method must be non-empty and lowercase alphanumeric
                if method.is_empty()
                    || !method
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                {
                    return Err(ValidationError::InvalidDid(s.to_string()));
                }

                // Identifier must be non-empty
                if identifier.is_empty() {
                    return Err(ValidationError::InvalidDid(s.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        let rest = &self.0[4..]; // after "did:"
        match rest.find(':') {
            Some(pos) => &rest[..pos],
            None => rest,
        }
    }

    /// Return the method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0[4..]; // after "did:"
        match rest.find(':') {
            Some(pos) => &rest[pos + 1..],
            None => "",
        }
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
