//! # Lifecycle Error Taxonomy
//!
//! One error enum for the whole lifecycle, built with `thiserror`. Every
//! failure mode of the issue/verify/revoke pipelines maps onto exactly one
//! variant; infrastructure causes are carried in the message rather than
//! silently swallowed.

use thiserror::Error;
use uuid::Uuid;

/// Errors from credential lifecycle operations.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The request is malformed or semantically invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No credential exists under the given id.
    #[error("credential not found: {0}")]
    NotFound(Uuid),

    /// The sequence counter could not be advanced.
    #[error("sequence allocation failed: {0}")]
    Allocation(String),

    /// The external signing authority failed or rejected the request.
    #[error("signing authority failure: {0}")]
    Signing(String),

    /// DID resolution failed.
    #[error("DID resolution failure: {0}")]
    Resolution(String),

    /// Proof verification could not be performed.
    #[error("proof verification failure: {0}")]
    ProofVerification(String),

    /// The persistence layer rejected an operation.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<vcred_core::ValidationError> for CredentialError {
    fn from(e: vcred_core::ValidationError) -> Self {
        CredentialError::Validation(e.to_string())
    }
}

impl From<vcred_vc::VcError> for CredentialError {
    fn from(e: vcred_vc::VcError) -> Self {
        // Envelope failures surface at issue time, before any external
        // call: the request itself is unsignable.
        CredentialError::Validation(e.to_string())
    }
}
