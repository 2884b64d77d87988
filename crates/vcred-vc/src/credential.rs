//! # Verifiable Credential envelope
//!
//! Defines the core [`VerifiableCredential`] type following the W3C VC
//! Data Model.
//!
//! ## Security Invariants
//!
//! - The **signing input** is the canonicalized credential body with the
//!   `proof` field removed, computed via [`CanonicalBytes::new()`]. The
//!   same function feeds both issuance (the payload sent to the signing
//!   authority) and verification (the bytes checked against the proof).
//!
//! - The envelope structure is rigid (`deny_unknown_fields`), while
//!   `credential_subject` is intentionally extensible per the W3C spec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vcred_core::{CanonicalBytes, Did};

use crate::proof::Proof;

/// Errors from credential envelope operations.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the credential body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] vcred_core::CanonicalizationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A W3C Verifiable Credential.
///
/// ## Field Naming
///
/// Serde rename attributes map between Rust snake_case and the W3C VC
/// JSON field names (camelCase / `@`-prefixed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: ContextValue,

    /// Credential identifier (URN or DID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type(s). MUST include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,

    /// DID of the credential issuer.
    pub issuer: Did,

    /// When the credential was issued (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    /// Optional expiration date (UTC).
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,

    /// The credential subject — intentionally extensible per W3C spec.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: serde_json::Value,

    /// Cryptographic proofs attached to this credential.
    #[serde(default, skip_serializing_if = "ProofValue::is_empty")]
    pub proof: ProofValue,
}

/// JSON-LD `@context` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<serde_json::Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![serde_json::Value::String(
            "https://www.w3.org/2018/credentials/v1".to_string(),
        )])
    }
}

/// Credential `type` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialTypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

impl CredentialTypeValue {
    /// Check whether `"VerifiableCredential"` is included in the type.
    pub fn contains_vc_type(&self) -> bool {
        match self {
            CredentialTypeValue::Single(s) => s == "VerifiableCredential",
            CredentialTypeValue::Array(arr) => arr.iter().any(|s| s == "VerifiableCredential"),
        }
    }
}

/// Proof value — supports single proof, array of proofs, or absent.
///
/// Credentials on the wire carry either a single proof object or an array;
/// this enum handles the JSON polymorphism at the serde level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProofValue {
    /// A single proof object.
    Single(Box<Proof>),
    /// An array of proof objects.
    Array(Vec<Proof>),
}

impl Default for ProofValue {
    fn default() -> Self {
        Self::Array(Vec::new())
    }
}

impl ProofValue {
    /// Returns `true` if there are no proofs.
    pub fn is_empty(&self) -> bool {
        match self {
            ProofValue::Single(_) => false,
            ProofValue::Array(arr) => arr.is_empty(),
        }
    }

    /// Normalize to a list of proof references.
    pub fn as_list(&self) -> Vec<&Proof> {
        match self {
            ProofValue::Single(p) => vec![p.as_ref()],
            ProofValue::Array(arr) => arr.iter().collect(),
        }
    }

    /// The primary proof, if any. Issued credentials carry exactly one.
    pub fn primary(&self) -> Option<&Proof> {
        self.as_list().into_iter().next()
    }

    /// Add a proof, converting Single to Array if needed.
    pub fn push(&mut self, proof: Proof) {
        match self {
            ProofValue::Single(existing) => {
                let prev = existing.clone();
                *self = ProofValue::Array(vec![*prev, proof]);
            }
            ProofValue::Array(arr) => {
                arr.push(proof);
            }
        }
    }
}

impl VerifiableCredential {
    /// Compute the canonical signing input for this credential.
    ///
    /// The signing input is the canonicalized bytes of the credential with
    /// the `proof` field removed. Issuance sends exactly these bytes to the
    /// signing authority; verification rebuilds them from the stored
    /// credential.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        Ok(CanonicalBytes::new(&val)?)
    }

    /// Attach a proof produced by the signing authority.
    pub fn attach_proof(&mut self, proof: Proof) {
        self.proof.push(proof);
    }

    /// `true` if the credential carries an expiration date that has passed.
    ///
    /// A credential without an `expirationDate` never expires.
    pub fn has_expired(&self) -> bool {
        matches!(self.expiration_date, Some(exp) if exp < Utc::now())
    }
}
