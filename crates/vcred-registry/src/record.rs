//! # Credential Records
//!
//! The stored representation of an issued credential: the W3C envelope
//! plus registry-owned metadata (sequence id, schema, tags, status, audit
//! trail).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vcred_vc::VerifiableCredential;

/// Entity-type key under which credential sequence ids are allocated.
pub const CREDENTIAL_ENTITY_TYPE: &str = "Credential";

/// Lifecycle status of a stored credential.
///
/// Revocation is terminal: there is no transition out of `Revoked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialStatus {
    /// The credential is live.
    Issued,
    /// The credential has been revoked by its issuer.
    Revoked,
}

impl CredentialStatus {
    /// Stable string form, used for database storage and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::Issued => "ISSUED",
            CredentialStatus::Revoked => "REVOKED",
        }
    }

    /// Parse the stable string form. Unknown strings are treated as
    /// `Issued` so a hydration pass never drops records.
    pub fn parse(s: &str) -> Self {
        match s {
            "REVOKED" => CredentialStatus::Revoked,
            _ => CredentialStatus::Issued,
        }
    }
}

/// How a multi-tag search combines its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatchPolicy {
    /// A record matches if it carries at least one of the requested tags.
    #[default]
    Any,
    /// A record matches only if it carries every requested tag.
    All,
}

impl TagMatchPolicy {
    /// Parse from configuration (`"any"` / `"all"`, case-insensitive).
    /// Unknown values fall back to the default.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "all" => TagMatchPolicy::All,
            _ => TagMatchPolicy::Any,
        }
    }
}

/// A stored credential with registry metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Registry-assigned identifier.
    pub id: Uuid,
    /// Monotonic per-entity-type sequence number (1-based).
    pub sequence_id: u64,
    /// The signed W3C credential envelope.
    pub credential: VerifiableCredential,
    /// Identifier of the schema this credential was issued against.
    pub schema_id: String,
    /// Free-form tags for lookup.
    pub tags: BTreeSet<String>,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
    /// Who requested issuance, if known.
    pub created_by: Option<String>,
    /// Who performed the last modification, if known.
    pub updated_by: Option<String>,
}
