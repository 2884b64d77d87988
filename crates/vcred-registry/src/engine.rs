//! # Lifecycle Engine
//!
//! Orchestrates issuance, lookup, and revocation over the credential
//! store and sequence allocator. Signing is delegated to an external
//! authority through the [`ProofSigner`] seam, so the engine itself never
//! touches key material.
//!
//! ## Issue pipeline ordering
//!
//! Validation and signing happen BEFORE the sequence id is allocated and
//! the record persisted. A rejected request or a signing failure leaves
//! the store and the counter exactly as they were.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use vcred_core::{CanonicalBytes, Did};
use vcred_vc::{ContextValue, CredentialTypeValue, Proof, ProofValue, VerifiableCredential};

use crate::error::CredentialError;
use crate::record::{CredentialRecord, CredentialStatus, TagMatchPolicy, CREDENTIAL_ENTITY_TYPE};
use crate::sequence::SequenceAllocator;
use crate::store::CredentialStore;

/// Delegated signing over canonical credential bytes.
///
/// Implementations hand the payload to an external authority that holds
/// the issuer's key and return the hex-encoded proof value. Signing is
/// not idempotent, so implementations must not retry.
pub trait ProofSigner: Send + Sync {
    /// Sign the canonical payload on behalf of `signing_did`.
    fn sign(
        &self,
        signing_did: &Did,
        payload: &CanonicalBytes,
    ) -> impl Future<Output = Result<String, CredentialError>> + Send;
}

impl ProofSigner for vcred_identity_client::SignerClient {
    async fn sign(
        &self,
        signing_did: &Did,
        payload: &CanonicalBytes,
    ) -> Result<String, CredentialError> {
        vcred_identity_client::SignerClient::sign(self, signing_did, payload)
            .await
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }
}

/// A request to issue a new credential.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRequest {
    /// JSON-LD context for the envelope. Defaults to the W3C v1 context
    /// when absent.
    #[serde(rename = "@context", default)]
    pub context: ContextValue,
    /// Credential type(s). Must include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,
    /// DID of the issuing authority.
    pub issuer: String,
    /// Issuance timestamp. Defaults to now.
    #[serde(rename = "issuanceDate", default)]
    pub issuance_date: Option<DateTime<Utc>>,
    /// Optional expiration timestamp.
    #[serde(rename = "expirationDate", default)]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Subject claims. Must be a JSON object.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,
    /// Schema the credential is issued against. Accepted on the wire as
    /// either `schemaId` or `credentialSchemaId`.
    #[serde(rename = "schemaId", alias = "credentialSchemaId")]
    pub schema_id: String,
    /// Lookup tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Who requested issuance, for the audit trail.
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<String>,
}

/// Credential lifecycle engine: issue, fetch, search, revoke.
#[derive(Debug, Default)]
pub struct LifecycleEngine {
    store: CredentialStore,
    sequences: SequenceAllocator,
}

impl Clone for LifecycleEngine {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            sequences: self.sequences.clone(),
        }
    }
}

impl LifecycleEngine {
    /// Build an engine over shared store and allocator handles.
    pub fn new(store: CredentialStore, sequences: SequenceAllocator) -> Self {
        sequences.ensure(CREDENTIAL_ENTITY_TYPE);
        Self { store, sequences }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// The underlying sequence allocator handle.
    pub fn sequences(&self) -> &SequenceAllocator {
        &self.sequences
    }

    /// Issue a credential: validate, sign via the external authority,
    /// allocate a sequence id, persist.
    pub async fn issue<S: ProofSigner>(
        &self,
        signer: &S,
        req: IssueRequest,
    ) -> Result<CredentialRecord, CredentialError> {
        let issuer = Did::new(&req.issuer)?;
        if !req.credential_type.contains_vc_type() {
            return Err(CredentialError::Validation(
                "type must include VerifiableCredential".to_string(),
            ));
        }
        if !req.credential_subject.is_object() {
            return Err(CredentialError::Validation(
                "credentialSubject must be a JSON object".to_string(),
            ));
        }
        if req.schema_id.is_empty() {
            return Err(CredentialError::Validation(
                "schemaId must be non-empty".to_string(),
            ));
        }

        let record_id = Uuid::new_v4();
        let mut credential = VerifiableCredential {
            context: req.context,
            id: Some(format!("urn:uuid:{record_id}")),
            credential_type: req.credential_type,
            issuer: issuer.clone(),
            issuance_date: req.issuance_date.unwrap_or_else(Utc::now),
            expiration_date: req.expiration_date,
            credential_subject: req.credential_subject,
            proof: ProofValue::default(),
        };

        let signing_input = credential.signing_input()?;
        let proof_value = signer.sign(&issuer, &signing_input).await?;
        credential.attach_proof(Proof::new_ed25519(
            issuer.to_string(),
            proof_value,
            None,
        ));

        // State changes only after the proof is in hand.
        let sequence_id = self.sequences.allocate(CREDENTIAL_ENTITY_TYPE);
        let now = Utc::now();
        let record = CredentialRecord {
            id: record_id,
            sequence_id,
            credential,
            schema_id: req.schema_id,
            tags: req.tags,
            status: CredentialStatus::Issued,
            created_at: now,
            updated_at: now,
            created_by: req.created_by,
            updated_by: None,
        };
        self.store.create(record.clone())?;

        tracing::info!(
            credential_id = %record.id,
            sequence_id = record.sequence_id,
            issuer = %record.credential.issuer,
            "credential issued"
        );
        Ok(record)
    }

    /// Fetch a credential by id.
    pub fn fetch(&self, id: &Uuid) -> Result<CredentialRecord, CredentialError> {
        self.store.get(id).ok_or(CredentialError::NotFound(*id))
    }

    /// All credentials in issuance order.
    pub fn list(&self) -> Vec<CredentialRecord> {
        self.store.list()
    }

    /// Credentials matching the given tags under the given policy.
    pub fn find_by_tags(
        &self,
        tags: &BTreeSet<String>,
        policy: TagMatchPolicy,
    ) -> Vec<CredentialRecord> {
        self.store.find_by_tags(tags, policy)
    }

    /// Credentials matching subject claims and/or issuer exactly.
    pub fn find_by_claim(
        &self,
        subject: Option<&Value>,
        issuer: Option<&str>,
    ) -> Vec<CredentialRecord> {
        self.store.find_by_claim(subject, issuer)
    }

    /// Revoke a credential. Terminal and idempotent.
    pub fn revoke(
        &self,
        id: &Uuid,
        updated_by: Option<String>,
    ) -> Result<CredentialRecord, CredentialError> {
        let record = self.store.revoke(id, updated_by)?;
        tracing::info!(credential_id = %record.id, "credential revoked");
        Ok(record)
    }
}
