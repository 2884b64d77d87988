//! # Verification Engine
//!
//! Runs the verification check bundle over a stored credential: active,
//! revoked, expired, and proof. Each check is independent and reported
//! individually; a resolver outage degrades the proof check to NOK
//! instead of failing the whole bundle, so callers always get a full
//! picture of the credential's state.
//!
//! The overall status reflects revocation only. An expired credential
//! that was never revoked still reports `ISSUED` with its expiry visible
//! in the checks.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vcred_core::Did;
use vcred_crypto::SignatureVerifier;
use vcred_vc::DidDocument;

use crate::error::CredentialError;
use crate::record::{CredentialRecord, CredentialStatus};
use crate::store::CredentialStore;

/// Resolution of a DID to its document via the external resolver.
pub trait DidResolver: Send + Sync {
    /// Resolve `did` to its DID document.
    fn resolve(
        &self,
        did: &Did,
    ) -> impl Future<Output = Result<DidDocument, CredentialError>> + Send;
}

impl DidResolver for vcred_identity_client::ResolverClient {
    async fn resolve(&self, did: &Did) -> Result<DidDocument, CredentialError> {
        vcred_identity_client::ResolverClient::resolve(self, did)
            .await
            .map_err(|e| CredentialError::Resolution(e.to_string()))
    }
}

/// Outcome of a single verification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckResult {
    /// The check passed.
    #[serde(rename = "OK")]
    Ok,
    /// The check failed.
    #[serde(rename = "NOK")]
    Nok,
}

impl CheckResult {
    fn from_bool(ok: bool) -> Self {
        if ok {
            CheckResult::Ok
        } else {
            CheckResult::Nok
        }
    }
}

/// The four independent checks run against a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckBundle {
    /// OK when the credential's lifecycle status is `ISSUED`.
    pub active: CheckResult,
    /// OK when the credential has not been revoked.
    pub revoked: CheckResult,
    /// OK when the expiration date has passed; NOK while the credential
    /// is still live or carries no expiration date.
    pub expired: CheckResult,
    /// OK when the attached proof verifies against the issuer's resolved
    /// key material.
    pub proof: CheckResult,
}

/// The full result of verifying a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Lifecycle status at verification time. Driven by revocation only.
    pub status: CredentialStatus,
    /// The individual check bundles.
    pub checks: Vec<CheckBundle>,
}

/// Runs verification check bundles over stored credentials.
#[derive(Debug, Default)]
pub struct VerificationEngine {
    store: CredentialStore,
}

impl Clone for VerificationEngine {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl VerificationEngine {
    /// Build a verification engine over a shared store handle.
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Verify the credential stored under `id`.
    ///
    /// # Errors
    ///
    /// Only [`CredentialError::NotFound`] when no credential exists under
    /// `id`. Every failure inside a check is reported as NOK in the
    /// bundle, never as an error.
    pub async fn verify<R: DidResolver, V: SignatureVerifier>(
        &self,
        resolver: &R,
        verifier: &V,
        id: &Uuid,
    ) -> Result<VerificationOutcome, CredentialError> {
        let record = self
            .store
            .get(id)
            .ok_or(CredentialError::NotFound(*id))?;

        let active = CheckResult::from_bool(record.status == CredentialStatus::Issued);
        let revoked = CheckResult::from_bool(record.status != CredentialStatus::Revoked);
        let expired = CheckResult::from_bool(record.credential.has_expired());
        let proof = check_proof(resolver, verifier, &record).await;

        let outcome = VerificationOutcome {
            status: record.status,
            checks: vec![CheckBundle {
                active,
                revoked,
                expired,
                proof,
            }],
        };
        tracing::debug!(
            credential_id = %record.id,
            status = record.status.as_str(),
            ?proof,
            "credential verified"
        );
        Ok(outcome)
    }
}

/// Run the proof check. Any failure along the way (missing proof,
/// resolver outage, unknown key, signature mismatch) yields NOK.
async fn check_proof<R: DidResolver, V: SignatureVerifier>(
    resolver: &R,
    verifier: &V,
    record: &CredentialRecord,
) -> CheckResult {
    let Some(proof) = record.credential.proof.primary() else {
        return CheckResult::Nok;
    };
    let Ok(signing_input) = record.credential.signing_input() else {
        return CheckResult::Nok;
    };
    let document = match resolver.resolve(&record.credential.issuer).await {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(
                credential_id = %record.id,
                issuer = %record.credential.issuer,
                error = %e,
                "DID resolution failed, degrading proof check"
            );
            return CheckResult::Nok;
        }
    };
    let Some(method) = document.method_for(&proof.verification_method) else {
        return CheckResult::Nok;
    };
    let Ok(public_key) = method.public_key() else {
        return CheckResult::Nok;
    };
    match verifier.verify(&signing_input, &proof.proof_value, &public_key) {
        Ok(valid) => CheckResult::from_bool(valid),
        Err(_) => CheckResult::Nok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{IssueRequest, LifecycleEngine, ProofSigner};
    use crate::sequence::SequenceAllocator;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use vcred_core::CanonicalBytes;
    use vcred_crypto::{Ed25519KeyPair, Ed25519Verifier};
    use vcred_vc::VerificationMethod;

    struct KeyedSigner {
        keypair: Ed25519KeyPair,
    }

    impl ProofSigner for KeyedSigner {
        async fn sign(
            &self,
            _signing_did: &Did,
            payload: &CanonicalBytes,
        ) -> Result<String, CredentialError> {
            Ok(self.keypair.sign(payload).to_hex())
        }
    }

    /// Resolver backed by a fixed document, standing in for the external
    /// identity platform.
    struct FixedResolver {
        document: DidDocument,
    }

    impl DidResolver for FixedResolver {
        async fn resolve(&self, _did: &Did) -> Result<DidDocument, CredentialError> {
            Ok(self.document.clone())
        }
    }

    struct FailingResolver;

    impl DidResolver for FailingResolver {
        async fn resolve(&self, did: &Did) -> Result<DidDocument, CredentialError> {
            Err(CredentialError::Resolution(format!(
                "resolver unreachable for {did}"
            )))
        }
    }

    fn document_for(keypair: &Ed25519KeyPair) -> DidDocument {
        DidDocument {
            context: None,
            id: "did:web:authority.example".to_string(),
            verification_method: vec![VerificationMethod {
                id: "did:web:authority.example#key-1".to_string(),
                method_type: "Ed25519VerificationKey2020".to_string(),
                controller: "did:web:authority.example".to_string(),
                public_key_hex: keypair.public_key().to_hex(),
            }],
            assertion_method: vec![],
        }
    }

    fn request(expiration: Option<chrono::DateTime<Utc>>) -> IssueRequest {
        IssueRequest {
            context: Default::default(),
            credential_type: vcred_vc::CredentialTypeValue::Array(vec![
                "VerifiableCredential".to_string(),
            ]),
            issuer: "did:web:authority.example".to_string(),
            issuance_date: None,
            expiration_date: expiration,
            credential_subject: json!({"id": "did:web:holder.example"}),
            schema_id: "schema-1".to_string(),
            tags: Default::default(),
            created_by: None,
        }
    }

    async fn issued(
        expiration: Option<chrono::DateTime<Utc>>,
    ) -> (LifecycleEngine, VerificationEngine, KeyedSigner, Uuid) {
        let store = CredentialStore::new();
        let lifecycle = LifecycleEngine::new(store.clone(), SequenceAllocator::new());
        let verification = VerificationEngine::new(store);
        let signer = KeyedSigner {
            keypair: Ed25519KeyPair::generate(),
        };
        let record = lifecycle.issue(&signer, request(expiration)).await.unwrap();
        (lifecycle, verification, signer, record.id)
    }

    #[tokio::test]
    async fn live_credential_passes_all_but_expired() {
        let (_, verification, signer, id) = issued(None).await;
        let resolver = FixedResolver {
            document: document_for(&signer.keypair),
        };

        let outcome = verification
            .verify(&resolver, &Ed25519Verifier, &id)
            .await
            .unwrap();
        assert_eq!(outcome.status, CredentialStatus::Issued);
        let bundle = outcome.checks[0];
        assert_eq!(bundle.active, CheckResult::Ok);
        assert_eq!(bundle.revoked, CheckResult::Ok);
        assert_eq!(bundle.expired, CheckResult::Nok, "expiry has not occurred");
        assert_eq!(bundle.proof, CheckResult::Ok);
    }

    #[tokio::test]
    async fn revoked_credential_reports_revoked_status() {
        let (lifecycle, verification, signer, id) = issued(None).await;
        lifecycle.revoke(&id, None).unwrap();
        let resolver = FixedResolver {
            document: document_for(&signer.keypair),
        };

        let outcome = verification
            .verify(&resolver, &Ed25519Verifier, &id)
            .await
            .unwrap();
        assert_eq!(outcome.status, CredentialStatus::Revoked);
        let bundle = outcome.checks[0];
        assert_eq!(bundle.active, CheckResult::Nok);
        assert_eq!(bundle.revoked, CheckResult::Nok);
        // The proof stays valid; revocation does not invalidate the
        // signature.
        assert_eq!(bundle.proof, CheckResult::Ok);
    }

    #[tokio::test]
    async fn expired_credential_keeps_issued_status() {
        let (_, verification, signer, id) =
            issued(Some(Utc::now() - Duration::days(1))).await;
        let resolver = FixedResolver {
            document: document_for(&signer.keypair),
        };

        let outcome = verification
            .verify(&resolver, &Ed25519Verifier, &id)
            .await
            .unwrap();
        assert_eq!(outcome.status, CredentialStatus::Issued);
        let bundle = outcome.checks[0];
        assert_eq!(bundle.expired, CheckResult::Ok, "expiry has occurred");
        assert_eq!(bundle.active, CheckResult::Ok);
    }

    #[tokio::test]
    async fn resolver_outage_degrades_proof_only() {
        let (_, verification, _, id) = issued(None).await;

        let outcome = verification
            .verify(&FailingResolver, &Ed25519Verifier, &id)
            .await
            .unwrap();
        let bundle = outcome.checks[0];
        assert_eq!(bundle.proof, CheckResult::Nok);
        assert_eq!(bundle.active, CheckResult::Ok);
        assert_eq!(bundle.revoked, CheckResult::Ok);
        assert_eq!(outcome.status, CredentialStatus::Issued);
    }

    #[tokio::test]
    async fn wrong_key_fails_proof_check() {
        let (_, verification, _, id) = issued(None).await;
        let resolver = FixedResolver {
            document: document_for(&Ed25519KeyPair::generate()),
        };

        let outcome = verification
            .verify(&resolver, &Ed25519Verifier, &id)
            .await
            .unwrap();
        assert_eq!(outcome.checks[0].proof, CheckResult::Nok);
    }

    #[tokio::test]
    async fn tampered_credential_fails_proof_check() {
        let store = CredentialStore::new();
        let lifecycle = LifecycleEngine::new(store.clone(), SequenceAllocator::new());
        let signer = KeyedSigner {
            keypair: Ed25519KeyPair::generate(),
        };
        let record = lifecycle.issue(&signer, request(None)).await.unwrap();

        // Alter the subject after signing.
        let mut tampered = record.clone();
        tampered.credential.credential_subject = json!({"id": "did:web:mallory.example"});
        let tampered_store = CredentialStore::new();
        tampered_store.create(tampered).unwrap();

        let verification = VerificationEngine::new(tampered_store);
        let resolver = FixedResolver {
            document: document_for(&signer.keypair),
        };
        let outcome = verification
            .verify(&resolver, &Ed25519Verifier, &record.id)
            .await
            .unwrap();
        assert_eq!(outcome.checks[0].proof, CheckResult::Nok);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let verification = VerificationEngine::new(CredentialStore::new());
        let id = Uuid::new_v4();
        let err = verification
            .verify(&FailingResolver, &Ed25519Verifier, &id)
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::NotFound(got) if got == id));
    }

    #[test]
    fn check_result_serializes_ok_nok() {
        assert_eq!(serde_json::to_string(&CheckResult::Ok).unwrap(), r#""OK""#);
        assert_eq!(serde_json::to_string(&CheckResult::Nok).unwrap(), r#""NOK""#);
    }
}
