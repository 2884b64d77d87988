//! # Credential Store
//!
//! Thread-safe in-memory store keyed by record id. Cloning shares the
//! underlying map. Every mutation happens under a single write lock so a
//! revoke is atomic with respect to concurrent reads, and locks are never
//! held across `.await` points.
//!
//! When a database is configured the API layer writes through to it, but
//! this store stays authoritative for reads.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::CredentialError;
use crate::record::{CredentialRecord, CredentialStatus, TagMatchPolicy};

/// Shared in-memory credential store.
#[derive(Debug, Default)]
pub struct CredentialStore {
    data: Arc<RwLock<HashMap<Uuid, CredentialRecord>>>,
}

impl Clone for CredentialStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly issued record. Fails if the id already exists.
    pub fn create(&self, record: CredentialRecord) -> Result<(), CredentialError> {
        let mut guard = self.data.write();
        if guard.contains_key(&record.id) {
            return Err(CredentialError::Persistence(format!(
                "duplicate credential id {}",
                record.id
            )));
        }
        guard.insert(record.id, record);
        Ok(())
    }

    /// Fetch a record by id.
    pub fn get(&self, id: &Uuid) -> Option<CredentialRecord> {
        self.data.read().get(id).cloned()
    }

    /// All records in issuance order.
    pub fn list(&self) -> Vec<CredentialRecord> {
        let mut records: Vec<CredentialRecord> = self.data.read().values().cloned().collect();
        records.sort_by_key(|r| r.sequence_id);
        records
    }

    /// Records matching the requested tags under the given policy, in
    /// issuance order. An empty tag set matches nothing.
    pub fn find_by_tags(
        &self,
        tags: &BTreeSet<String>,
        policy: TagMatchPolicy,
    ) -> Vec<CredentialRecord> {
        if tags.is_empty() {
            return Vec::new();
        }
        let mut records: Vec<CredentialRecord> = self
            .data
            .read()
            .values()
            .filter(|r| match policy {
                TagMatchPolicy::Any => !r.tags.is_disjoint(tags),
                TagMatchPolicy::All => r.tags.is_superset(tags),
            })
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sequence_id);
        records
    }

    /// Records whose subject claims and/or issuer match exactly. Both
    /// filters are optional and combined with AND; passing neither matches
    /// nothing.
    pub fn find_by_claim(
        &self,
        subject: Option<&serde_json::Value>,
        issuer: Option<&str>,
    ) -> Vec<CredentialRecord> {
        if subject.is_none() && issuer.is_none() {
            return Vec::new();
        }
        let mut records: Vec<CredentialRecord> = self
            .data
            .read()
            .values()
            .filter(|r| {
                let subject_ok = subject
                    .map(|s| &r.credential.credential_subject == s)
                    .unwrap_or(true);
                let issuer_ok = issuer
                    .map(|i| r.credential.issuer.as_ref() == i)
                    .unwrap_or(true);
                subject_ok && issuer_ok
            })
            .cloned()
            .collect();
        records.sort_by_key(|r| r.sequence_id);
        records
    }

    /// Mark a credential revoked. Terminal and idempotent: revoking an
    /// already-revoked credential returns it unchanged.
    pub fn revoke(
        &self,
        id: &Uuid,
        updated_by: Option<String>,
    ) -> Result<CredentialRecord, CredentialError> {
        let mut guard = self.data.write();
        let record = guard.get_mut(id).ok_or(CredentialError::NotFound(*id))?;
        if record.status == CredentialStatus::Revoked {
            return Ok(record.clone());
        }
        record.status = CredentialStatus::Revoked;
        record.updated_at = Utc::now();
        record.updated_by = updated_by;
        Ok(record.clone())
    }

    /// Remove a record by id, returning it if present.
    ///
    /// Compensation hook for a failed durable write during issuance.
    /// Not part of the public lifecycle: issued credentials are never
    /// deleted, only revoked.
    pub fn remove(&self, id: &Uuid) -> Option<CredentialRecord> {
        self.data.write().remove(id)
    }

    /// Replace the store contents with persisted records (startup
    /// hydration).
    pub fn hydrate(&self, records: Vec<CredentialRecord>) {
        let mut guard = self.data.write();
        guard.clear();
        for record in records {
            guard.insert(record.id, record);
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcred_core::Did;
    use vcred_vc::{ContextValue, CredentialTypeValue, ProofValue, VerifiableCredential};

    fn record(seq: u64, issuer: &str, subject: serde_json::Value, tags: &[&str]) -> CredentialRecord {
        let credential = VerifiableCredential {
            context: ContextValue::default(),
            id: None,
            credential_type: CredentialTypeValue::Array(vec![
                "VerifiableCredential".to_string(),
            ]),
            issuer: Did::new(issuer).unwrap(),
            issuance_date: Utc::now(),
            expiration_date: None,
            credential_subject: subject,
            proof: ProofValue::default(),
        };
        let now = Utc::now();
        CredentialRecord {
            id: Uuid::new_v4(),
            sequence_id: seq,
            credential,
            schema_id: "schema-1".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: CredentialStatus::Issued,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
        }
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let store = CredentialStore::new();
        let rec = record(1, "did:web:issuer.example", serde_json::json!({"a": 1}), &[]);
        store.create(rec.clone()).unwrap();
        let err = store.create(rec).unwrap_err();
        assert!(matches!(err, CredentialError::Persistence(_)));
    }

    #[test]
    fn list_is_issuance_ordered() {
        let store = CredentialStore::new();
        store
            .create(record(3, "did:web:a.example", serde_json::json!({}), &[]))
            .unwrap();
        store
            .create(record(1, "did:web:b.example", serde_json::json!({}), &[]))
            .unwrap();
        store
            .create(record(2, "did:web:c.example", serde_json::json!({}), &[]))
            .unwrap();
        let seqs: Vec<u64> = store.list().iter().map(|r| r.sequence_id).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn find_by_tags_any_matches_overlap() {
        let store = CredentialStore::new();
        store
            .create(record(1, "did:web:a.example", serde_json::json!({}), &["kyc", "vip"]))
            .unwrap();
        store
            .create(record(2, "did:web:b.example", serde_json::json!({}), &["kyc"]))
            .unwrap();
        store
            .create(record(3, "did:web:c.example", serde_json::json!({}), &["aml"]))
            .unwrap();

        let wanted: BTreeSet<String> = ["vip", "aml"].iter().map(|s| s.to_string()).collect();
        let found = store.find_by_tags(&wanted, TagMatchPolicy::Any);
        let seqs: Vec<u64> = found.iter().map(|r| r.sequence_id).collect();
        assert_eq!(seqs, vec![1, 3]);
    }

    #[test]
    fn find_by_tags_all_requires_every_tag() {
        let store = CredentialStore::new();
        store
            .create(record(1, "did:web:a.example", serde_json::json!({}), &["kyc", "vip"]))
            .unwrap();
        store
            .create(record(2, "did:web:b.example", serde_json::json!({}), &["kyc"]))
            .unwrap();

        let wanted: BTreeSet<String> = ["kyc", "vip"].iter().map(|s| s.to_string()).collect();
        let found = store.find_by_tags(&wanted, TagMatchPolicy::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sequence_id, 1);
    }

    #[test]
    fn find_by_tags_empty_set_matches_nothing() {
        let store = CredentialStore::new();
        store
            .create(record(1, "did:web:a.example", serde_json::json!({}), &["kyc"]))
            .unwrap();
        assert!(store
            .find_by_tags(&BTreeSet::new(), TagMatchPolicy::Any)
            .is_empty());
    }

    #[test]
    fn find_by_claim_filters_subject_and_issuer() {
        let store = CredentialStore::new();
        let alice = serde_json::json!({"id": "did:web:alice.example", "role": "trader"});
        let bob = serde_json::json!({"id": "did:web:bob.example", "role": "auditor"});
        store
            .create(record(1, "did:web:authority.example", alice.clone(), &[]))
            .unwrap();
        store
            .create(record(2, "did:web:authority.example", bob, &[]))
            .unwrap();
        store
            .create(record(3, "did:web:other.example", alice.clone(), &[]))
            .unwrap();

        let by_subject = store.find_by_claim(Some(&alice), None);
        let seqs: Vec<u64> = by_subject.iter().map(|r| r.sequence_id).collect();
        assert_eq!(seqs, vec![1, 3]);

        let by_both = store.find_by_claim(Some(&alice), Some("did:web:authority.example"));
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both[0].sequence_id, 1);

        let by_issuer = store.find_by_claim(None, Some("did:web:other.example"));
        assert_eq!(by_issuer.len(), 1);
        assert_eq!(by_issuer[0].sequence_id, 3);
    }

    #[test]
    fn find_by_claim_without_filters_matches_nothing() {
        let store = CredentialStore::new();
        store
            .create(record(1, "did:web:a.example", serde_json::json!({}), &[]))
            .unwrap();
        assert!(store.find_by_claim(None, None).is_empty());
    }

    #[test]
    fn revoke_is_terminal_and_idempotent() {
        let store = CredentialStore::new();
        let rec = record(1, "did:web:a.example", serde_json::json!({}), &[]);
        let id = rec.id;
        store.create(rec).unwrap();

        let first = store.revoke(&id, Some("ops".to_string())).unwrap();
        assert_eq!(first.status, CredentialStatus::Revoked);
        assert_eq!(first.updated_by.as_deref(), Some("ops"));

        let second = store.revoke(&id, Some("someone-else".to_string())).unwrap();
        assert_eq!(second.status, CredentialStatus::Revoked);
        // Idempotent: the second call does not rewrite the audit trail.
        assert_eq!(second.updated_by.as_deref(), Some("ops"));
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[test]
    fn revoke_missing_is_not_found() {
        let store = CredentialStore::new();
        let id = Uuid::new_v4();
        let err = store.revoke(&id, None).unwrap_err();
        assert!(matches!(err, CredentialError::NotFound(got) if got == id));
    }

    #[test]
    fn remove_takes_record_out() {
        let store = CredentialStore::new();
        let rec = record(1, "did:web:a.example", serde_json::json!({}), &[]);
        let id = rec.id;
        store.create(rec).unwrap();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn hydrate_replaces_contents() {
        let store = CredentialStore::new();
        store
            .create(record(9, "did:web:stale.example", serde_json::json!({}), &[]))
            .unwrap();
        let fresh = record(1, "did:web:fresh.example", serde_json::json!({}), &[]);
        let fresh_id = fresh.id;
        store.hydrate(vec![fresh]);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh_id).is_some());
    }
}
