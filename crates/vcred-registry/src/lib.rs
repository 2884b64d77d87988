#![deny(missing_docs)]

//! # vcred-registry — Credential Lifecycle Engine
//!
//! Orchestrates the full lifecycle of Verifiable Credentials:
//!
//! - **Issue** — validate, canonicalize, delegate signing to the external
//!   authority, allocate a sequence id, persist. Signing happens BEFORE
//!   any state is consumed: a failed signing request leaves no record and
//!   an unchanged counter.
//! - **Fetch / search** — by id, by tags (any-of or all-of), by subject
//!   claims or issuer.
//! - **Verify** — a bundle of independent checks (active, revoked,
//!   expired, proof); a resolver outage degrades the proof check instead
//!   of aborting the bundle.
//! - **Revoke** — terminal and idempotent.
//!
//! ## Concurrency
//!
//! Sequence allocation is the only serialized section of the issue path.
//! Stores use `parking_lot` locks, never held across `.await` points.

pub mod engine;
pub mod error;
pub mod record;
pub mod sequence;
pub mod store;
pub mod verify;

pub use engine::{IssueRequest, LifecycleEngine, ProofSigner};
pub use error::CredentialError;
pub use record::{CredentialRecord, CredentialStatus, TagMatchPolicy, CREDENTIAL_ENTITY_TYPE};
pub use sequence::SequenceAllocator;
pub use store::CredentialStore;
pub use verify::{CheckBundle, CheckResult, DidResolver, VerificationEngine, VerificationOutcome};
