//! # vcred-vc — Verifiable Credentials Data Model
//!
//! Implements the W3C Verifiable Credentials Data Model as used by the
//! vcred registry:
//!
//! - **Credential envelope** ([`VerifiableCredential`]) with typed context,
//!   extensible credential subject, and proof polymorphism.
//! - **Proof objects** ([`Proof`]) for Ed25519Signature2020 proofs produced
//!   by the external signing authority.
//! - **DID documents** ([`DidDocument`]) as returned by the external
//!   resolver, carrying hex-encoded Ed25519 verification methods.
//!
//! ## Security Invariants
//!
//! - The signing input is always computed via
//!   [`CanonicalBytes`](vcred_core::CanonicalBytes) with the `proof` field
//!   excluded — never raw `serde_json::to_vec()`.
//! - The envelope structure is rigid (`deny_unknown_fields`), while
//!   `credentialSubject` is intentionally extensible per the W3C spec.

pub mod credential;
pub mod document;
pub mod proof;

pub use credential::{
    ContextValue, CredentialTypeValue, ProofValue, VcError, VerifiableCredential,
};
pub use document::{DidDocument, VerificationMethod};
pub use proof::{Proof, ProofPurpose, ProofType};
