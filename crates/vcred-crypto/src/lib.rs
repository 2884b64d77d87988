#![deny(missing_docs)]

//! # vcred-crypto — Cryptographic Primitives for the Credential Registry
//!
//! Ed25519 key and signature handling for Verifiable Credential proofs.
//!
//! ## Security Invariants
//!
//! - Signing and verification input is always [`CanonicalBytes`](vcred_core::CanonicalBytes);
//!   raw byte slices cannot be signed or verified.
//! - Private keys are never serialized or logged. [`Ed25519KeyPair`] does
//!   not implement `Serialize` and its `Debug` output is redacted.
//! - The verification engine depends on the [`SignatureVerifier`] trait,
//!   not on a concrete signature suite.

pub mod ed25519;
pub mod verifier;

pub use ed25519::{verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use verifier::{Ed25519Verifier, SignatureVerifier};
