#![deny(missing_docs)]

//! # vcred-core — Foundational Types for the vcred Credential Registry
//!
//! This crate defines the types that every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`Did`] is a distinct
//!    type, not a `String`; malformed identifiers are rejected at
//!    construction time.
//!
//! 2. **[`CanonicalBytes`] is the sole signing-input path.** The external
//!    signing authority signs a serialized payload, and verification must
//!    rebuild the exact same bytes later. Every signing input flows through
//!    `CanonicalBytes::new()`, which applies deterministic coercion rules
//!    (float rejection, datetime normalization, sorted keys).
//!
//! 3. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, CryptoError, ValidationError};
pub use identity::Did;
pub use temporal::Timestamp;
