//! # Route Modules
//!
//! - [`credentials`] — lifecycle endpoints under `/v1/credentials`.
//! - [`render`] — presentation formats for stored credentials.

pub mod credentials;
pub mod render;
