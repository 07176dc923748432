//! Canonical serialization and self-addressing identifier primitives.
//!
//! Everything that decides which bytes get digested, and how a digest is
//! rendered as a SAID, lives in this crate. Callers hand it a JSON object and
//! a label; it hands back a fixed-length identifier.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Digest codes and the encoded SAID type.
pub mod digest;
/// SAID computation and verification over JSON objects.
pub mod said;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer, Serialization};
pub use digest::{DigestCode, Said, DIGEST_SIZE, PLACEHOLDER_CHAR, SAID_LEN};
pub use said::{compute_said, embedded_said, saidify, verify_raw, verify_said, SaidError};
pub use validation::ValidationError;
