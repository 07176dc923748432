//! SAID population for JSON Schema documents.
//!
//! This crate provides:
//! - Structural discovery of SAID sites (root, `properties.a/e/r`, `oneOf` variants)
//! - Bottom-up population: nested SAIDs are final before the root is digested
//! - Verification reports that recompute every site
//! - Injection of caller-supplied values before digesting
//!
//! Core invariants:
//! - A site's SAID is computed with its own label set to a same-length placeholder
//! - A parent digest covers its children's finalized SAIDs, never placeholders
//! - Shape violations at reserved locations abort before anything is rewritten
//!
#![deny(missing_docs)]

/// Error types for population and verification.
pub mod errors;
/// Value injection by JSON pointer.
pub mod inject;
/// Bottom-up SAID population.
pub mod populate;
/// Site discovery.
pub mod site;
/// Per-site SAID verification.
pub mod verification;

pub use errors::PopulateError;
pub use inject::{inject_le, inject_value, LE_CONST_POINTER};
pub use populate::{populate, PopulateOptions};
pub use site::{discover_sites, Section, SiteLocation, ID_KEY, ONE_OF_KEY, PROPERTIES_KEY};
pub use verification::{verify_document, SiteReport, SiteVerdict, VerificationReport};
