//! SAID site discovery.
//!
//! Sites are found structurally, never by walking the whole tree:
//!
//! - the document root;
//! - `properties.a`, `properties.e`, `properties.r` when the section has an
//!   `$id` member (a sub-schema with its own identity);
//! - otherwise, each object in that section's `oneOf` array that already
//!   carries the label (a variant pre-tagged for SAID computation).
//!
//! [`discover_sites`] returns them in post-order: nested sites first, the
//! root last, which is the order their digests must be computed in.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::PopulateError;

/// Key of the document member holding the section schemas.
pub const PROPERTIES_KEY: &str = "properties";
/// Key marking a section as a self-identified sub-schema.
pub const ID_KEY: &str = "$id";
/// Key of the variant list inside a section.
pub const ONE_OF_KEY: &str = "oneOf";

/// The three reserved sections of a schema's `properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `a`: attributes.
    Attributes,
    /// `e`: edges.
    Edges,
    /// `r`: rules.
    Rules,
}

impl Section {
    /// Sections in the order they are visited.
    pub const ALL: [Section; 3] = [Section::Attributes, Section::Edges, Section::Rules];

    /// Member name under `properties`.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Attributes => "a",
            Section::Edges => "e",
            Section::Rules => "r",
        }
    }
}

/// Where a SAID lives inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteLocation {
    /// The document itself.
    Root,
    /// A section carrying `$id`.
    Section(Section),
    /// An element of a section's `oneOf` array.
    Variant(Section, usize),
}

impl SiteLocation {
    /// JSON pointer (RFC 6901) addressing the site's object.
    pub fn pointer(&self) -> String {
        match self {
            SiteLocation::Root => String::new(),
            SiteLocation::Section(section) => section_pointer(*section),
            SiteLocation::Variant(section, index) => {
                format!("{}/{}/{}", section_pointer(*section), ONE_OF_KEY, index)
            }
        }
    }

    /// Borrows the site's object within `document`.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Map<String, Value>> {
        document.pointer(&self.pointer()).and_then(Value::as_object)
    }

    /// Mutably borrows the site's slot within `document`.
    pub fn resolve_mut<'a>(&self, document: &'a mut Value) -> Option<&'a mut Value> {
        document.pointer_mut(&self.pointer())
    }
}

impl fmt::Display for SiteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteLocation::Root => f.write_str("/"),
            other => f.write_str(&other.pointer()),
        }
    }
}

impl Serialize for SiteLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn section_pointer(section: Section) -> String {
    format!("/{}/{}", PROPERTIES_KEY, section.key())
}

/// Lists every SAID site in `document`, nested sites before the root.
///
/// Fails on any shape violation at a reserved location, so that callers can
/// reject a document before touching it.
pub fn discover_sites(document: &Value, label: &str) -> Result<Vec<SiteLocation>, PopulateError> {
    let root = document
        .as_object()
        .ok_or_else(|| PopulateError::shape("/", "object", document))?;

    let mut sites = Vec::new();
    if let Some(properties) = root.get(PROPERTIES_KEY) {
        let properties = properties
            .as_object()
            .ok_or_else(|| PopulateError::shape(format!("/{}", PROPERTIES_KEY), "object", properties))?;

        for section in Section::ALL {
            let Some(node) = properties.get(section.key()) else {
                continue;
            };
            let node = node
                .as_object()
                .ok_or_else(|| PopulateError::shape(section_pointer(section), "object", node))?;

            if node.contains_key(ID_KEY) {
                sites.push(SiteLocation::Section(section));
            } else if let Some(one_of) = node.get(ONE_OF_KEY) {
                let variants = one_of.as_array().ok_or_else(|| {
                    PopulateError::shape(
                        format!("{}/{}", section_pointer(section), ONE_OF_KEY),
                        "array",
                        one_of,
                    )
                })?;
                for (index, variant) in variants.iter().enumerate() {
                    if variant.as_object().is_some_and(|v| v.contains_key(label)) {
                        sites.push(SiteLocation::Variant(section, index));
                    } else {
                        tracing::trace!(section = section.key(), index, "oneOf element is not a SAID site");
                    }
                }
            }
        }
    }
    sites.push(SiteLocation::Root);
    Ok(sites)
}
