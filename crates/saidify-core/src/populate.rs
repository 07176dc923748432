use saidify_canonical::{saidify, Canonicalizer, DigestCode, Serialization};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::PopulateError;
use crate::site::{discover_sites, SiteLocation, ID_KEY};

/// How SAIDs are computed and where they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateOptions {
    /// Member name that receives the SAID at every site.
    pub label: String,
    /// Digest algorithm.
    pub code: DigestCode,
    /// Byte layout digested.
    pub serialization: Serialization,
}

impl PopulateOptions {
    /// Canonicalizer matching these options.
    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new(self.serialization)
    }
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            label: ID_KEY.to_string(),
            code: DigestCode::default(),
            serialization: Serialization::default(),
        }
    }
}

/// Computes and embeds a SAID at every site of `document`.
///
/// The document is validated up front, then each site is rebuilt in
/// post-order, so a section or variant SAID is final before the root
/// digest covers it. Any SAID already present at a site is replaced by the
/// placeholder while that site is digested, which makes a rerun over a
/// populated document reproduce the same values.
///
/// # Errors
///
/// Returns [`PopulateError::Shape`] before any site is touched if a reserved
/// location has the wrong type, and [`PopulateError::Said`] if digesting
/// fails. The document is consumed either way.
pub fn populate(mut document: Value, options: &PopulateOptions) -> Result<Value, PopulateError> {
    let canonicalizer = options.canonicalizer();
    let sites = discover_sites(&document, &options.label)?;

    for site in &sites {
        let slot = site
            .resolve_mut(&mut document)
            .ok_or_else(|| PopulateError::MissingPath(site.to_string()))?;
        let node = std::mem::take(slot);
        *slot = rebuild_site(site, node, options, &canonicalizer)?;
    }

    info!(
        sites = sites.len(),
        label = %options.label,
        code = %options.code,
        "populated SAIDs"
    );
    Ok(document)
}

/// Returns `node` with its label set to its own SAID.
fn rebuild_site(
    site: &SiteLocation,
    node: Value,
    options: &PopulateOptions,
    canonicalizer: &Canonicalizer,
) -> Result<Value, PopulateError> {
    let sad = match node {
        Value::Object(map) => map,
        other => return Err(PopulateError::shape(site.to_string(), "object", &other)),
    };
    let (sad, said) = saidify(sad, &options.label, options.code, canonicalizer)?;
    debug!(site = %site, %said, "computed SAID");
    Ok(Value::Object(sad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(label: &str) -> PopulateOptions {
        PopulateOptions {
            label: label.to_string(),
            ..PopulateOptions::default()
        }
    }

    #[test]
    fn defaults_follow_json_schema_convention() {
        let opts = PopulateOptions::default();
        assert_eq!(opts.label, "$id");
        assert_eq!(opts.code, DigestCode::Blake3);
        assert_eq!(opts.serialization, Serialization::Compact);
    }

    #[test]
    fn minimal_document_gains_only_root_said() {
        let out = populate(json!({"properties": {}}), &options("$d")).unwrap();
        let map = out.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["properties"], json!({}));
        let said = map["$d"].as_str().unwrap();
        assert_eq!(said.len(), 44);
        assert!(said.starts_with('E'));
    }

    #[test]
    fn shape_error_happens_before_any_site_is_touched() {
        let doc = json!({
            "properties": {
                "a": {"$id": ""},
                "e": {"oneOf": "not a list"}
            }
        });
        assert!(matches!(
            populate(doc, &options("$id")),
            Err(PopulateError::Shape { expected: "array", .. })
        ));
    }
}
