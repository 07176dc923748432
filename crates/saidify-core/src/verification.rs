use saidify_canonical::{compute_said, Said, Serialization};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::PopulateError;
use crate::populate::PopulateOptions;
use crate::site::{discover_sites, SiteLocation};

/// Outcome of checking one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiteVerdict {
    /// The embedded SAID matches the content.
    Ok,
    /// The embedded SAID is well formed but does not match the content.
    Mismatch,
    /// The site has no label, or an empty one.
    Missing,
    /// The label holds something that is not a SAID.
    Malformed,
}

/// Verification result for a single site.
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    /// Where the site is.
    pub location: SiteLocation,
    /// Value found at the label, if it was a string.
    pub embedded: Option<String>,
    /// SAID recomputed from the site's content.
    pub computed: Said,
    /// Verdict.
    pub verdict: SiteVerdict,
}

/// Verification result for a whole document, sites in post-order.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Label that was checked.
    pub label: String,
    /// Serialization the SAIDs were recomputed over.
    pub serialization: Serialization,
    /// One entry per discovered site; the root is last.
    pub sites: Vec<SiteReport>,
}

impl VerificationReport {
    /// True when every site verified.
    pub fn is_valid(&self) -> bool {
        self.sites.iter().all(|s| s.verdict == SiteVerdict::Ok)
    }

    /// The root site's report.
    pub fn root(&self) -> Option<&SiteReport> {
        self.sites.iter().find(|s| s.location == SiteLocation::Root)
    }
}

/// Recomputes the SAID of every site in `document` and compares it to the
/// embedded value.
///
/// Each site is recomputed with the code its embedded SAID declares, falling
/// back to `options.code` when there is none.
pub fn verify_document(
    document: &Value,
    options: &PopulateOptions,
) -> Result<VerificationReport, PopulateError> {
    let canonicalizer = options.canonicalizer();
    let mut sites = Vec::new();

    for location in discover_sites(document, &options.label)? {
        let sad = location
            .resolve(document)
            .ok_or_else(|| PopulateError::MissingPath(location.to_string()))?;

        let raw = sad.get(&options.label);
        let parsed = match raw {
            None => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(Said::parse(s.as_str()).ok()),
            Some(_) => Some(None),
        };
        let code = parsed
            .as_ref()
            .and_then(Option::as_ref)
            .map(Said::code)
            .unwrap_or(options.code);
        let computed = compute_said(sad, &options.label, code, &canonicalizer)?;

        let verdict = match parsed {
            None => SiteVerdict::Missing,
            Some(None) => SiteVerdict::Malformed,
            Some(Some(said)) if said == computed => SiteVerdict::Ok,
            Some(Some(_)) => SiteVerdict::Mismatch,
        };
        if verdict != SiteVerdict::Ok {
            warn!(site = %location, ?verdict, "SAID did not verify");
        }

        sites.push(SiteReport {
            location,
            embedded: raw.and_then(Value::as_str).map(str::to_string),
            computed,
            verdict,
        });
    }

    Ok(VerificationReport {
        label: options.label.clone(),
        serialization: options.serialization,
        sites,
    })
}
