//! Verify command implementation.

use crate::output::{format_json, format_site_row, print_table_header};
use saidify_canonical::{verify_raw, Said};
use saidify_core::{verify_document, PopulateOptions};
use saidify_publish::ARTIFACT_FILE_NAME;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

pub fn run(
    path: impl AsRef<Path>,
    strict: bool,
    json_output: bool,
    options: PopulateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let raw = std::fs::read(path)
        .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?;
    let document: Value =
        serde_json::from_slice(&raw).map_err(|e| format!("Invalid JSON: {}", e))?;

    let report = verify_document(&document, &options)?;
    let mut all_ok = report.is_valid();

    // A published artifact must also be canonical and live under its own SAID.
    let artifact = expected_artifact_said(path).map(|expected| {
        let verdict = match verify_raw(&raw, &options.label, &options.canonicalizer()) {
            Ok(said) if said == expected => Ok(said),
            Ok(said) => Err(format!("directory {} holds SAID {}", expected, said)),
            Err(e) => Err(e.to_string()),
        };
        debug!(%expected, ok = verdict.is_ok(), "checked published artifact");
        (expected, verdict)
    });
    if let Some((_, Err(_))) = &artifact {
        all_ok = false;
    }

    if json_output {
        let mut out = json!({
            "valid": all_ok,
            "report": report,
        });
        if let Some((expected, verdict)) = &artifact {
            out["artifact"] = json!({
                "expected": expected,
                "ok": verdict.is_ok(),
                "error": verdict.as_ref().err(),
            });
        }
        println!("{}", format_json(&out));
    } else {
        print_table_header();
        for site in &report.sites {
            println!("{}", format_site_row(site));
        }
        match &artifact {
            Some((expected, Ok(_))) => println!("artifact: Ok ({})", expected),
            Some((_, Err(reason))) => println!("artifact: Invalid ({})", reason),
            None => {}
        }
    }

    if strict && !all_ok {
        std::process::exit(1);
    }
    Ok(())
}

/// SAID named by the parent directory of a `<SAID>/index.json` path.
fn expected_artifact_said(path: &Path) -> Option<Said> {
    if path.file_name()? != ARTIFACT_FILE_NAME {
        return None;
    }
    let dir = path.parent()?.file_name()?.to_str()?;
    Said::parse(dir).ok()
}
