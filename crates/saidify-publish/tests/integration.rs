use saidify_canonical::{verify_raw, Canonicalizer, DigestCode};
use saidify_core::{populate, PopulateOptions, LE_CONST_POINTER};
use saidify_publish::{
    generate, load_document, PublishError, Publisher, WriteOptions, ARTIFACT_FILE_NAME,
};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn discovery_schema() -> Value {
    json!({
        "$id": "",
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Discovery",
        "properties": {
            "a": {"$id": "", "type": "object"},
            "e": {
                "oneOf": [
                    {"$id": "", "type": "string"},
                    {
                        "$id": "",
                        "type": "object",
                        "properties": {"le": {"properties": {"s": {"type": "string"}}}}
                    }
                ]
            }
        }
    })
}

fn write_schema(temp: &TempDir, doc: &Value) -> PathBuf {
    let path = temp.path().join("discovery-schema.json");
    fs::write(&path, serde_json::to_vec_pretty(doc).unwrap()).unwrap();
    path
}

#[test]
fn test_publish_writes_source_and_artifact() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &discovery_schema());
    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);

    let document = populate(load_document(&source).unwrap(), &options).unwrap();
    let publication = publisher.publish(&source, &document).unwrap();
    assert_eq!(publisher.publish_root(), temp.path().join("publish"));

    let root_said = document["$id"].as_str().unwrap();
    assert_eq!(publication.said.as_str(), root_said);
    assert_eq!(
        publication.artifact,
        temp.path()
            .join("publish")
            .join(root_said)
            .join(ARTIFACT_FILE_NAME)
    );

    // Round-trip readability of the rewritten source.
    let reloaded = load_document(&source).unwrap();
    assert_eq!(reloaded, document);
    let text = fs::read_to_string(&source).unwrap();
    assert!(text.contains("\n  \"$schema\""), "source should be indented");

    // Content-addressing: the artifact digests to its directory name.
    let raw = fs::read(&publication.artifact).unwrap();
    assert_eq!(raw.len(), publication.bytes);
    assert!(!raw.contains(&b'\n'));
    let said = verify_raw(&raw, "$id", &Canonicalizer::default()).unwrap();
    assert_eq!(said.as_str(), root_said);
}

#[test]
fn test_republishing_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &discovery_schema());
    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options)
        .with_options(WriteOptions { sync: true });

    let first = generate(&source, None, &options, &publisher).unwrap();
    let first_source = fs::read(&source).unwrap();
    let second = generate(&source, None, &options, &publisher).unwrap();

    assert_eq!(first.said, second.said);
    assert_eq!(first_source, fs::read(&source).unwrap());
    assert_eq!(
        fs::read_dir(temp.path().join("publish")).unwrap().count(),
        1
    );
}

#[test]
fn test_le_value_reaches_both_outputs_and_the_root_said() {
    let temp = TempDir::new().unwrap();
    let options = PopulateOptions {
        code: DigestCode::Sha256,
        ..PopulateOptions::default()
    };
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);

    let source = write_schema(&temp, &discovery_schema());
    let one = generate(&source, Some("EKYLUMmNPZeEs77Zvclf0bSN5IN-mLfLpx2ySb-HDlk4"), &options, &publisher).unwrap();

    let rewritten = load_document(&source).unwrap();
    assert_eq!(
        rewritten.pointer(LE_CONST_POINTER),
        Some(&json!("EKYLUMmNPZeEs77Zvclf0bSN5IN-mLfLpx2ySb-HDlk4"))
    );
    let published: Value = serde_json::from_slice(&fs::read(&one.artifact).unwrap()).unwrap();
    assert_eq!(
        published.pointer(LE_CONST_POINTER),
        Some(&json!("EKYLUMmNPZeEs77Zvclf0bSN5IN-mLfLpx2ySb-HDlk4"))
    );

    let source = write_schema(&temp, &discovery_schema());
    let two = generate(&source, Some("ENPXp1vQzRF6JwIuS-mp2U8Uf1MoADoP_GqQ62VsDZWY"), &options, &publisher).unwrap();
    assert_ne!(one.said, two.said);
}

#[test]
fn test_stale_root_said_is_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &discovery_schema());
    let original = fs::read(&source).unwrap();
    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);

    let mut document = populate(discovery_schema(), &options).unwrap();
    document["title"] = json!("Edited after population");

    let err = publisher.publish(&source, &document).unwrap_err();
    assert!(matches!(err, PublishError::Said(_)));
    assert_eq!(fs::read(&source).unwrap(), original);
    assert!(!temp.path().join("publish").exists());
}

#[test]
fn test_unpopulated_document_cannot_be_published() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &json!({"properties": {}}));
    let publisher = Publisher::from_options(temp.path().join("publish"), &PopulateOptions::default());

    let err = publisher
        .publish(&source, &json!({"properties": {}}))
        .unwrap_err();
    assert!(matches!(err, PublishError::Said(_)));
}

#[test]
fn test_uncreatable_publish_root_fails() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &discovery_schema());
    let blocker = temp.path().join("publish");
    fs::write(&blocker, b"not a directory").unwrap();

    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(&blocker, &options);
    let err = generate(&source, None, &options, &publisher).unwrap_err();
    assert!(matches!(err, PublishError::CreateDir { .. }));
}

#[test]
fn test_shape_error_leaves_source_untouched() {
    let temp = TempDir::new().unwrap();
    let broken = json!({"$id": "", "properties": {"e": {"oneOf": {"$id": ""}}}});
    let source = write_schema(&temp, &broken);
    let original = fs::read(&source).unwrap();

    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);
    let err = generate(&source, None, &options, &publisher).unwrap_err();

    assert!(matches!(err, PublishError::Populate(_)));
    assert_eq!(fs::read(&source).unwrap(), original);
    assert!(!temp.path().join("publish").exists());
}

#[test]
fn test_missing_le_target_aborts_run() {
    let temp = TempDir::new().unwrap();
    let source = write_schema(&temp, &json!({"$id": "", "properties": {}}));
    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);

    let err = generate(&source, Some("x"), &options, &publisher).unwrap_err();
    assert!(matches!(err, PublishError::Populate(_)));
}

#[test]
fn test_missing_source_is_not_found() {
    let temp = TempDir::new().unwrap();
    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);
    let err = generate(temp.path().join("absent.json"), None, &options, &publisher).unwrap_err();
    assert!(matches!(err, PublishError::NotFound(_)));
}

#[test]
fn test_float_literals_survive_load_and_publish() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("discovery-schema.json");
    fs::write(
        &source,
        r#"{"$id":"","properties":{"n":{"minimum":1.0715660391465826e-75}}}"#,
    )
    .unwrap();
    let exact: f64 = "1.0715660391465826e-75".parse().unwrap();

    let options = PopulateOptions::default();
    let publisher = Publisher::from_options(temp.path().join("publish"), &options);
    let publication = generate(&source, None, &options, &publisher).unwrap();

    let rewritten = load_document(&source).unwrap();
    assert_eq!(
        rewritten.pointer("/properties/n/minimum").and_then(Value::as_f64),
        Some(exact)
    );
    let raw = fs::read(&publication.artifact).unwrap();
    let said = verify_raw(&raw, "$id", &Canonicalizer::default()).unwrap();
    assert_eq!(said, publication.said);
}
