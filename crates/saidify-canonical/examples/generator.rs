use saidify_canonical::{saidify, Canonicalizer, DigestCode, Serialization};
use serde_json::json;

fn main() {
    let canonicalizer = Canonicalizer::new(Serialization::Compact);
    let schema = json!({
        "$id": "",
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Example",
        "properties": {}
    });
    let Some(sad) = schema.as_object().cloned() else {
        eprintln!("schema must be an object");
        std::process::exit(1);
    };

    match saidify(sad, "$id", DigestCode::Blake3, &canonicalizer) {
        Ok((_, said)) => println!("{}", said),
        Err(err) => {
            eprintln!("SAID computation failed: {}", err);
            std::process::exit(1);
        }
    }
}
