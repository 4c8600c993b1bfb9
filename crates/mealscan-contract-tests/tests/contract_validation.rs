//! Validates contract fixtures against frozen JSON schemas.

use jsonschema::JSONSchema;
use serde_json::Value;

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn scan_response_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/scan-response.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/scan-response.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "scan response fixture should validate against schema"
    );
}

#[test]
fn scan_error_fixture_matches_schema() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/scan-error.schema.json"
    ));
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/scan-error.valid.json"
    ));
    assert!(
        validator.is_valid(&fixture),
        "scan error fixture should validate against schema"
    );
}

#[test]
fn scan_response_schema_rejects_out_of_range_confidence() {
    let validator = compile_validator(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/scan-response.schema.json"
    ));
    let fixture = serde_json::json!({
        "food_item": "Burger",
        "confidence": 87.0,
        "nutrition_data": {"calories": 295, "proteins": 17, "carbs": 30, "fats": 12}
    });
    assert!(
        !validator.is_valid(&fixture),
        "confidence above 1 should fail validation"
    );
}
