use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root()
        .join("agrosense_api/tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn validator(schema_name: &str) -> jsonschema::Validator {
    let schema = load_schema(schema_name);
    jsonschema::draft202012::new(&schema).unwrap_or_else(|e| panic!("{schema_name}: {e}"))
}

/// Pulls the item array out of an enveloped fixture, whatever its list shape.
fn extract_items(fixture: &Value) -> Value {
    let data = &fixture["data"];
    if data.is_array() {
        data.clone()
    } else {
        data["data"].clone()
    }
}

fn assert_valid(validator: &jsonschema::Validator, data: &Value, what: &str) {
    if let Err(e) = validator.validate(data) {
        panic!("{what} failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_parcels_fixture_conforms_to_schema() {
    let data = extract_items(&load_fixture("parcels_paginator.json"));
    assert_valid(&validator("parcel.schema.json"), &data, "parcels fixture");
}

#[test]
fn test_sensors_fixture_conforms_to_schema() {
    let data = extract_items(&load_fixture("sensors_resource.json"));
    assert_valid(&validator("sensor.schema.json"), &data, "sensors fixture");
}

#[test]
fn test_control_units_fixture_conforms_to_schema() {
    let data = extract_items(&load_fixture("control_units_array.json"));
    assert_valid(&validator("control_unit.schema.json"), &data, "control units fixture");
}

#[test]
fn test_each_list_fixture_matches_exactly_one_payload_shape() {
    let v = validator("list_payload.schema.json");
    for name in [
        "parcels_paginator.json",
        "sensors_resource.json",
        "control_units_array.json",
    ] {
        let fixture = load_fixture(name);
        assert_valid(&v, &fixture["data"], name);
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_parcel_schema_rejects_missing_required_field() {
    let mut data = extract_items(&load_fixture("parcels_paginator.json"));
    data[0]
        .as_object_mut()
        .expect("parcel is an object")
        .remove("name");

    assert!(
        validator("parcel.schema.json").validate(&data).is_err(),
        "schema should reject parcel missing name"
    );
}

#[test]
fn test_sensor_schema_rejects_missing_control_unit() {
    let mut data = extract_items(&load_fixture("sensors_resource.json"));
    data[0]
        .as_object_mut()
        .expect("sensor is an object")
        .remove("control_unit_id");

    assert!(
        validator("sensor.schema.json").validate(&data).is_err(),
        "schema should reject sensor missing control_unit_id"
    );
}

#[test]
fn test_control_unit_schema_rejects_invalid_status() {
    let mut data = extract_items(&load_fixture("control_units_array.json"));
    data[0]
        .as_object_mut()
        .expect("control unit is an object")
        .insert("status".to_string(), Value::String("rebooting".to_string()));

    assert!(
        validator("control_unit.schema.json").validate(&data).is_err(),
        "schema should reject unknown status"
    );
}

#[test]
fn test_parcel_schema_rejects_non_numeric_area() {
    let mut data = extract_items(&load_fixture("parcels_paginator.json"));
    data[0]
        .as_object_mut()
        .expect("parcel is an object")
        .insert("area_m2".to_string(), Value::String("large".to_string()));

    assert!(validator("parcel.schema.json").validate(&data).is_err());
}

#[test]
fn test_list_payload_schema_rejects_unrecognized_shapes() {
    let v = validator("list_payload.schema.json");
    for bad in [
        serde_json::json!({"items": 3}),
        serde_json::json!("parcels"),
        serde_json::json!({"data": {"id": 1}}),
    ] {
        assert!(v.validate(&bad).is_err(), "should reject {bad}");
    }
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_sensor_schema_rejects_additional_properties() {
    let mut data = extract_items(&load_fixture("sensors_resource.json"));
    data[0]
        .as_object_mut()
        .expect("sensor is an object")
        .insert("bogusField".to_string(), Value::Number(123.into()));

    assert!(
        validator("sensor.schema.json").validate(&data).is_err(),
        "schema should reject additional properties"
    );
}

#[test]
fn test_empty_array_conforms_to_all_schemas() {
    let empty = serde_json::json!([]);

    for schema_name in [
        "parcel.schema.json",
        "sensor.schema.json",
        "control_unit.schema.json",
        "list_payload.schema.json",
    ] {
        assert_valid(&validator(schema_name), &empty, schema_name);
    }
}

#[test]
fn test_envelope_with_string_meta_matches_payload_schema() {
    let payload = serde_json::json!({
        "data": [],
        "meta": {"current_page": "1", "per_page": "12", "total": "0"}
    });
    assert_valid(&validator("list_payload.schema.json"), &payload, "string meta envelope");
}
