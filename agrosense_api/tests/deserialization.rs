use agrosense_api::normalize;
use agrosense_api::types::{
    ApiResponse, ControlUnit, ControlUnitStatus, ListPayload, PageRequest, PaginationMeta, Parcel,
    Sensor,
};
use agrosense_api::Error;
use serde_json::{json, Value};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn envelope_data(name: &str) -> Value {
    let resp: ApiResponse<Value> = serde_json::from_str(&load_fixture(name)).unwrap();
    assert!(resp.success);
    resp.data.unwrap()
}

#[test]
fn deserialize_parcels_paginator() {
    let data = envelope_data("parcels_paginator.json");
    let raw = ListPayload::<Parcel>::decode(&data).unwrap();
    assert_eq!(raw.shape(), "length-aware page");

    let page = normalize(raw, PageRequest::new(1, 50));
    assert_eq!(
        page.meta,
        PaginationMeta {
            current_page: 2,
            per_page: 12,
            total: 14,
            last_page: 2
        }
    );

    let lote = &page.items[0];
    assert_eq!(lote.id, 14);
    assert_eq!(lote.name, "Lote Norte");
    assert!((lote.area_m2 - 12500.5).abs() < f64::EPSILON);
    assert!(lote.active);
    assert_eq!(lote.crop_type.as_deref(), Some("cacao"));

    let vivero = &page.items[1];
    assert!(!vivero.active);
    assert_eq!(vivero.location, None);
    assert_eq!(vivero.area_m2, 800.0);
}

#[test]
fn deserialize_sensors_resource_envelope() {
    let data = envelope_data("sensors_resource.json");
    let raw = ListPayload::<Sensor>::decode(&data).unwrap();
    assert_eq!(raw.shape(), "resource envelope");

    let page = normalize(raw, PageRequest::new(4, 12));
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.meta.current_page, 1);
    assert_eq!(page.meta.per_page, 3);
    assert_eq!(page.meta.total, 25);
    assert_eq!(page.meta.last_page, 9);

    assert_eq!(page.items[0].sensor_type, "capacitive");
    assert!(!page.items[1].active);
    assert_eq!(page.items[1].created_at, None);
    assert_eq!(page.items[2].control_unit_id, 5);
}

#[test]
fn deserialize_control_units_raw_array() {
    let data = envelope_data("control_units_array.json");
    let raw = ListPayload::<ControlUnit>::decode(&data).unwrap();
    assert_eq!(raw.shape(), "raw array");

    let page = normalize(raw, PageRequest::new(1, 1));
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.last_page, 2);

    let cu = &page.items[0];
    assert_eq!(cu.serial_code, "CU-0004");
    assert_eq!(cu.status, ControlUnitStatus::Online);
    assert_eq!(cu.status_topic.as_deref(), Some("agro/cu-0004/status"));
    assert_eq!(page.items[1].status, ControlUnitStatus::Maintenance);
}

#[test]
fn unrecognized_shapes_are_rejected() {
    for value in [json!({"foo": 1}), json!(42), json!("parcels"), json!({"data": "x"})] {
        let err = ListPayload::<Value>::decode(&value).unwrap_err();
        assert!(
            matches!(err, Error::UnrecognizedPayload(_)),
            "expected UnrecognizedPayload for {}, got {:?}",
            value,
            err
        );
    }
}

#[test]
fn unrecognized_object_lists_its_keys() {
    let err = ListPayload::<Value>::decode(&json!({"rows": [], "count": 0})).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Unrecognized list payload: object with keys ["));
    assert!(msg.contains("rows") && msg.contains("count"));
}

#[test]
fn bad_item_reports_index() {
    let value = json!([
        {"id": 1, "name": "a", "type": "dht11", "control_unit_id": 1, "active": true},
        {"id": 2, "name": "b", "control_unit_id": 1, "active": true}
    ]);
    let err = ListPayload::<Sensor>::decode(&value).unwrap_err();
    match err {
        Error::Decode(msg) => assert!(msg.starts_with("item 1:"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn items_alias_accepted() {
    let value = json!({"items": [{"id": 1}], "meta": {"total": 25, "per_page": 10}});
    let page = normalize(
        ListPayload::<Value>::decode(&value).unwrap(),
        PageRequest::new(2, 10),
    );
    assert_eq!(
        page.meta,
        PaginationMeta {
            current_page: 2,
            per_page: 10,
            total: 25,
            last_page: 3
        }
    );
}

#[test]
fn simple_paginator_keeps_top_level_counters() {
    // current_page without total/last_page is not a length-aware page, but
    // the counters it does carry still win over the fallback.
    let value = json!({"data": [1, 2], "current_page": 5, "per_page": "2"});
    let raw = ListPayload::<u64>::decode(&value).unwrap();
    assert_eq!(raw.shape(), "resource envelope");
    let page = normalize(raw, PageRequest::new(1, 12));
    assert_eq!(page.items, vec![1, 2]);
    assert_eq!(
        page.meta,
        PaginationMeta {
            current_page: 5,
            per_page: 2,
            total: 2,
            last_page: 1
        }
    );
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"success": true, "data": not valid json}"#;
    let result = serde_json::from_str::<ApiResponse<Value>>(bad_json);
    assert!(result.is_err());
}
