use std::time::Duration;

use agrosense_lib::agrosense_api::Client;
use agrosense_lib::cache::MemoryCache;
use agrosense_lib::types::{LoginCredentials, ParcelForm, SensorForm};
use agrosense_lib::{AgroSenseError, CachedClient, Query, RetryConfig, SensorQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sensors_page() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "data": [
                {"id": 1, "name": "Humedad", "type": "capacitive", "control_unit_id": 4, "active": true}
            ],
            "meta": {"current_page": 1, "per_page": 12, "total": 1, "last_page": 1}
        }
    })
}

fn fast_retry(max_retries: usize) -> RetryConfig {
    RetryConfig {
        max_retries,
        base_delay_ms: 1,
        max_delay_ms: 5,
    }
}

fn client_for(server: &MockServer, retry: RetryConfig) -> CachedClient {
    CachedClient::with_client(
        Client::with_base_url(&server.uri()),
        MemoryCache::new(Duration::from_secs(60)),
        retry,
    )
}

#[tokio::test]
async fn repeated_list_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    let query = SensorQuery::default();
    let first = client.list_sensors(&query).await.unwrap();
    let second = client.list_sensors(&query).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(second.items[0].name, "Humedad");
}

#[tokio::test]
async fn different_queries_use_different_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    client.list_sensors(&SensorQuery::default()).await.unwrap();
    client
        .list_sensors(&SensorQuery::default().with_page(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn write_invalidates_resource_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"id": 2, "name": "Nuevo", "type": "dht11", "control_unit_id": 4, "active": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    let query = SensorQuery::default();
    client.list_sensors(&query).await.unwrap();
    let created = client
        .create_sensor(&SensorForm {
            name: Some("Nuevo".to_string()),
            sensor_type: Some("dht11".to_string()),
            control_unit_id: Some(4),
            active: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 2);
    client.list_sensors(&query).await.unwrap();
}

fn parcel_options_page() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "data": [{"id": 14, "name": "Lote Norte", "location": "Castillo Grande", "active": 1}],
            "current_page": 1,
            "per_page": 200,
            "total": 1,
            "last_page": 1
        }
    })
}

#[tokio::test]
async fn write_invalidates_only_its_own_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parcels"))
        .and(query_param("per_page", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(parcel_options_page()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"id": 2, "name": "Nuevo", "type": "dht11", "control_unit_id": 4, "active": true}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parcels"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"id": 15, "name": "Lote Sur", "area_m2": 800, "active": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    assert_eq!(client.parcel_options().await.unwrap().len(), 1);
    client.parcel_options().await.unwrap();

    // A sensor write leaves the parcel selector cached.
    client.create_sensor(&SensorForm::default()).await.unwrap();
    client.parcel_options().await.unwrap();

    let created = client
        .create_parcel(&ParcelForm {
            name: Some("Lote Sur".to_string()),
            area_m2: Some(800.0),
            ..ParcelForm::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 15);
    client.parcel_options().await.unwrap();
}

#[tokio::test]
async fn login_clears_cached_reads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {"id": 3, "name": "Rosa Huaman", "roles": ["admin"]},
                "token": "3|abc"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    let query = SensorQuery::default();
    client.list_sensors(&query).await.unwrap();
    client.list_sensors(&query).await.unwrap();

    let session = client
        .login(&LoginCredentials {
            login: "rosa@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.token, "3|abc");
    client.list_sensors(&query).await.unwrap();
}

#[tokio::test]
async fn logout_clears_cached_reads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(0));
    let query = SensorQuery::default();
    client.list_sensors(&query).await.unwrap();
    client.logout().await;
    client.list_sensors(&query).await.unwrap();
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sensors_page()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(3));
    let page = client.list_sensors(&SensorQuery::default()).await.unwrap();
    assert_eq!(page.meta.total, 1);
}

#[tokio::test]
async fn retries_give_up_after_max() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors/9"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(2));
    let err = client.get_sensor(9).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensors/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No encontrado"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_retry(3));
    let err = client.get_sensor(404).await.unwrap_err();
    match err {
        AgroSenseError::Api(agrosense_lib::agrosense_api::Error::HttpStatus { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "No encontrado");
        }
        other => panic!("unexpected error: {}", other),
    }
}
