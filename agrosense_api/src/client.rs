//! HTTP client for the AgroSense REST API.

use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    normalize::normalize,
    query::{ControlUnitQuery, ParcelQuery, Query, SensorQuery},
    types::{
        ApiResponse, AuthSession, ControlUnit, ControlUnitForm, ControlUnitID, ControlUnitOption,
        ListPayload, LoginCredentials, Paginated, Parcel, ParcelForm, ParcelID, ParcelOption,
        ParcelStatus, Sensor, SensorForm, SensorID, User,
    },
    Error,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const PARCELS: &str = "/parcels";
const SENSORS: &str = "/sensors";
const CONTROL_UNITS: &str = "/control-units";

/// Page size used to fetch parcel selector options in one request.
const PARCEL_OPTIONS_PER_PAGE: u64 = 200;

/// HTTP client for the AgroSense REST API.
///
/// Every response is expected in the backend's `{success, data, message,
/// errors}` envelope; bodies without a `success` flag are taken as bare
/// payloads. List endpoints go through [`ListPayload::decode`] and
/// [`normalize`] so callers always get a [`Paginated`] result.
#[derive(Clone, Debug)]
pub struct Client {
    base_api_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client pointing at the default local API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (e.g. `https://agro.example/api`).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the bearer token sent with every request.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    /// Sends a request and returns the decoded JSON body of a 2xx response.
    /// Empty bodies come back as `Value::Null`.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Value, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;

        let mut req = client
            .request(method.clone(), url.clone())
            .header("accept", "application/json")
            .header("content-type", "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!("{} {}", method, url);
        let resp = req.send().await.map_err(|e| {
            tracing::error!("Failed to reach {}: {}", url, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::error!("{} {} failed with status {}: {}", method, url, status, message);
            if status.as_u16() == 401 {
                return Err(Error::Unauthorized);
            }
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str::<Value>(&text).map_err(|e| {
            tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(&text));
            Error::Decode(e.to_string())
        })
    }

    /// Sends a request and returns the envelope's `data`, if any.
    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, Error> {
        let url = self.get_url(path)?;
        let body = self.send(method, url, body).await?;
        unwrap_envelope(body)
    }

    async fn fetch_one<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let data = self
            .request(method, path, body)
            .await?
            .ok_or_else(|| Error::Decode(format!("{} returned no data", path)))?;
        serde_json::from_value::<T>(data).map_err(|e| {
            tracing::error!("Failed to parse resource from {}: {}", path, e);
            Error::Decode(e.to_string())
        })
    }

    async fn list<T, Q>(&self, path: &str, query: &Q) -> Result<Paginated<T>, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let fallback = query.page_request();
        let url = query.add_to_url(&self.get_url(path)?);
        let body = self.send(Method::GET, url, None::<&()>).await?;
        let Some(payload) = unwrap_envelope(body)? else {
            tracing::warn!("{} returned no data, using an empty page", path);
            return Ok(Paginated::empty(fallback));
        };
        let raw = ListPayload::<T>::decode(&payload).map_err(|e| {
            tracing::error!("Failed to decode list from {}: {}", path, e);
            e
        })?;
        Ok(normalize(raw, fallback))
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        self.request(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    // -- Parcels --

    /// Fetches a page of parcels matching the given query.
    pub async fn list_parcels(&self, query: &ParcelQuery) -> Result<Paginated<Parcel>, Error> {
        self.list::<Parcel, ParcelQuery>(PARCELS, query).await
    }

    /// Fetches a single parcel by ID.
    pub async fn get_parcel(&self, id: ParcelID) -> Result<Parcel, Error> {
        self.fetch_one(Method::GET, &format!("{}/{}", PARCELS, id), None::<&()>)
            .await
    }

    pub async fn create_parcel(&self, form: &ParcelForm) -> Result<Parcel, Error> {
        self.fetch_one(Method::POST, PARCELS, Some(form)).await
    }

    pub async fn update_parcel(&self, id: ParcelID, form: &ParcelForm) -> Result<Parcel, Error> {
        self.fetch_one(Method::PUT, &format!("{}/{}", PARCELS, id), Some(form))
            .await
    }

    pub async fn delete_parcel(&self, id: ParcelID) -> Result<(), Error> {
        self.delete(&format!("{}/{}", PARCELS, id)).await
    }

    /// Active parcels for selectors, fetched as a single large page.
    pub async fn parcel_options(&self) -> Result<Vec<ParcelOption>, Error> {
        let query = ParcelQuery::default()
            .with_status(ParcelStatus::Active)
            .with_per_page(PARCEL_OPTIONS_PER_PAGE);
        Ok(self
            .list::<ParcelOption, ParcelQuery>(PARCELS, &query)
            .await?
            .items)
    }

    // -- Sensors --

    /// Fetches a page of sensors matching the given query.
    pub async fn list_sensors(&self, query: &SensorQuery) -> Result<Paginated<Sensor>, Error> {
        self.list::<Sensor, SensorQuery>(SENSORS, query).await
    }

    /// Fetches a single sensor by ID.
    pub async fn get_sensor(&self, id: SensorID) -> Result<Sensor, Error> {
        self.fetch_one(Method::GET, &format!("{}/{}", SENSORS, id), None::<&()>)
            .await
    }

    pub async fn create_sensor(&self, form: &SensorForm) -> Result<Sensor, Error> {
        self.fetch_one(Method::POST, SENSORS, Some(form)).await
    }

    pub async fn update_sensor(&self, id: SensorID, form: &SensorForm) -> Result<Sensor, Error> {
        self.fetch_one(Method::PUT, &format!("{}/{}", SENSORS, id), Some(form))
            .await
    }

    pub async fn delete_sensor(&self, id: SensorID) -> Result<(), Error> {
        self.delete(&format!("{}/{}", SENSORS, id)).await
    }

    // -- Control units --

    /// Fetches a page of control units matching the given query.
    pub async fn list_control_units(
        &self,
        query: &ControlUnitQuery,
    ) -> Result<Paginated<ControlUnit>, Error> {
        self.list::<ControlUnit, ControlUnitQuery>(CONTROL_UNITS, query)
            .await
    }

    /// Fetches a single control unit by ID.
    pub async fn get_control_unit(&self, id: ControlUnitID) -> Result<ControlUnit, Error> {
        self.fetch_one(Method::GET, &format!("{}/{}", CONTROL_UNITS, id), None::<&()>)
            .await
    }

    pub async fn create_control_unit(&self, form: &ControlUnitForm) -> Result<ControlUnit, Error> {
        self.fetch_one(Method::POST, CONTROL_UNITS, Some(form)).await
    }

    pub async fn update_control_unit(
        &self,
        id: ControlUnitID,
        form: &ControlUnitForm,
    ) -> Result<ControlUnit, Error> {
        self.fetch_one(Method::PUT, &format!("{}/{}", CONTROL_UNITS, id), Some(form))
            .await
    }

    pub async fn delete_control_unit(&self, id: ControlUnitID) -> Result<(), Error> {
        self.delete(&format!("{}/{}", CONTROL_UNITS, id)).await
    }

    /// Active control units for selectors. Accepts a bare array or any
    /// wrapped list shape; pagination is discarded.
    pub async fn active_control_units(&self) -> Result<Vec<ControlUnitOption>, Error> {
        let path = format!("{}/active", CONTROL_UNITS);
        let Some(payload) = self.request(Method::GET, &path, None::<&()>).await? else {
            return Ok(Vec::new());
        };
        let raw = ListPayload::<ControlUnitOption>::decode(&payload)?;
        Ok(normalize(raw, Default::default()).items)
    }

    // -- Session --

    /// Exchanges credentials for a bearer token. The token is not stored on
    /// the client; call [`Client::set_token`] or [`Client::with_token`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        self.fetch_one(Method::POST, "/auth/login", Some(credentials))
            .await
    }

    /// Returns the profile of the user owning the current token.
    pub async fn profile(&self) -> Result<User, Error> {
        self.fetch_one(Method::GET, "/auth/profile", None::<&()>)
            .await
    }

    /// Invalidates the current token server-side. Failures are logged and ignored.
    pub async fn logout(&self) {
        let empty = serde_json::json!({});
        if let Err(e) = self.request(Method::POST, "/auth/logout", Some(&empty)).await {
            tracing::warn!("Logout request failed: {}", e);
        }
    }
}

/// Strips the `{success, data, message, errors}` envelope when present.
///
/// Returns `Ok(None)` for a successful envelope without data or an empty
/// body, and [`Error::Api`] when the envelope reports `success: false`.
fn unwrap_envelope(body: Value) -> Result<Option<Value>, Error> {
    let is_envelope = matches!(
        &body,
        Value::Object(map) if map.get("success").is_some_and(Value::is_boolean)
    );
    if !is_envelope {
        return Ok(match body {
            Value::Null => None,
            other => Some(other),
        });
    }

    let envelope: ApiResponse<Value> =
        serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(Error::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_string()),
            errors: envelope.errors.unwrap_or_default(),
        });
    }
    Ok(envelope.data)
}

/// Best-effort human message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
