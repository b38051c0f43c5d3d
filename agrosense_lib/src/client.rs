//! Caching and retrying wrapper around the API client.

use std::future::Future;

use agrosense_api::types::{
    AuthSession, ControlUnit, ControlUnitForm, ControlUnitID, ControlUnitOption, LoginCredentials,
    Paginated, Parcel, ParcelForm, ParcelID, ParcelOption, Sensor, SensorForm, SensorID, User,
};
use agrosense_api::{Client, ControlUnitQuery, ParcelQuery, SensorQuery};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::MemoryCache;
use crate::config::{ClientConfig, RetryConfig};
use crate::error::AgroSenseError;

const PARCELS: &str = "parcels";
const SENSORS: &str = "sensors";
const CONTROL_UNITS: &str = "control-units";

/// API client wrapper that adds in-memory caching and retries.
///
/// Reads (lists, single records, lookups) are cached per resource and
/// query. A successful create, update or delete drops every cached entry
/// of that resource, and also of the resources whose selectors list it.
/// Reads are retried on transport errors, 429 and 5xx; writes are not.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    retry: RetryConfig,
}

impl CachedClient {
    /// Creates a cached client from a full configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut inner = Client::with_base_url(&config.base_url).with_timeout(config.timeout);
        inner.set_token(config.token.clone());
        Self {
            inner,
            cache: MemoryCache::new(config.cache_ttl),
            retry: config.retry,
        }
    }

    /// Creates a cached client around an existing API client. Used for testing.
    pub fn with_client(inner: Client, cache: MemoryCache, retry: RetryConfig) -> Self {
        Self {
            inner,
            cache,
            retry,
        }
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, AgroSenseError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AgroSenseError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !err.is_retryable() {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Serves `key` from the cache or runs `fetch` with retries and caches the result.
    async fn cached<T, F, Fut>(&self, key: String, fetch: F) -> Result<T, AgroSenseError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, agrosense_api::Error>>,
    {
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("cache hit: {}", key);
            return serde_json::from_str(&cached)
                .map_err(|e| AgroSenseError::Cache(format!("corrupt entry {}: {}", key, e)));
        }

        let value = self
            .with_retry(&key, || {
                let attempt = fetch();
                async move { Ok(attempt.await?) }
            })
            .await?;
        match serde_json::to_string(&value) {
            Ok(json) => self.cache.set(key, json),
            Err(e) => tracing::warn!("not caching {}: {}", key, e),
        }
        Ok(value)
    }

    /// Drops cached entries for `resource` and the selectors that list it.
    fn invalidate(&self, resource: &str) {
        let mut removed = self.cache.invalidate_prefix(&format!("{}:", resource));
        removed += self.cache.invalidate_prefix(&format!("lookup:{}", resource));
        tracing::debug!("invalidated {} cached {} entries", removed, resource);
    }

    // -- Parcels --

    pub async fn list_parcels(
        &self,
        query: &ParcelQuery,
    ) -> Result<Paginated<Parcel>, AgroSenseError> {
        self.cached(format!("{}:list:{:?}", PARCELS, query), || {
            self.inner.list_parcels(query)
        })
        .await
    }

    pub async fn get_parcel(&self, id: ParcelID) -> Result<Parcel, AgroSenseError> {
        self.cached(format!("{}:show:{}", PARCELS, id), || self.inner.get_parcel(id))
            .await
    }

    pub async fn create_parcel(&self, form: &ParcelForm) -> Result<Parcel, AgroSenseError> {
        let parcel = self.inner.create_parcel(form).await?;
        self.invalidate(PARCELS);
        Ok(parcel)
    }

    pub async fn update_parcel(
        &self,
        id: ParcelID,
        form: &ParcelForm,
    ) -> Result<Parcel, AgroSenseError> {
        let parcel = self.inner.update_parcel(id, form).await?;
        self.invalidate(PARCELS);
        Ok(parcel)
    }

    pub async fn delete_parcel(&self, id: ParcelID) -> Result<(), AgroSenseError> {
        self.inner.delete_parcel(id).await?;
        self.invalidate(PARCELS);
        Ok(())
    }

    pub async fn parcel_options(&self) -> Result<Vec<ParcelOption>, AgroSenseError> {
        self.cached(format!("lookup:{}", PARCELS), || self.inner.parcel_options())
            .await
    }

    // -- Sensors --

    pub async fn list_sensors(
        &self,
        query: &SensorQuery,
    ) -> Result<Paginated<Sensor>, AgroSenseError> {
        self.cached(format!("{}:list:{:?}", SENSORS, query), || {
            self.inner.list_sensors(query)
        })
        .await
    }

    pub async fn get_sensor(&self, id: SensorID) -> Result<Sensor, AgroSenseError> {
        self.cached(format!("{}:show:{}", SENSORS, id), || self.inner.get_sensor(id))
            .await
    }

    pub async fn create_sensor(&self, form: &SensorForm) -> Result<Sensor, AgroSenseError> {
        let sensor = self.inner.create_sensor(form).await?;
        self.invalidate(SENSORS);
        Ok(sensor)
    }

    pub async fn update_sensor(
        &self,
        id: SensorID,
        form: &SensorForm,
    ) -> Result<Sensor, AgroSenseError> {
        let sensor = self.inner.update_sensor(id, form).await?;
        self.invalidate(SENSORS);
        Ok(sensor)
    }

    pub async fn delete_sensor(&self, id: SensorID) -> Result<(), AgroSenseError> {
        self.inner.delete_sensor(id).await?;
        self.invalidate(SENSORS);
        Ok(())
    }

    // -- Control units --

    pub async fn list_control_units(
        &self,
        query: &ControlUnitQuery,
    ) -> Result<Paginated<ControlUnit>, AgroSenseError> {
        self.cached(format!("{}:list:{:?}", CONTROL_UNITS, query), || {
            self.inner.list_control_units(query)
        })
        .await
    }

    pub async fn get_control_unit(&self, id: ControlUnitID) -> Result<ControlUnit, AgroSenseError> {
        self.cached(format!("{}:show:{}", CONTROL_UNITS, id), || {
            self.inner.get_control_unit(id)
        })
        .await
    }

    pub async fn create_control_unit(
        &self,
        form: &ControlUnitForm,
    ) -> Result<ControlUnit, AgroSenseError> {
        let unit = self.inner.create_control_unit(form).await?;
        self.invalidate(CONTROL_UNITS);
        Ok(unit)
    }

    pub async fn update_control_unit(
        &self,
        id: ControlUnitID,
        form: &ControlUnitForm,
    ) -> Result<ControlUnit, AgroSenseError> {
        let unit = self.inner.update_control_unit(id, form).await?;
        self.invalidate(CONTROL_UNITS);
        Ok(unit)
    }

    pub async fn delete_control_unit(&self, id: ControlUnitID) -> Result<(), AgroSenseError> {
        self.inner.delete_control_unit(id).await?;
        self.invalidate(CONTROL_UNITS);
        Ok(())
    }

    pub async fn active_control_units(&self) -> Result<Vec<ControlUnitOption>, AgroSenseError> {
        self.cached(format!("lookup:{}", CONTROL_UNITS), || {
            self.inner.active_control_units()
        })
        .await
    }

    // -- Session (never cached) --

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AgroSenseError> {
        let session = self.inner.login(credentials).await?;
        self.cache.clear();
        Ok(session)
    }

    pub async fn profile(&self) -> Result<User, AgroSenseError> {
        Ok(self.inner.profile().await?)
    }

    pub async fn logout(&self) {
        self.inner.logout().await;
        self.cache.clear();
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
