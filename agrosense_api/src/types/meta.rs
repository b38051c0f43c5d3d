//! Response envelopes and pagination types shared by every list endpoint.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// Dashboard default page size, used when a query does not set one.
pub const DEFAULT_PER_PAGE: u64 = 12;

/// Uniform pagination metadata attached to every normalized list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl PaginationMeta {
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Pagination metadata as a resource envelope may carry it: every field
/// is optional, numeric strings are accepted and camelCase keys are aliases.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialMeta {
    #[serde(default, alias = "currentPage", deserialize_with = "lenient::option_u64")]
    pub current_page: Option<u64>,
    #[serde(default, alias = "perPage", deserialize_with = "lenient::option_u64")]
    pub per_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub total: Option<u64>,
    #[serde(default, alias = "lastPage", deserialize_with = "lenient::option_u64")]
    pub last_page: Option<u64>,
}

impl PartialMeta {
    /// Fills the fields missing here from `other`.
    pub fn or(self, other: PartialMeta) -> PartialMeta {
        PartialMeta {
            current_page: self.current_page.or(other.current_page),
            per_page: self.per_page.or(other.per_page),
            total: self.total.or(other.total),
            last_page: self.last_page.or(other.last_page),
        }
    }
}

/// The page a caller asked for. Normalization falls back to it when the
/// server does not say which page it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Builds a request, raising zero values to 1.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

/// A list response in any of the shapes the backend produces.
///
/// Variant order is the detection order: serde tries each shape in turn
/// and the first one that fits wins.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ListPayload<T> {
    /// `{ "data": [...], "current_page": .., "per_page": .., "total": .., "last_page": .. }`
    LengthAwarePage {
        #[serde(alias = "items")]
        data: Vec<T>,
        #[serde(alias = "currentPage", deserialize_with = "lenient::u64")]
        current_page: u64,
        #[serde(alias = "perPage", deserialize_with = "lenient::u64")]
        per_page: u64,
        #[serde(deserialize_with = "lenient::u64")]
        total: u64,
        #[serde(alias = "lastPage", deserialize_with = "lenient::u64")]
        last_page: u64,
    },
    /// `{ "data": [...], "meta": { .. } }`, `meta` optional. Counters sent
    /// beside `data` (simple paginators) land in `top`; `meta` wins over them.
    ResourceEnvelope {
        #[serde(alias = "items")]
        data: Vec<T>,
        #[serde(default)]
        meta: Option<PartialMeta>,
        #[serde(flatten)]
        top: PartialMeta,
    },
    /// `[...]`
    RawArray(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Short name of the detected shape, for logs.
    pub fn shape(&self) -> &'static str {
        match self {
            ListPayload::LengthAwarePage { .. } => "length-aware page",
            ListPayload::ResourceEnvelope { .. } => "resource envelope",
            ListPayload::RawArray(_) => "raw array",
        }
    }

    fn try_map_items<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<ListPayload<U>, E> {
        let map = |items: Vec<T>| items.into_iter().map(f).collect::<Result<Vec<U>, E>>();
        Ok(match self {
            ListPayload::LengthAwarePage {
                data,
                current_page,
                per_page,
                total,
                last_page,
            } => ListPayload::LengthAwarePage {
                data: map(data)?,
                current_page,
                per_page,
                total,
                last_page,
            },
            ListPayload::ResourceEnvelope { data, meta, top } => ListPayload::ResourceEnvelope {
                data: map(data)?,
                meta,
                top,
            },
            ListPayload::RawArray(data) => ListPayload::RawArray(map(data)?),
        })
    }
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Validates the shape of a decoded JSON body, then decodes its items.
    ///
    /// Bodies that fit none of the three shapes fail with
    /// [`Error::UnrecognizedPayload`]; a recognised shape whose items do not
    /// decode as `T` fails with [`Error::Decode`] naming the item index.
    pub fn decode(value: &Value) -> Result<Self, Error> {
        let shape = ListPayload::<Value>::deserialize(value)
            .map_err(|_| Error::UnrecognizedPayload(describe(value)))?;
        tracing::debug!("Detected list payload shape: {}", shape.shape());

        let mut index = 0usize;
        shape.try_map_items(|item| {
            let decoded = serde_json::from_value::<T>(item)
                .map_err(|e| Error::Decode(format!("item {}: {}", index, e)));
            index += 1;
            decoded
        })
    }
}

/// Uniform list result: the items plus reconciled pagination metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    /// An empty first page for the given request.
    pub fn empty(fallback: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            meta: PaginationMeta {
                current_page: fallback.page,
                per_page: fallback.per_page,
                total: 0,
                last_page: 1,
            },
        }
    }
}

/// The backend's standard body wrapper.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array with undecodable structure".to_string(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
    }
}

/// Deserializers for counters that some backends send as strings.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }

    impl NumberOrString {
        fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
            match self {
                NumberOrString::Number(n) => Ok(n),
                NumberOrString::Text(s) => s
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| E::custom(format!("expected a non-negative integer, got '{}'", s))),
            }
        }
    }

    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        NumberOrString::deserialize(deserializer)?.into_u64()
    }

    pub fn option_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(value) => value.into_u64().map(Some),
            None => Ok(None),
        }
    }
}
