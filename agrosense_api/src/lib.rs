//! Typed client for the AgroSense field-monitoring REST API.
//!
//! List endpoints may answer with a bare array, a resource envelope, or a
//! length-aware paginator; [`normalize`] reconciles all three into one
//! [`types::Paginated`] shape.

mod client;
mod errors;
pub mod normalize;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::normalize::{last_page_for, normalize};
pub use self::query::{
    ControlUnitQuery, ParcelQuery, Query, QueryCommon, SensorQuery, DEFAULT_PARCEL_SORT,
};
