//! Parcel records returned by the `/parcels` endpoints.

use serde::{Deserialize, Serialize};

/// Unique identifier for a parcel.
pub type ParcelID = i64;

/// A field or plot under monitoring.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parcel {
    pub id: ParcelID,

    pub name: String,

    /// Free-text location description (village, sector, ...).
    #[serde(default)]
    pub location: Option<String>,

    /// Surface in square metres. Some backends send it as a decimal string.
    #[serde(deserialize_with = "crate::types::de::f64_lenient")]
    pub area_m2: f64,

    /// Owning user, when the parcel is assigned.
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub crop_type: Option<String>,

    #[serde(deserialize_with = "crate::types::de::bool_lenient")]
    pub active: bool,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Writable parcel fields for create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ParcelForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Minimal parcel shape used to populate selectors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParcelOption {
    pub id: ParcelID,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "crate::types::de::option_bool_lenient")]
    pub active: Option<bool>,
}

impl From<Parcel> for ParcelOption {
    fn from(val: Parcel) -> Self {
        ParcelOption {
            id: val.id,
            name: val.name,
            location: val.location,
            active: Some(val.active),
        }
    }
}

/// Parcel status filter accepted by the list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParcelStatus {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "inactive")]
    Inactive,
}
impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ParcelStatus::All => "all",
                ParcelStatus::Active => "active",
                ParcelStatus::Inactive => "inactive",
            }
        )
    }
}
