//! Control unit records returned by the `/control-units` endpoints.

use serde::{Deserialize, Serialize};

use super::ParcelID;

/// Unique identifier for a control unit.
pub type ControlUnitID = i64;

/// A field gateway that relays sensor readings over MQTT.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControlUnit {
    pub id: ControlUnitID,

    /// Manufacturer serial, unique per unit.
    pub serial_code: String,

    pub model: String,

    /// Installation date (ISO 8601).
    #[serde(default)]
    pub installed_at: Option<String>,

    pub status: ControlUnitStatus,

    /// Parcel the unit is installed on.
    pub parcel_id: ParcelID,

    /// MQTT client identifier the unit connects with.
    pub mqtt_client_id: String,

    #[serde(default)]
    pub mqtt_username: Option<String>,

    /// Topic the unit publishes its status on.
    #[serde(default)]
    pub status_topic: Option<String>,

    /// Last-will topic.
    #[serde(default)]
    pub lwt_topic: Option<String>,

    /// Last time the broker saw the unit (ISO 8601).
    #[serde(default)]
    pub last_seen_at: Option<String>,

    #[serde(deserialize_with = "crate::types::de::bool_lenient")]
    pub active: bool,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Writable control unit fields for create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ControlUnitForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ControlUnitStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_id: Option<ParcelID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_username: Option<String>,
    /// Plain-text MQTT password; the backend stores it encrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lwt_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Minimal control unit shape used to populate selectors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControlUnitOption {
    pub id: ControlUnitID,
    pub serial_code: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Connectivity state reported for a control unit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlUnitStatus {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "offline")]
    Offline,
    #[serde(rename = "maintenance")]
    Maintenance,
}
impl std::fmt::Display for ControlUnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ControlUnitStatus::Online => "online",
                ControlUnitStatus::Offline => "offline",
                ControlUnitStatus::Maintenance => "maintenance",
            }
        )
    }
}
