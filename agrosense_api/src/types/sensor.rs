//! Sensor records returned by the `/sensors` endpoints.

use serde::{Deserialize, Serialize};

use super::ControlUnitID;

/// Unique identifier for a sensor.
pub type SensorID = i64;

/// A probe attached to a control unit (e.g. `dht22`, `ds18b20`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: SensorID,

    pub name: String,

    /// Hardware model string as registered by the operator.
    #[serde(rename = "type")]
    pub sensor_type: String,

    /// Control unit the sensor reports through.
    pub control_unit_id: ControlUnitID,

    #[serde(deserialize_with = "crate::types::de::bool_lenient")]
    pub active: bool,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Writable sensor fields for create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SensorForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_unit_id: Option<ControlUnitID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
