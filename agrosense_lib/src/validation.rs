use chrono::NaiveDate;
use agrosense_api::types::{ControlUnitStatus, ParcelStatus};

use crate::error::AgroSenseError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_SORT_LENGTH: usize = 40;
pub const MAX_SENSOR_TYPE_LENGTH: usize = 40;
/// Largest page size the backend accepts (selector lookups use it).
pub const MAX_PER_PAGE: u64 = 200;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AgroSenseError> {
    if input.len() > max_len {
        return Err(AgroSenseError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AgroSenseError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a free-text search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, AgroSenseError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: u64) -> Result<u64, AgroSenseError> {
    if page < 1 {
        return Err(AgroSenseError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate page size (must be 1..=200).
pub fn validate_per_page(per_page: u64) -> Result<u64, AgroSenseError> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(AgroSenseError::InvalidInput(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }
    Ok(per_page)
}

/// Validate a record id (must be positive).
pub fn validate_id(id: i64) -> Result<i64, AgroSenseError> {
    if id < 1 {
        return Err(AgroSenseError::InvalidInput(format!(
            "id must be a positive integer, got {}",
            id
        )));
    }
    Ok(id)
}

/// Validate a parcel status filter: all, active, inactive.
pub fn validate_parcel_status(input: &str) -> Result<ParcelStatus, AgroSenseError> {
    match input.trim().to_lowercase().as_str() {
        "all" => Ok(ParcelStatus::All),
        "active" => Ok(ParcelStatus::Active),
        "inactive" => Ok(ParcelStatus::Inactive),
        _ => Err(AgroSenseError::InvalidInput(format!(
            "unknown parcel status '{}'. Valid values: all, active, inactive",
            input
        ))),
    }
}

/// Validate a control unit status filter. `all` yields `None`.
pub fn validate_control_unit_status(
    input: &str,
) -> Result<Option<ControlUnitStatus>, AgroSenseError> {
    match input.trim().to_lowercase().as_str() {
        "all" => Ok(None),
        "online" => Ok(Some(ControlUnitStatus::Online)),
        "offline" => Ok(Some(ControlUnitStatus::Offline)),
        "maintenance" => Ok(Some(ControlUnitStatus::Maintenance)),
        _ => Err(AgroSenseError::InvalidInput(format!(
            "unknown control unit status '{}'. Valid values: all, online, offline, maintenance",
            input
        ))),
    }
}

/// Validate an active/inactive filter. `all` yields `None`.
pub fn validate_active_filter(input: &str) -> Result<Option<bool>, AgroSenseError> {
    match input.trim().to_lowercase().as_str() {
        "all" => Ok(None),
        "1" | "true" | "yes" | "active" => Ok(Some(true)),
        "0" | "false" | "no" | "inactive" => Ok(Some(false)),
        _ => Err(AgroSenseError::InvalidInput(format!(
            "unknown active filter '{}'. Valid values: all, 1, 0",
            input
        ))),
    }
}

/// Validate a sensor type filter: lowercase letters, digits, `-` and `_`.
/// `all` yields `None`.
pub fn validate_sensor_type(input: &str) -> Result<Option<String>, AgroSenseError> {
    let lower = sanitize_text(input, MAX_SENSOR_TYPE_LENGTH)?.to_lowercase();
    if lower == "all" {
        return Ok(None);
    }
    if !lower
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AgroSenseError::InvalidInput(format!(
            "invalid sensor type '{}'. Use letters, digits, '-' or '_' (e.g. dht22, ds18b20)",
            input
        )));
    }
    Ok(Some(lower))
}

/// Validate a sort key: a field name with an optional leading `-` for descending.
pub fn validate_sort(input: &str) -> Result<String, AgroSenseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_SORT_LENGTH {
        return Err(AgroSenseError::InvalidInput(format!(
            "sort must be 1 to {} characters",
            MAX_SORT_LENGTH
        )));
    }
    let field = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if field.is_empty()
        || !field
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(AgroSenseError::InvalidInput(format!(
            "invalid sort '{}'. Expected a field name such as name or -created_at",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a YYYY-MM-DD date string.
pub fn validate_date(input: &str) -> Result<NaiveDate, AgroSenseError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        AgroSenseError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

/// Validate an optional date range; both bounds are inclusive and either may be open.
pub fn validate_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AgroSenseError> {
    let from = from.map(validate_date).transpose()?;
    let to = to.map(validate_date).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            return Err(AgroSenseError::InvalidInput(format!(
                "date range start {} is after end {}",
                f, t
            )));
        }
    }
    Ok((from, to))
}

/// Parse a JSON object from user input into a write form.
pub fn parse_form<T: serde::de::DeserializeOwned>(input: &str) -> Result<T, AgroSenseError> {
    let value: serde_json::Value = serde_json::from_str(input.trim())?;
    if !value.is_object() {
        return Err(AgroSenseError::InvalidInput(
            "form data must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}
