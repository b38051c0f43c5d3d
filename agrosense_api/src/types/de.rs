//! Field deserializers tolerant of the loose typing Laravel backends emit.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `true`/`false`, `1`/`0` and `"1"`/`"0"`/`"true"`/`"false"`.
pub fn bool_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => Ok(b),
        Loose::Int(0) => Ok(false),
        Loose::Int(1) => Ok(true),
        Loose::Text(s) => match s.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(D::Error::custom(format!("expected a boolean, got '{}'", other))),
        },
        _ => Err(D::Error::custom("expected a boolean")),
    }
}

/// [`bool_lenient`] for optional fields; `null` yields `None`.
pub fn option_bool_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "bool_lenient")] bool);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(b)| b))
}

/// Accepts a JSON number or a decimal string.
pub fn f64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Int(n) => Ok(n as f64),
        Loose::Float(n) => Ok(n),
        Loose::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
        Loose::Bool(_) => Err(D::Error::custom("expected a number, got a boolean")),
    }
}

/// Accepts a string or an integer and yields its string form.
pub fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Text(s) => Ok(s),
        Loose::Int(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected a string or integer id")),
    }
}
