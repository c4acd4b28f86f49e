//! Serde adapters that store a scalar as its flag text.
//!
//! Use with `#[serde(with = "flagbind::text")]` on fields whose native serde
//! form differs from what a config file would spell, such as
//! [`std::time::Duration`]:
//!
//! ```
//! use std::time::Duration;
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Settings {
//!     #[serde(with = "flagbind::text")]
//!     timeout: Duration,
//! }
//!
//! let parsed: Settings = serde_json::from_str(r#"{"timeout":"1m30s"}"#).unwrap();
//! assert_eq!(parsed.timeout, Duration::from_secs(90));
//! ```

use serde::{Deserialize, Deserializer, Serializer, de};

use super::Scalar;

/// Serialize `value` using its flag formatting.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Scalar,
    S: Serializer,
{
    serializer.serialize_str(&value.format_scalar())
}

/// Deserialize a value from its flag text.
///
/// # Errors
///
/// Fails when the text is not a valid value of `T` or was ignored by a
/// lenient parser.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Scalar,
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    T::parse_scalar(&raw)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom(format!("invalid {} value '{raw}'", T::LABEL)))
}
