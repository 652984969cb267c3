//! Serde helpers that render timestamps as ISO-8601 strings.
//!
//! Values are written with millisecond precision and a `Z` suffix
//! (`2026-10-19T08:15:00.000Z`) so that lexical and chronological order
//! agree when adapters sort on serialised fields.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serializer};

/// Reads the clock at the precision timestamps are persisted with.
///
/// Truncating here keeps serialise-then-deserialise lossless.
#[must_use]
pub fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(3)
}

/// Formats a timestamp in the canonical boundary representation.
#[must_use]
pub fn format(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse<E: serde::de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(E::custom)
}

/// Serialises a timestamp as an ISO-8601 string.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*value))
}

/// Deserialises a timestamp from an RFC 3339 string.
///
/// # Errors
///
/// Fails when the input is not a valid RFC 3339 timestamp.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw)
}

/// Variants of the helpers for optional timestamps.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialises an optional timestamp, writing `null` when absent.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format(*timestamp)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialises an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a present value is not a valid RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw))
            .transpose()
    }
}
