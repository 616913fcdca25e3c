//! Wire timestamps.
//!
//! The API encodes instants as Unix milliseconds in a bare JSON integer.
//! Serialization writes full millisecond precision; parsing keeps whole
//! seconds only, so a round trip truncates to the second. A JSON `null`
//! (an instant that never happened, such as the last call of an unused
//! token) parses as the Unix epoch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// An instant as exchanged with the nimbusec API.
///
/// ## Examples
///
/// ```rust
/// use nimbusec::Timestamp;
///
/// let ts: Timestamp = serde_json::from_str("1500000000123").unwrap();
/// assert_eq!(ts.as_millis(), 1_500_000_000_000);
/// assert_eq!(serde_json::to_string(&ts).unwrap(), "1500000000000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Builds a timestamp from Unix milliseconds, keeping millisecond precision.
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Returns Unix milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the underlying `chrono` value.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MillisVisitor)
    }
}

struct MillisVisitor;

impl MillisVisitor {
    fn truncate<E: de::Error>(millis: i64) -> Result<Timestamp, E> {
        DateTime::from_timestamp(millis.div_euclid(1000), 0)
            .map(Timestamp)
            .ok_or_else(|| E::custom(format!("timestamp {millis} out of range")))
    }
}

impl Visitor<'_> for MillisVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unix time in milliseconds as an integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        Self::truncate(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let millis = i64::try_from(value)
            .map_err(|_| E::custom(format!("timestamp {value} out of range")))?;
        Self::truncate(millis)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::default())
    }
}
