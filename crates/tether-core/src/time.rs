//! Time values as the wire carries them: plain JSON numbers of seconds.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// An absolute wall-clock moment, wire-encoded as fractional seconds
/// since the Unix epoch.
///
/// Round-trips are exact modulo floating-point rounding: a 64-bit float
/// holds sub-microsecond precision for contemporary epoch offsets, and
/// callers must not depend on more than that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSinceEpoch(pub DateTime<Utc>);

impl From<DateTime<Utc>> for TimeSinceEpoch {
    fn from(t: DateTime<Utc>) -> Self {
        Self(t)
    }
}

impl Serialize for TimeSinceEpoch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let secs =
            self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) / 1e9;
        serializer.serialize_f64(secs)
    }
}

impl<'de> Deserialize<'de> for TimeSinceEpoch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(de::Error::custom(format!(
                "epoch seconds must be finite, got {secs}"
            )));
        }
        Ok(Self(DateTime::from_timestamp_nanos((secs * 1e9) as i64)))
    }
}

/// Elapsed time since an arbitrary origin, wire-encoded as fractional
/// seconds. No epoch anchor, no calendar semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicTime(pub Duration);

impl From<Duration> for MonotonicTime {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl MonotonicTime {
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Serialize for MonotonicTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0.as_secs_f64())
    }
}

impl<'de> Deserialize<'de> for MonotonicTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        // A Duration cannot represent negative or non-finite spans.
        Duration::try_from_secs_f64(secs)
            .map(Self)
            .map_err(de::Error::custom)
    }
}
