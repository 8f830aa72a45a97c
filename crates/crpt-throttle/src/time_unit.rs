use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Unit of time a request limit is expressed in ("10 requests per second").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[serde(alias = "nanoseconds", alias = "ns")]
    Nanosecond,
    #[serde(alias = "microseconds", alias = "us")]
    Microsecond,
    #[serde(alias = "milliseconds", alias = "ms")]
    Millisecond,
    #[serde(alias = "seconds", alias = "s")]
    Second,
    #[serde(alias = "minutes", alias = "m")]
    Minute,
    #[serde(alias = "hours", alias = "h")]
    Hour,
    #[serde(alias = "days", alias = "d")]
    Day,
}

impl TimeUnit {
    /// Length of one unit, truncated to whole milliseconds.
    ///
    /// Sub-millisecond units yield 0.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        match self {
            Self::Nanosecond | Self::Microsecond => 0,
            Self::Millisecond => 1,
            Self::Second => 1_000,
            Self::Minute => 60_000,
            Self::Hour => 3_600_000,
            Self::Day => 86_400_000,
        }
    }

    /// Length of one unit.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        match self {
            Self::Nanosecond => Duration::from_nanos(1),
            Self::Microsecond => Duration::from_micros(1),
            _ => Duration::from_millis(self.as_millis()),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nanosecond => "nanosecond",
            Self::Microsecond => "microsecond",
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nanosecond" | "nanoseconds" | "ns" => Ok(Self::Nanosecond),
            "microsecond" | "microseconds" | "us" => Ok(Self::Microsecond),
            "millisecond" | "milliseconds" | "ms" => Ok(Self::Millisecond),
            "second" | "seconds" | "s" => Ok(Self::Second),
            "minute" | "minutes" | "m" => Ok(Self::Minute),
            "hour" | "hours" | "h" => Ok(Self::Hour),
            "day" | "days" | "d" => Ok(Self::Day),
            other => Err(format!("unknown time unit: {other}")),
        }
    }
}
