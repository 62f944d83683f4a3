use crate::error::HarnessError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Unit elapsed times are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeUnit {
    #[serde(rename = "s")]
    Seconds,
    #[default]
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "μs")]
    Micros,
    #[serde(rename = "ns")]
    Nanos,
}

impl TimeUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "μs",
            TimeUnit::Nanos => "ns",
        }
    }

    /// Express `elapsed` in this unit.
    #[must_use]
    pub fn scale(self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        match self {
            TimeUnit::Seconds => secs,
            TimeUnit::Millis => secs * 1e3,
            TimeUnit::Micros => secs * 1e6,
            TimeUnit::Nanos => secs * 1e9,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "ms" => Ok(TimeUnit::Millis),
            // "us" is the ASCII spelling of μs
            "us" | "μs" => Ok(TimeUnit::Micros),
            "ns" => Ok(TimeUnit::Nanos),
            other => Err(HarnessError::UnsupportedTimeUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
