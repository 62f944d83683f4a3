use thiserror::Error;

/// Errors raised before any case runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("The time unit '{0}' is not supported. Supported time units: s, ms, us, μs, ns")]
    UnsupportedTimeUnit(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
