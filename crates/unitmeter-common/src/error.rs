//! Error types for Unitmeter
//!
//! Provides a unified error type and the per-concern error variants.
//! Counter errors are contract violations by the caller; store errors come
//! from whatever backs the conversion factor table.

use crate::types::domain::CounterDomain;
use thiserror::Error;

/// Result type alias using MeterError
pub type Result<T> = std::result::Result<T, MeterError>;

/// Unified error type for Unitmeter operations
#[derive(Debug, Error)]
pub enum MeterError {
    // Counter contract violations
    #[error("Counter error: {0}")]
    Counter(#[from] CounterError),

    // Conversion factor store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Unit counter errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("Unknown counter type: {0}")]
    InvalidDomain(String),

    #[error("Can't {operation} on a {actual} counter (requires {expected})")]
    DomainMismatch {
        operation: &'static str,
        expected: CounterDomain,
        actual: CounterDomain,
    },

    #[error("Can't add a {other} counter to a {current} counter")]
    IncompatibleCounters {
        current: CounterDomain,
        other: CounterDomain,
    },

    #[error("Unrecognized counter text: {0:?}")]
    UnrecognizedFormat(String),

    #[error("Invalid counter magnitude: {0:?}")]
    InvalidMagnitude(String),
}

/// Conversion factor store errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Factor store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed factor row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Factor store I/O failed: {0}")]
    Io(String),
}

impl From<serde_json::Error> for MeterError {
    fn from(err: serde_json::Error) -> Self {
        MeterError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for MeterError {
    fn from(err: std::io::Error) -> Self {
        MeterError::Store(StoreError::Io(err.to_string()))
    }
}

impl From<config::ConfigError> for MeterError {
    fn from(err: config::ConfigError) -> Self {
        MeterError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for MeterError {
    fn from(err: anyhow::Error) -> Self {
        MeterError::Internal(err.to_string())
    }
}
