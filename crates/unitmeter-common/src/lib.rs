//! # Unitmeter Common
//!
//! Shared errors, domain tags and value parsing for Unitmeter.
//!
//! ## Core Types
//!
//! - [`CounterDomain`]: TIME / DATA / UNIT measurement domains
//! - [`MeterError`]: unified error type, with [`CounterError`] and [`StoreError`]
//!
//! ## Parsing
//!
//! - [`parsing::ValueParser`]: default-on-failure field parsing
//! - [`parsing::LocaleParser`]: en_US implementation

pub mod error;
pub mod parsing;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CounterError, MeterError, Result, StoreError};
pub use parsing::{LocaleParser, ValueParser};
pub use types::domain::CounterDomain;

/// Unitmeter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds per minute
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds per hour
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Bytes per kilobyte (binary multiples throughout)
pub const BYTES_PER_KB: i64 = 1024;
