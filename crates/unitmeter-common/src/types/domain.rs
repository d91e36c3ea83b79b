//! Counter domains
//!
//! Every quantity tracked by a counter belongs to exactly one domain, each
//! with its own canonical base unit:
//! - Time: seconds
//! - Data: bytes
//! - Discrete: units (events, downloads, ...)

use crate::error::CounterError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Measurement domain of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CounterDomain {
    /// Elapsed time, stored as seconds
    #[serde(rename = "TIME")]
    Time,
    /// Data volume, stored as bytes
    #[serde(rename = "DATA")]
    Data,
    /// Discrete event counts, stored as units
    #[default]
    #[serde(rename = "UNIT")]
    Discrete,
}

impl CounterDomain {
    /// All recognized domains
    pub const ALL: [CounterDomain; 3] = [
        CounterDomain::Time,
        CounterDomain::Data,
        CounterDomain::Discrete,
    ];

    /// Persisted tag for this domain
    pub fn tag(&self) -> &'static str {
        match self {
            CounterDomain::Time => "TIME",
            CounterDomain::Data => "DATA",
            CounterDomain::Discrete => "UNIT",
        }
    }

    /// Name of the canonical base unit
    pub fn base_unit(&self) -> &'static str {
        match self {
            CounterDomain::Time => "seconds",
            CounterDomain::Data => "bytes",
            CounterDomain::Discrete => "units",
        }
    }
}

impl std::fmt::Display for CounterDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CounterDomain {
    type Err = CounterError;

    /// Tags are matched exactly; anything else is an `InvalidDomain`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        CounterDomain::ALL
            .into_iter()
            .find(|domain| domain.tag() == tag)
            .ok_or_else(|| CounterError::InvalidDomain(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for domain in CounterDomain::ALL {
            assert_eq!(domain.tag().parse::<CounterDomain>(), Ok(domain));
        }
    }

    #[test]
    fn test_unknown_tag_is_invalid() {
        assert_eq!(
            "VOLUME".parse::<CounterDomain>(),
            Err(CounterError::InvalidDomain("VOLUME".to_string()))
        );
        // Tags are case sensitive
        assert!("time".parse::<CounterDomain>().is_err());
    }

    #[test]
    fn test_default_is_discrete() {
        assert_eq!(CounterDomain::default(), CounterDomain::Discrete);
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&CounterDomain::Discrete).unwrap();
        assert_eq!(json, "\"UNIT\"");
        let domain: CounterDomain = serde_json::from_str("\"DATA\"").unwrap();
        assert_eq!(domain, CounterDomain::Data);
    }
}
