use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How a persisted draw session is matched against the live roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Pool + history size must equal the roster size. Two different rosters
    /// of the same size are treated as the same session.
    #[default]
    RosterSize,
    /// Size check plus an exact match of the roster fingerprint.
    RosterFingerprint,
}

impl std::fmt::Display for RestorePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestorePolicy::RosterSize => write!(f, "roster_size"),
            RestorePolicy::RosterFingerprint => write!(f, "roster_fingerprint"),
        }
    }
}

impl std::str::FromStr for RestorePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roster_size" | "rostersize" | "size" => Ok(RestorePolicy::RosterSize),
            "roster_fingerprint" | "rosterfingerprint" | "fingerprint" => {
                Ok(RestorePolicy::RosterFingerprint)
            }
            other => Err(DomainError::parse(format!(
                "Unknown restore policy: {}",
                other
            ))),
        }
    }
}
