//! Roster entity - the full candidate list supplied at session start.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Candidate;
use crate::error::DomainError;
use crate::value_objects::GroupTag;

/// Ordered list of candidates with unique ids.
///
/// # Invariants
///
/// - No two candidates share a `CandidateId`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    candidates: Vec<Candidate>,
}

impl Roster {
    /// Build a roster, preserving the provider's order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when two candidates share an id.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            if !seen.insert(candidate.id()) {
                return Err(DomainError::constraint(format!(
                    "duplicate candidate id: {}",
                    candidate.id()
                )));
            }
        }
        Ok(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Content hash over the sorted candidate ids. Insensitive to roster order.
    ///
    /// Each id is length-prefixed, so ids containing separators cannot collide.
    pub fn fingerprint(&self) -> RosterFingerprint {
        let mut ids: Vec<&str> = self.candidates.iter().map(|c| c.id().as_str()).collect();
        ids.sort_unstable();

        let mut hasher = Sha256::new();
        for id in ids {
            hasher.update((id.len() as u64).to_le_bytes());
            hasher.update(id.as_bytes());
        }
        RosterFingerprint(hex::encode(hasher.finalize()))
    }

    /// Number of candidates per group tag. Untagged candidates are not counted.
    pub fn group_counts(&self) -> BTreeMap<GroupTag, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.candidates.iter().flat_map(|c| c.groups()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl IntoIterator for Roster {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

/// Hex-encoded SHA-256 of a roster's ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterFingerprint(String);

impl RosterFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RosterFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
