//! DrawSession aggregate - the pool / history pair that survives reloads.
//!
//! # Invariants
//!
//! - Every candidate in pool, history or the pending slot belongs to the roster
//!   the session was created from (checked by size or fingerprint on restore)
//! - No candidate appears twice across pool, pending winner and history
//! - `pool + pending + history == roster size`; the pending slot is only
//!   occupied between the end of a spin and the operator's acknowledgement,
//!   so outside that window `pool + history == roster size`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Candidate, Roster, RosterFingerprint};
use crate::value_objects::RestorePolicy;
use crate::CandidateId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawSession {
    pool: Vec<Candidate>,
    /// Drawn but not yet acknowledged
    pending: Option<Candidate>,
    /// Most recent first
    history: Vec<Candidate>,
}

/// Why a persisted session could not be adopted for the live roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RestoreRejected {
    #[error("persisted session holds {persisted} candidates but the roster has {roster}")]
    SizeMismatch { persisted: usize, roster: usize },
    #[error("persisted session was drawn from a different roster")]
    FingerprintMismatch,
    #[error("candidate {id} appears more than once in the persisted session")]
    DuplicateCandidate { id: CandidateId },
}

impl DrawSession {
    /// A brand new session: everybody is in the pool, in roster order.
    pub fn fresh(roster: &Roster) -> Self {
        Self {
            pool: roster.candidates().to_vec(),
            pending: None,
            history: Vec::new(),
        }
    }

    /// Adopt a persisted session for `roster`.
    ///
    /// A persisted pending winner had already left the pool, so it is folded
    /// into the front of the history before validation: the draw happened,
    /// only the acknowledgement was lost.
    pub fn restore(
        pool: Vec<Candidate>,
        pending: Option<Candidate>,
        mut history: Vec<Candidate>,
        roster: &Roster,
        policy: RestorePolicy,
        persisted_fingerprint: Option<&RosterFingerprint>,
    ) -> Result<Self, RestoreRejected> {
        if let Some(winner) = pending {
            history.insert(0, winner);
        }

        let mut seen = HashSet::with_capacity(pool.len() + history.len());
        for candidate in pool.iter().chain(history.iter()) {
            if !seen.insert(candidate.id()) {
                return Err(RestoreRejected::DuplicateCandidate {
                    id: candidate.id().clone(),
                });
            }
        }

        let persisted = pool.len() + history.len();
        if persisted != roster.len() {
            return Err(RestoreRejected::SizeMismatch {
                persisted,
                roster: roster.len(),
            });
        }

        if policy == RestorePolicy::RosterFingerprint
            && persisted_fingerprint != Some(&roster.fingerprint())
        {
            return Err(RestoreRejected::FingerprintMismatch);
        }

        Ok(Self {
            pool,
            pending: None,
            history,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }

    #[inline]
    pub fn history(&self) -> &[Candidate] {
        &self.history
    }

    #[inline]
    pub fn pending(&self) -> Option<&Candidate> {
        self.pending.as_ref()
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn drawn(&self) -> usize {
        self.history.len() + usize::from(self.pending.is_some())
    }

    /// Total number of candidates accounted for by this session.
    pub fn total(&self) -> usize {
        self.pool.len() + self.drawn()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Move a candidate out of the pool into the pending slot.
    ///
    /// Returns `false` (and changes nothing) when the candidate is not in the
    /// pool or another winner is still pending.
    pub fn take(&mut self, id: &CandidateId) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match self.pool.iter().position(|c| c.id() == id) {
            Some(position) => {
                self.pending = Some(self.pool.remove(position));
                true
            }
            None => false,
        }
    }

    /// Record the pending winner at the front of the history.
    pub fn commit_pending(&mut self) -> Option<&Candidate> {
        let winner = self.pending.take()?;
        self.history.insert(0, winner);
        self.history.first()
    }
}
