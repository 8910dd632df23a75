//! Persisted session record.
//!
//! Pool, pending winner and history are written together as one JSON record
//! under a single key, so a reader never sees a pool from one draw and a
//! history from another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use luckywheel_domain::{
    Candidate, DrawSession, RestorePolicy, RestoreRejected, Roster, RosterFingerprint,
};

use crate::infrastructure::ports::{SessionStore, StoreError};

/// Bumped whenever the record layout changes incompatibly.
pub const STORED_SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub version: u32,
    pub roster_size: usize,
    pub roster_fingerprint: RosterFingerprint,
    pub saved_at: DateTime<Utc>,
    pub pool: Vec<Candidate>,
    /// Drawn but not yet acknowledged when the record was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<Candidate>,
    /// Most recent first
    pub history: Vec<Candidate>,
}

/// Why a load started a fresh session instead of resuming one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FreshReason {
    #[error("no saved session")]
    NoSession,
    #[error("saved session could not be read: {0}")]
    Unreadable(String),
    #[error("saved session is malformed: {0}")]
    Malformed(String),
    #[error("saved session has unsupported version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Rejected(#[from] RestoreRejected),
}

impl FreshReason {
    /// True when a saved session existed but had to be thrown away.
    pub fn discarded_session(&self) -> bool {
        !matches!(self, Self::NoSession)
    }
}

impl StoredSession {
    pub fn capture(session: &DrawSession, roster: &Roster, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: STORED_SESSION_VERSION,
            roster_size: roster.len(),
            roster_fingerprint: roster.fingerprint(),
            saved_at,
            pool: session.pool().to_vec(),
            pending: session.pending().cloned(),
            history: session.history().to_vec(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(self).map_err(StoreError::serialization)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, FreshReason> {
        let record: Self =
            serde_json::from_slice(bytes).map_err(|e| FreshReason::Malformed(e.to_string()))?;
        if record.version != STORED_SESSION_VERSION {
            return Err(FreshReason::UnsupportedVersion(record.version));
        }
        Ok(record)
    }

    /// Adopt this record for `roster`, or explain why it does not fit.
    pub fn into_session(
        self,
        roster: &Roster,
        policy: RestorePolicy,
    ) -> Result<DrawSession, FreshReason> {
        DrawSession::restore(
            self.pool,
            self.pending,
            self.history,
            roster,
            policy,
            Some(&self.roster_fingerprint),
        )
        .map_err(FreshReason::from)
    }
}

/// Read and validate the session stored under `key`. Never writes.
pub fn restore_session(
    store: &dyn SessionStore,
    key: &str,
    roster: &Roster,
    policy: RestorePolicy,
) -> Result<DrawSession, FreshReason> {
    let bytes = store
        .read(key)
        .map_err(|e| FreshReason::Unreadable(e.to_string()))?
        .ok_or(FreshReason::NoSession)?;
    StoredSession::decode(&bytes)?.into_session(roster, policy)
}
