//! Roster loaded from a JSON export of the staff list.

use std::path::PathBuf;

use async_trait::async_trait;

use luckywheel_domain::Roster;
use luckywheel_shared::{CandidateData, LoadRosterRequest};

use crate::infrastructure::ports::{RosterError, RosterProvider};

/// Reads `[{"id": .., "name": .., "groups": [..]}]` from a file.
pub struct JsonRosterProvider {
    path: PathBuf,
}

impl JsonRosterProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterProvider for JsonRosterProvider {
    async fn load(&self) -> Result<Roster, RosterError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RosterError::Io(format!("{}: {e}", self.path.display())))?;
        let candidates: Vec<CandidateData> =
            serde_json::from_str(&data).map_err(|e| RosterError::Parse(e.to_string()))?;

        let roster = LoadRosterRequest { candidates }.into_roster()?;
        tracing::info!(path = ?self.path, candidates = roster.len(), "Roster loaded from file");
        Ok(roster)
    }
}
