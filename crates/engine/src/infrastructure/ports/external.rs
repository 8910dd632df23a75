//! Ports for the engine's external collaborators.

use async_trait::async_trait;

use luckywheel_domain::Roster;

use super::error::{RosterError, StoreError};

/// Key-value store that keeps a draw session across reloads.
///
/// Values are opaque bytes; the engine owns the record format.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Source of the candidate list at session start.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn load(&self) -> Result<Roster, RosterError>;
}
