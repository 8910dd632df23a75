//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Session persistence (browser storage, a JSON file, memory)
//! - Roster loading (document store export, a JSON file)
//! - Clock/Random/Scheduler (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{RosterProvider, SessionStore};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockRosterProvider, MockSessionStore};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{CancelHandle, ClockPort, RandomPort, ScheduledTask, SchedulerPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{RosterError, StoreError};
