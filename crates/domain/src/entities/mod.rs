//! Domain entities - Core business objects with identity

mod candidate;
mod roster;

pub use candidate::Candidate;
pub use roster::{Roster, RosterFingerprint};
