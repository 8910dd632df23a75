//! Request payloads accepted by the engine.

mod roster;

pub use roster::{CandidateData, LoadRosterRequest};
