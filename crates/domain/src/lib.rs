//! Lucky Wheel domain.
//!
//! Pure types for the staff prize drawing: candidates and rosters, the
//! persisted draw session and the wheel state machine. No I/O, no clocks and
//! no random source live here; the engine injects those.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{DrawSession, DrawingState, LuckyWheel, RestoreRejected, SpinEpoch};
pub use entities::{Candidate, Roster, RosterFingerprint};
pub use error::DomainError;
pub use events::{IgnoreReason, WheelUpdate};
pub use ids::CandidateId;
pub use value_objects::{
    CandidateName, ColorBand, ColorBands, GroupTag, RestorePolicy, Rotation, FULL_TURN,
};
