//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations

pub mod draw_session;
pub mod lucky_wheel;

pub use draw_session::{DrawSession, RestoreRejected};
pub use lucky_wheel::{DrawingState, LuckyWheel, SpinEpoch};
