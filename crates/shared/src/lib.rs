//! Lucky Wheel Shared - wire types for the engine's HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde plus the domain vocabulary
//! 2. **No business logic** - pure data types and conversions
//! 3. **Raw identifiers** - DTOs carry plain strings, validated on the way in

pub mod requests;
pub mod responses;

pub use requests::{CandidateData, LoadRosterRequest};
pub use responses::{
    ColorBandData, GroupCountData, LoadRosterResponse, SpinResponse, WheelStateResponse,
};
