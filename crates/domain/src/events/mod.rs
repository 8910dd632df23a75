//! Domain Events
//!
//! Aggregate mutations return outcome enums describing what happened, so the
//! engine can log, persist and publish without inspecting aggregate internals.

pub mod wheel_events;

pub use wheel_events::*;
