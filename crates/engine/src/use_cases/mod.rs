//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod drawing;

pub use drawing::{DrawingConfig, DrawingEngine, LoadOutcome, WheelSnapshot};
