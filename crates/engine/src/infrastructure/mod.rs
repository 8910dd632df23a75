//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod app_settings;
pub mod clock;
pub mod ports;
pub mod random;
pub mod roster_file;
pub mod scheduler;
pub mod session_store;
