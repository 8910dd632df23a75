//! Wheel mutation outcomes.

use serde::{Deserialize, Serialize};

use crate::aggregates::{DrawingState, SpinEpoch};
use crate::entities::Candidate;
use crate::value_objects::Rotation;

/// Outcome of a wheel transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WheelUpdate {
    #[serde(rename_all = "camelCase")]
    SpinStarted {
        winner: Candidate,
        index: usize,
        pool_size: usize,
        target_rotation: Rotation,
        epoch: SpinEpoch,
    },
    PoolUpdated { winner: Candidate, remaining: usize },
    Revealed { winner: Candidate },
    WinnerRecorded { winner: Candidate, drawn: usize },
    #[serde(rename_all = "camelCase")]
    Reset {
        previous_state: DrawingState,
        pool_size: usize,
    },
    Ignored { reason: IgnoreReason },
}

/// Why a transition request had no effect. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IgnoreReason {
    /// Nobody left to draw
    EmptyPool,
    /// A spin was requested while a previous one is still running or shown
    NotIdle { state: DrawingState },
    WrongState {
        expected: DrawingState,
        actual: DrawingState,
    },
    /// A timed transition scheduled before a reset or a newer spin
    StaleEpoch,
}

impl WheelUpdate {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }

    pub fn ignored(reason: IgnoreReason) -> Self {
        Self::Ignored { reason }
    }

    /// True for transitions that change pool or history.
    pub fn mutates_session(&self) -> bool {
        matches!(
            self,
            Self::PoolUpdated { .. } | Self::WinnerRecorded { .. } | Self::Reset { .. }
        )
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPool => write!(f, "no one left to draw"),
            Self::NotIdle { state } => write!(f, "wheel is busy ({state})"),
            Self::WrongState { expected, actual } => {
                write!(f, "expected {expected}, wheel is {actual}")
            }
            Self::StaleEpoch => write!(f, "stale spin callback"),
        }
    }
}
