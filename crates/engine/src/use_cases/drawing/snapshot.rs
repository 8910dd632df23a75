//! Observable wheel state handed to the presentation layer.

use luckywheel_domain::{
    Candidate, DrawingState, IgnoreReason, LuckyWheel, Rotation, SpinEpoch,
};

/// Point-in-time copy of the wheel, detached from the engine's lock.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSnapshot {
    pub state: DrawingState,
    pub rotation: Rotation,
    pub pool: Vec<Candidate>,
    /// Most recent first
    pub history: Vec<Candidate>,
    pub visual_candidates: Vec<Candidate>,
    /// Chosen winner of the current spin, including before the reveal
    pub winner: Option<Candidate>,
    pub remaining: usize,
    /// History plus a drawn winner awaiting acknowledgement
    pub drawn: usize,
    pub roster_size: usize,
    pub epoch: SpinEpoch,
    pub message: Option<String>,
}

impl WheelSnapshot {
    pub fn capture(wheel: &LuckyWheel) -> Self {
        let session = wheel.session();
        let message = (wheel.state() == DrawingState::Idle && wheel.is_exhausted())
            .then(|| IgnoreReason::EmptyPool.to_string());

        Self {
            state: wheel.state(),
            rotation: wheel.rotation(),
            pool: wheel.pool().to_vec(),
            history: wheel.history().to_vec(),
            visual_candidates: wheel.visual_candidates().to_vec(),
            winner: wheel.winner().cloned(),
            remaining: session.remaining(),
            drawn: session.drawn(),
            roster_size: wheel.roster().len(),
            epoch: wheel.epoch(),
            message,
        }
    }

    /// The winner once it may be shown to the audience.
    pub fn revealed_winner(&self) -> Option<&Candidate> {
        match self.state {
            DrawingState::ShowingResult => self.winner.as_ref(),
            _ => None,
        }
    }
}

impl Default for WheelSnapshot {
    fn default() -> Self {
        Self::capture(&LuckyWheel::new(Default::default()))
    }
}
