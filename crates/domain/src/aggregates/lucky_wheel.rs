//! LuckyWheel aggregate - the drawing state machine.
//!
//! ```text
//!            request_spin                finish_spin(epoch)
//!   IDLE ─────────────────▶ SPINNING ─────────────────────▶ REVEAL_PENDING
//!    ▲                                                          │
//!    │ acknowledge                               reveal(epoch)  │
//!    └──────────────────── SHOWING_RESULT ◀─────────────────────┘
//!
//!   reset / replace_session: any state ─▶ IDLE (epoch bumped)
//! ```
//!
//! The winner is chosen when the spin starts; the timed transitions only
//! move the already chosen winner through the pool and history. Every spin and
//! every reset bumps the `SpinEpoch`, and timed transitions must present the
//! epoch they were scheduled with, so a callback that outlives a reset does
//! nothing. Randomness is supplied by the caller as closures.

use serde::{Deserialize, Serialize};

use super::DrawSession;
use crate::entities::{Candidate, Roster};
use crate::events::{IgnoreReason, WheelUpdate};
use crate::value_objects::Rotation;

/// Phase of a single spin. Never persisted; a reload always starts `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawingState {
    #[default]
    Idle,
    Spinning,
    RevealPending,
    ShowingResult,
}

impl std::fmt::Display for DrawingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Spinning => write!(f, "SPINNING"),
            Self::RevealPending => write!(f, "REVEAL_PENDING"),
            Self::ShowingResult => write!(f, "SHOWING_RESULT"),
        }
    }
}

/// Generation counter guarding timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinEpoch(u64);

impl SpinEpoch {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SpinEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct LuckyWheel {
    roster: Roster,
    session: DrawSession,
    state: DrawingState,
    rotation: Rotation,
    /// Chosen at spin start, cleared on acknowledgement
    winner: Option<Candidate>,
    /// Pool as it looked when the current spin started
    frozen_candidates: Option<Vec<Candidate>>,
    epoch: SpinEpoch,
}

impl LuckyWheel {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// A wheel with a fresh session over `roster`.
    pub fn new(roster: Roster) -> Self {
        let session = DrawSession::fresh(&roster);
        Self::with_session(roster, session)
    }

    /// A wheel resuming a previously persisted session.
    pub fn with_session(roster: Roster, session: DrawSession) -> Self {
        Self {
            roster,
            session,
            state: DrawingState::Idle,
            rotation: Rotation::ZERO,
            winner: None,
            frozen_candidates: None,
            epoch: SpinEpoch::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn state(&self) -> DrawingState {
        self.state
    }

    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[inline]
    pub fn session(&self) -> &DrawSession {
        &self.session
    }

    #[inline]
    pub fn pool(&self) -> &[Candidate] {
        self.session.pool()
    }

    #[inline]
    pub fn history(&self) -> &[Candidate] {
        self.session.history()
    }

    /// Target rotation of the latest spin (monotonically increasing).
    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn winner(&self) -> Option<&Candidate> {
        self.winner.as_ref()
    }

    #[inline]
    pub fn epoch(&self) -> SpinEpoch {
        self.epoch
    }

    /// Candidates the selector should be drawn with: the frozen snapshot while
    /// a spin is in flight or being shown, otherwise the live pool.
    pub fn visual_candidates(&self) -> &[Candidate] {
        self.frozen_candidates
            .as_deref()
            .unwrap_or_else(|| self.session.pool())
    }

    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// IDLE → SPINNING.
    ///
    /// `pick_index` receives the pool length and must return an index in
    /// `[0, len)` (out-of-range values are clamped to the last slot);
    /// `full_turns` supplies the number of whole cosmetic turns.
    pub fn request_spin(
        &mut self,
        pick_index: impl FnOnce(usize) -> usize,
        full_turns: impl FnOnce() -> u32,
    ) -> WheelUpdate {
        if self.state != DrawingState::Idle {
            return WheelUpdate::ignored(IgnoreReason::NotIdle { state: self.state });
        }
        let len = self.session.remaining();
        if len == 0 {
            return WheelUpdate::ignored(IgnoreReason::EmptyPool);
        }

        let index = pick_index(len).min(len - 1);
        let visual = self.session.pool().to_vec();
        let winner = visual[index].clone();
        let target_rotation = self.rotation.spin_to(index, len, full_turns());

        self.rotation = target_rotation;
        self.winner = Some(winner.clone());
        self.frozen_candidates = Some(visual);
        self.state = DrawingState::Spinning;
        self.epoch = self.epoch.next();

        WheelUpdate::SpinStarted {
            winner,
            index,
            pool_size: len,
            target_rotation,
            epoch: self.epoch,
        }
    }

    /// SPINNING → REVEAL_PENDING. Removes the winner from the pool.
    pub fn finish_spin(&mut self, epoch: SpinEpoch) -> WheelUpdate {
        if let Some(ignored) = self.check_timed(epoch, DrawingState::Spinning) {
            return ignored;
        }
        let Some(winner) = self.winner.clone() else {
            return WheelUpdate::ignored(IgnoreReason::WrongState {
                expected: DrawingState::Spinning,
                actual: self.state,
            });
        };

        if !self.session.take(winner.id()) {
            return WheelUpdate::ignored(IgnoreReason::WrongState {
                expected: DrawingState::Spinning,
                actual: self.state,
            });
        }
        self.state = DrawingState::RevealPending;

        WheelUpdate::PoolUpdated {
            winner,
            remaining: self.session.remaining(),
        }
    }

    /// REVEAL_PENDING → SHOWING_RESULT.
    pub fn reveal(&mut self, epoch: SpinEpoch) -> WheelUpdate {
        if let Some(ignored) = self.check_timed(epoch, DrawingState::RevealPending) {
            return ignored;
        }
        let Some(winner) = self.winner.clone() else {
            return WheelUpdate::ignored(IgnoreReason::WrongState {
                expected: DrawingState::RevealPending,
                actual: self.state,
            });
        };
        self.state = DrawingState::ShowingResult;
        WheelUpdate::Revealed { winner }
    }

    /// SHOWING_RESULT → IDLE. Records the winner at the front of the history.
    pub fn acknowledge(&mut self) -> WheelUpdate {
        if self.state != DrawingState::ShowingResult {
            return WheelUpdate::ignored(IgnoreReason::WrongState {
                expected: DrawingState::ShowingResult,
                actual: self.state,
            });
        }

        let recorded = self.session.commit_pending().cloned();
        self.winner = None;
        self.frozen_candidates = None;
        self.state = DrawingState::Idle;

        match recorded {
            Some(winner) => WheelUpdate::WinnerRecorded {
                winner,
                drawn: self.session.history().len(),
            },
            None => WheelUpdate::ignored(IgnoreReason::WrongState {
                expected: DrawingState::ShowingResult,
                actual: DrawingState::Idle,
            }),
        }
    }

    /// Any state → IDLE with everybody back in the pool.
    ///
    /// The rotation is kept so the wheel keeps turning forward.
    pub fn reset(&mut self) -> WheelUpdate {
        let previous_state = self.state;
        self.session = DrawSession::fresh(&self.roster);
        self.clear_spin();
        WheelUpdate::Reset {
            previous_state,
            pool_size: self.session.remaining(),
        }
    }

    /// Swap in a new roster and session (roster reload). Behaves like a reset
    /// with respect to in-flight spins.
    pub fn replace_session(&mut self, roster: Roster, session: DrawSession) {
        self.roster = roster;
        self.session = session;
        self.clear_spin();
    }

    fn clear_spin(&mut self) {
        self.state = DrawingState::Idle;
        self.winner = None;
        self.frozen_candidates = None;
        self.epoch = self.epoch.next();
    }

    fn check_timed(&self, epoch: SpinEpoch, expected: DrawingState) -> Option<WheelUpdate> {
        if epoch != self.epoch {
            return Some(WheelUpdate::ignored(IgnoreReason::StaleEpoch));
        }
        if self.state != expected {
            return Some(WheelUpdate::ignored(IgnoreReason::WrongState {
                expected,
                actual: self.state,
            }));
        }
        None
    }
}
