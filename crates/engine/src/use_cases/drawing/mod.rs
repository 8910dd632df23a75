//! Drawing engine - runs the lucky wheel against its ports.
//!
//! Owns the [`LuckyWheel`] behind a mutex, drives its timed transitions
//! through the [`SchedulerPort`], keeps the session in the [`SessionStore`]
//! and broadcasts a [`WheelSnapshot`] after every change.
//!
//! Persistence contract:
//! - the record is written when the winner leaves the pool and again when
//!   the winner is acknowledged
//! - reset removes the record
//! - loading a roster only reads
//!
//! Store failures are logged and swallowed. The in-memory session stays
//! authoritative.

mod persistence;
mod snapshot;

#[cfg(test)]
mod engine_tests;

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::watch;

use luckywheel_domain::{
    ColorBands, DrawSession, GroupTag, LuckyWheel, RestorePolicy, Roster, SpinEpoch, WheelUpdate,
};

use crate::infrastructure::app_settings::WheelSettings;
use crate::infrastructure::ports::{
    CancelHandle, ClockPort, RandomPort, SchedulerPort, SessionStore,
};

pub use persistence::{restore_session, FreshReason, StoredSession};
pub use snapshot::WheelSnapshot;

/// Tunables the engine needs from [`WheelSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConfig {
    pub spin_duration: Duration,
    pub reveal_delay: Duration,
    pub min_full_turns: u32,
    pub max_full_turns: u32,
    pub max_color_bands: usize,
    pub palette_size: usize,
    pub restore_policy: RestorePolicy,
    pub session_key: String,
}

impl From<&WheelSettings> for DrawingConfig {
    fn from(settings: &WheelSettings) -> Self {
        Self {
            spin_duration: settings.spin_duration,
            reveal_delay: settings.reveal_delay,
            min_full_turns: settings.min_full_turns,
            max_full_turns: settings.max_full_turns,
            max_color_bands: settings.max_color_bands,
            palette_size: settings.palette_size,
            restore_policy: settings.restore_policy,
            session_key: settings.session_key.clone(),
        }
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self::from(&WheelSettings::default())
    }
}

/// Result of [`DrawingEngine::load_roster`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The saved session matched the roster and was resumed
    Restored,
    /// Everybody starts in the pool
    Fresh(FreshReason),
}

impl LoadOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored)
    }
}

#[derive(Debug, Clone, Copy)]
enum TimedStep {
    FinishSpin,
    Reveal,
}

struct EngineInner {
    wheel: Mutex<LuckyWheel>,
    /// Handle of the next timed transition, if one is scheduled
    timer: Mutex<Option<CancelHandle>>,
    store: Arc<dyn SessionStore>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    scheduler: Arc<dyn SchedulerPort>,
    config: DrawingConfig,
    updates: watch::Sender<WheelSnapshot>,
}

/// Cheap to clone; all clones drive the same wheel.
#[derive(Clone)]
pub struct DrawingEngine {
    inner: Arc<EngineInner>,
}

impl DrawingEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        scheduler: Arc<dyn SchedulerPort>,
        config: DrawingConfig,
    ) -> Self {
        let wheel = LuckyWheel::new(Roster::default());
        let (updates, _) = watch::channel(WheelSnapshot::capture(&wheel));
        Self {
            inner: Arc::new(EngineInner {
                wheel: Mutex::new(wheel),
                timer: Mutex::new(None),
                store,
                random,
                clock,
                scheduler,
                config,
                updates,
            }),
        }
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.inner.config
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Install `roster`, resuming the saved session when it fits.
    ///
    /// Any spin in flight is abandoned. A saved session that does not fit is
    /// left in the store untouched; the first draw overwrites it.
    pub fn load_roster(&self, roster: Roster) -> LoadOutcome {
        let inner = &self.inner;
        // Read under the wheel lock so a timed write cannot land in between.
        let mut wheel = inner.lock_wheel();
        inner.cancel_timer();
        let restored = restore_session(
            inner.store.as_ref(),
            &inner.config.session_key,
            &roster,
            inner.config.restore_policy,
        );

        let outcome = match restored {
            Ok(session) => {
                tracing::info!(
                    roster_size = roster.len(),
                    remaining = session.remaining(),
                    drawn = session.drawn(),
                    "Resumed saved draw session"
                );
                wheel.replace_session(roster, session);
                LoadOutcome::Restored
            }
            Err(reason) => {
                if reason.discarded_session() {
                    tracing::info!(reason = %reason, "Discarding saved draw session");
                }
                tracing::info!(roster_size = roster.len(), "Starting fresh draw session");
                let session = DrawSession::fresh(&roster);
                wheel.replace_session(roster, session);
                LoadOutcome::Fresh(reason)
            }
        };

        inner.publish(&wheel);
        outcome
    }

    /// IDLE → SPINNING. The winner is fixed here; the rest is timed.
    pub fn request_spin(&self) -> WheelUpdate {
        let inner = &self.inner;
        let mut wheel = inner.lock_wheel();
        let (min_turns, max_turns) = (inner.config.min_full_turns, inner.config.max_full_turns);

        let update = wheel.request_spin(
            |len| inner.random.gen_index(len),
            || inner.random.gen_range(min_turns, max_turns),
        );

        match &update {
            WheelUpdate::SpinStarted {
                winner,
                index,
                pool_size,
                target_rotation,
                epoch,
            } => {
                tracing::info!(
                    epoch = %epoch,
                    pool_size,
                    target_rotation = target_rotation.degrees(),
                    "Spin started"
                );
                tracing::debug!(epoch = %epoch, index, winner = %winner.id(), "Winner chosen");
                self.schedule(*epoch, inner.config.spin_duration, TimedStep::FinishSpin);
                inner.publish(&wheel);
            }
            WheelUpdate::Ignored { reason } => {
                tracing::debug!(reason = %reason, "Spin request ignored");
            }
            _ => {}
        }

        update
    }

    /// SHOWING_RESULT → IDLE, recording the winner in the history.
    pub fn acknowledge_winner(&self) -> WheelUpdate {
        let inner = &self.inner;
        let mut wheel = inner.lock_wheel();
        let update = wheel.acknowledge();

        match &update {
            WheelUpdate::WinnerRecorded { winner, drawn } => {
                tracing::info!(
                    winner = %winner.id(),
                    drawn,
                    remaining = wheel.session().remaining(),
                    "Winner recorded"
                );
                inner.persist(&wheel);
                inner.publish(&wheel);
            }
            WheelUpdate::Ignored { reason } => {
                tracing::debug!(reason = %reason, "Acknowledge ignored");
            }
            _ => {}
        }

        update
    }

    /// Put everybody back in the pool from any state.
    pub fn reset_session(&self) -> WheelUpdate {
        let inner = &self.inner;
        let mut wheel = inner.lock_wheel();
        inner.cancel_timer();
        let update = wheel.reset();

        if let Err(e) = inner.store.remove(&inner.config.session_key) {
            tracing::warn!(
                error = %e,
                key = %inner.config.session_key,
                "Failed to clear saved draw session"
            );
        }
        if let WheelUpdate::Reset {
            previous_state,
            pool_size,
        } = &update
        {
            tracing::info!(previous_state = %previous_state, pool_size, "Draw session reset");
        }

        inner.publish(&wheel);
        update
    }

    // =========================================================================
    // Observables
    // =========================================================================

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot::capture(&self.inner.lock_wheel())
    }

    /// Receiver that sees a fresh snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<WheelSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Color bands for the candidates currently drawn on the selector.
    pub fn color_bands(&self) -> ColorBands {
        let wheel = self.inner.lock_wheel();
        ColorBands::partition(
            wheel.visual_candidates().len(),
            self.inner.config.max_color_bands,
            self.inner.config.palette_size,
        )
    }

    pub fn group_counts(&self) -> Vec<(GroupTag, usize)> {
        self.inner
            .lock_wheel()
            .roster()
            .group_counts()
            .into_iter()
            .collect()
    }

    // =========================================================================
    // Timed transitions
    // =========================================================================

    fn schedule(&self, epoch: SpinEpoch, delay: Duration, step: TimedStep) {
        let engine: Weak<EngineInner> = Arc::downgrade(&self.inner);
        let handle = self.inner.scheduler.after(
            delay,
            Box::new(move || {
                // The engine may be gone by the time the timer fires.
                if let Some(inner) = engine.upgrade() {
                    DrawingEngine { inner }.on_timer(step, epoch);
                }
            }),
        );
        *self.inner.lock_timer() = Some(handle);
    }

    fn on_timer(&self, step: TimedStep, epoch: SpinEpoch) {
        let inner = &self.inner;
        let mut wheel = inner.lock_wheel();
        let update = match step {
            TimedStep::FinishSpin => wheel.finish_spin(epoch),
            TimedStep::Reveal => wheel.reveal(epoch),
        };

        match &update {
            WheelUpdate::PoolUpdated { winner, remaining } => {
                tracing::debug!(epoch = %epoch, winner = %winner.id(), remaining, "Spin finished");
                inner.persist(&wheel);
                self.schedule(epoch, inner.config.reveal_delay, TimedStep::Reveal);
            }
            WheelUpdate::Revealed { winner } => {
                *inner.lock_timer() = None;
                tracing::info!(
                    epoch = %epoch,
                    winner = %winner.id(),
                    name = %winner.name(),
                    "Winner revealed"
                );
            }
            WheelUpdate::Ignored { reason } => {
                tracing::debug!(epoch = %epoch, ?step, reason = %reason, "Timed transition ignored");
                return;
            }
            _ => {}
        }

        inner.publish(&wheel);
    }
}

impl EngineInner {
    fn lock_wheel(&self) -> MutexGuard<'_, LuckyWheel> {
        self.wheel.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<CancelHandle>> {
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.cancel();
        }
    }

    /// Write the current session. Failures only cost reload recovery.
    fn persist(&self, wheel: &LuckyWheel) {
        let record = StoredSession::capture(wheel.session(), wheel.roster(), self.clock.now());
        let written = record
            .encode()
            .and_then(|bytes| self.store.write(&self.config.session_key, &bytes));

        if let Err(e) = written {
            tracing::warn!(
                error = %e,
                key = %self.config.session_key,
                "Failed to save draw session, continuing in memory"
            );
        }
    }

    fn publish(&self, wheel: &LuckyWheel) {
        self.updates.send_replace(WheelSnapshot::capture(wheel));
    }
}
