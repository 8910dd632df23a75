//! Drawing engine tests driven by virtual time.
//!
//! The `ManualScheduler` stands in for real timers, so each test walks the
//! wheel through its timed transitions deterministically.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use mockall::Sequence;

use luckywheel_domain::{
    Candidate, CandidateId, CandidateName, DrawingState, IgnoreReason, RestorePolicy,
    RestoreRejected, Roster, WheelUpdate,
};

use super::*;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::ports::{MockRandomPort, MockSessionStore, SessionStore, StoreError};
use crate::infrastructure::random::{FixedRandom, SeededRandom};
use crate::infrastructure::scheduler::{ManualScheduler, TokioScheduler};
use crate::infrastructure::session_store::InMemorySessionStore;

const SPIN: Duration = Duration::from_millis(6000);
const REVEAL: Duration = Duration::from_millis(2000);

fn roster(ids: &[&str]) -> Roster {
    Roster::new(
        ids.iter()
            .map(|id| {
                Candidate::new(
                    CandidateId::new(*id).unwrap(),
                    CandidateName::new(format!("Staff {id}")).unwrap(),
                )
            })
            .collect(),
    )
    .unwrap()
}

fn ids(candidates: &[Candidate]) -> Vec<String> {
    candidates.iter().map(|c| c.id().to_string()).collect()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 12, 19, 16, 0, 0).unwrap()))
}

struct Harness {
    engine: DrawingEngine,
    scheduler: Arc<ManualScheduler>,
    store: Arc<InMemorySessionStore>,
}

impl Harness {
    fn new(random: Arc<dyn RandomPort>) -> Self {
        Self::with_store(random, Arc::new(InMemorySessionStore::new()), DrawingConfig::default())
    }

    fn with_store(
        random: Arc<dyn RandomPort>,
        store: Arc<InMemorySessionStore>,
        config: DrawingConfig,
    ) -> Self {
        let scheduler = Arc::new(ManualScheduler::new());
        let engine = DrawingEngine::new(store.clone(), random, clock(), scheduler.clone(), config);
        Self {
            engine,
            scheduler,
            store,
        }
    }

    fn state(&self) -> DrawingState {
        self.engine.snapshot().state
    }

    /// Spin and let both timers fire.
    fn spin_to_result(&self) -> Candidate {
        let update = self.engine.request_spin();
        assert!(matches!(update, WheelUpdate::SpinStarted { .. }), "{update:?}");
        self.scheduler.advance(SPIN);
        self.scheduler.advance(REVEAL);
        let snapshot = self.engine.snapshot();
        assert_eq!(snapshot.state, DrawingState::ShowingResult);
        snapshot.winner.unwrap()
    }

    fn assert_accounting(&self, roster_size: usize) {
        let snapshot = self.engine.snapshot();
        let pool: HashSet<_> = snapshot.pool.iter().map(|c| c.id().clone()).collect();
        let history: HashSet<_> = snapshot.history.iter().map(|c| c.id().clone()).collect();
        assert_eq!(pool.len(), snapshot.pool.len(), "pool holds duplicates");
        assert_eq!(history.len(), snapshot.history.len(), "history holds duplicates");
        assert!(pool.is_disjoint(&history));
        assert_eq!(snapshot.remaining + snapshot.drawn, roster_size);
        if snapshot.state == DrawingState::Idle {
            assert_eq!(snapshot.pool.len() + snapshot.history.len(), roster_size);
        }
    }
}

// =============================================================================
// Full Drawing Cycle
// =============================================================================

mod full_cycle {
    use super::*;

    #[test]
    fn three_candidates_drawn_to_exhaustion() {
        let harness = Harness::new(Arc::new(SeededRandom::new(42)));
        assert!(!harness.engine.load_roster(roster(&["a", "b", "c"])).is_restored());

        let mut winners = Vec::new();
        for round in 1..=3 {
            let update = harness.engine.request_spin();
            let WheelUpdate::SpinStarted { winner, pool_size, .. } = update else {
                panic!("round {round} should start a spin");
            };
            assert_eq!(pool_size, 4 - round);

            // Winner is fixed immediately but the pool waits for the animation.
            let spinning = harness.engine.snapshot();
            assert_eq!(spinning.state, DrawingState::Spinning);
            assert_eq!(spinning.remaining, 4 - round);
            assert!(spinning.revealed_winner().is_none());

            harness.scheduler.advance(SPIN - Duration::from_millis(1));
            assert_eq!(harness.state(), DrawingState::Spinning);
            harness.scheduler.advance(Duration::from_millis(1));

            let pending = harness.engine.snapshot();
            assert_eq!(pending.state, DrawingState::RevealPending);
            assert_eq!(pending.pool.len(), 3 - round);
            assert!(!pending.pool.contains(&winner));
            // Frozen for rendering while the result is on screen
            assert_eq!(pending.visual_candidates.len(), 4 - round);
            harness.assert_accounting(3);

            harness.scheduler.advance(REVEAL);
            let shown = harness.engine.snapshot();
            assert_eq!(shown.state, DrawingState::ShowingResult);
            assert_eq!(shown.revealed_winner(), Some(&winner));

            assert!(matches!(
                harness.engine.acknowledge_winner(),
                WheelUpdate::WinnerRecorded { .. }
            ));
            let idle = harness.engine.snapshot();
            assert_eq!(idle.state, DrawingState::Idle);
            assert_eq!(idle.history.first(), Some(&winner));
            harness.assert_accounting(3);
            winners.push(winner);
        }

        // History is most recent first
        let snapshot = harness.engine.snapshot();
        winners.reverse();
        assert_eq!(snapshot.history, winners);
        assert!(snapshot.pool.is_empty());
        assert_eq!(snapshot.message.as_deref(), Some("no one left to draw"));

        let fourth = harness.engine.request_spin();
        assert_eq!(fourth, WheelUpdate::ignored(IgnoreReason::EmptyPool));
        assert_eq!(harness.state(), DrawingState::Idle);
        assert_eq!(harness.scheduler.pending(), 0);
    }

    #[test]
    fn no_candidate_is_drawn_twice() {
        let names: Vec<String> = (0..25).map(|i| format!("s{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let harness = Harness::new(Arc::new(SeededRandom::new(7)));
        harness.engine.load_roster(roster(&refs));

        let mut seen = HashSet::new();
        for _ in 0..25 {
            let winner = harness.spin_to_result();
            assert!(seen.insert(winner.id().clone()), "{} drawn twice", winner.id());
            harness.engine.acknowledge_winner();
            harness.assert_accounting(25);
        }
        assert!(harness.engine.snapshot().pool.is_empty());
    }

    #[test]
    fn spins_while_busy_are_ignored() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(roster(&["a", "b"]));
        harness.engine.request_spin();

        let busy = harness.engine.request_spin();
        assert_eq!(
            busy,
            WheelUpdate::ignored(IgnoreReason::NotIdle {
                state: DrawingState::Spinning
            })
        );
        harness.scheduler.advance(SPIN + REVEAL);
        assert!(harness.engine.request_spin().is_ignored());
        assert!(harness.engine.acknowledge_winner().mutates_session());
        assert!(!harness.engine.acknowledge_winner().mutates_session());
    }

    #[test]
    fn rotation_only_moves_forward() {
        let harness = Harness::new(Arc::new(SeededRandom::new(3)));
        harness.engine.load_roster(roster(&["a", "b", "c", "d", "e"]));

        let mut last = harness.engine.snapshot().rotation.degrees();
        for round in 0..8 {
            if round == 5 {
                harness.engine.reset_session();
            }
            harness.spin_to_result();
            let rotation = harness.engine.snapshot().rotation.degrees();
            assert!(rotation > last, "spin {round}: {rotation} <= {last}");
            last = rotation;
            harness.engine.acknowledge_winner();
        }
    }

    #[test]
    fn random_source_sees_the_current_pool_size() {
        let mut random = MockRandomPort::new();
        let mut seq = Sequence::new();
        for len in [3usize, 2, 1] {
            random
                .expect_gen_index()
                .with(eq(len))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| 0);
            random
                .expect_gen_range()
                .with(eq(15), eq(19))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| 17);
        }

        let harness = Harness::new(Arc::new(random));
        harness.engine.load_roster(roster(&["a", "b", "c"]));
        for expected in ["a", "b", "c"] {
            let winner = harness.spin_to_result();
            assert_eq!(winner.id().as_str(), expected);
            harness.engine.acknowledge_winner();
        }
    }
}

// =============================================================================
// Uniformity
// =============================================================================

mod uniformity {
    use super::*;

    /// Chi-square statistic of observed counts against a uniform expectation.
    fn chi_square(counts: &[usize]) -> f64 {
        let total: usize = counts.iter().sum();
        let expected = total as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    #[test]
    fn first_draw_is_uniform_over_the_pool() {
        let ids = ["a", "b", "c", "d", "e"];
        let harness = Harness::new(Arc::new(SeededRandom::new(20251219)));
        harness.engine.load_roster(roster(&ids));

        let mut counts = [0usize; 5];
        for _ in 0..5000 {
            let WheelUpdate::SpinStarted { index, .. } = harness.engine.request_spin() else {
                panic!("pool is never empty here");
            };
            counts[index] += 1;
            // Reset mid-spin puts the winner back for the next trial.
            harness.engine.reset_session();
        }

        // 4 degrees of freedom, p = 0.001
        let statistic = chi_square(&counts);
        assert!(statistic < 18.47, "chi-square {statistic} for {counts:?}");
    }

    #[test]
    fn later_draws_are_uniform_over_what_remains() {
        let ids = ["a", "b", "c", "d"];
        let harness = Harness::new(Arc::new(SeededRandom::new(99)));
        harness.engine.load_roster(roster(&ids));

        // Slot counts for the second draw of each session
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            harness.spin_to_result();
            harness.engine.acknowledge_winner();
            let WheelUpdate::SpinStarted { index, pool_size, .. } = harness.engine.request_spin()
            else {
                panic!("three candidates remain");
            };
            assert_eq!(pool_size, 3);
            counts[index] += 1;
            harness.engine.reset_session();
        }

        // 2 degrees of freedom, p = 0.001
        let statistic = chi_square(&counts);
        assert!(statistic < 13.82, "chi-square {statistic} for {counts:?}");
    }
}

// =============================================================================
// Reset and Stale Timers
// =============================================================================

mod reset {
    use super::*;

    #[test]
    fn reset_during_spin_invalidates_pending_timers() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 1, turns: 15 }));
        harness.engine.load_roster(roster(&["a", "b", "c"]));
        harness.spin_to_result();
        harness.engine.acknowledge_winner();

        harness.engine.request_spin();
        harness.scheduler.advance(Duration::from_secs(1));
        let update = harness.engine.reset_session();
        assert!(matches!(
            update,
            WheelUpdate::Reset {
                previous_state: DrawingState::Spinning,
                pool_size: 3
            }
        ));

        // The abandoned spin must not touch the new pool
        harness.scheduler.advance(Duration::from_secs(30));
        let snapshot = harness.engine.snapshot();
        assert_eq!(snapshot.state, DrawingState::Idle);
        assert_eq!(ids(&snapshot.pool), vec!["a", "b", "c"]);
        assert!(snapshot.history.is_empty());
        assert!(snapshot.winner.is_none());
        assert!(!harness.store.contains(&DrawingConfig::default().session_key));
    }

    #[test]
    fn reset_during_reveal_delay_is_clean() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(roster(&["a", "b"]));
        harness.engine.request_spin();
        harness.scheduler.advance(SPIN);
        assert_eq!(harness.state(), DrawingState::RevealPending);

        harness.engine.reset_session();
        harness.scheduler.advance(REVEAL * 2);

        let snapshot = harness.engine.snapshot();
        assert_eq!(snapshot.state, DrawingState::Idle);
        assert_eq!(snapshot.remaining, 2);
        assert_eq!(snapshot.drawn, 0);
    }

    #[test]
    fn reset_restores_full_roster_from_any_state() {
        let harness = Harness::new(Arc::new(SeededRandom::new(11)));
        let full = roster(&["a", "b", "c", "d"]);
        harness.engine.load_roster(full.clone());
        harness.spin_to_result();
        harness.engine.acknowledge_winner();
        harness.spin_to_result();

        harness.engine.reset_session();
        let snapshot = harness.engine.snapshot();
        let pool: HashSet<_> = snapshot.pool.iter().collect();
        let expected: HashSet<_> = full.candidates().iter().collect();
        assert_eq!(pool, expected);
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.state, DrawingState::Idle);
    }

    #[test]
    fn reloading_the_roster_abandons_the_spin() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(roster(&["a", "b"]));
        harness.engine.request_spin();

        harness.engine.load_roster(roster(&["x", "y", "z"]));
        harness.scheduler.advance(SPIN + REVEAL);

        let snapshot = harness.engine.snapshot();
        assert_eq!(snapshot.state, DrawingState::Idle);
        assert_eq!(snapshot.remaining, 3);
    }

    #[test]
    fn dropped_engine_ignores_its_timers() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(roster(&["a"]));
        harness.engine.request_spin();

        let Harness {
            engine,
            scheduler,
            store,
        } = harness;
        drop(engine);

        assert_eq!(scheduler.advance(SPIN + REVEAL), 1);
        assert!(!store.contains(&DrawingConfig::default().session_key));
    }
}

// =============================================================================
// Persistence
// =============================================================================

mod persistence_contract {
    use super::*;

    fn config() -> DrawingConfig {
        DrawingConfig {
            session_key: "wheel".to_string(),
            ..DrawingConfig::default()
        }
    }

    #[test]
    fn writes_after_pool_update_and_acknowledgement_only() {
        let mut store = MockSessionStore::new();
        let mut seq = Sequence::new();
        store
            .expect_read()
            .withf(|key| key == "wheel")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_write()
            .withf(|key, bytes| {
                let record = StoredSession::decode(bytes).unwrap();
                key == "wheel" && record.pool.len() == 1 && record.pending.is_some()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_write()
            .withf(|_, bytes| {
                let record = StoredSession::decode(bytes).unwrap();
                record.pending.is_none() && record.history.len() == 1
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_remove()
            .withf(|key| key == "wheel")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let scheduler = Arc::new(ManualScheduler::new());
        let engine = DrawingEngine::new(
            Arc::new(store),
            Arc::new(FixedRandom { index: 0, turns: 15 }),
            clock(),
            scheduler.clone(),
            config(),
        );

        engine.load_roster(roster(&["a", "b"]));
        engine.request_spin();
        scheduler.advance(SPIN);
        scheduler.advance(REVEAL);
        engine.acknowledge_winner();
        engine.reset_session();
    }

    #[test]
    fn failed_writes_do_not_stop_the_wheel() {
        let store = Arc::new(InMemorySessionStore::new());
        store.set_fail_writes(true);
        let harness = Harness::with_store(Arc::new(SeededRandom::new(5)), store, config());
        harness.engine.load_roster(roster(&["a", "b", "c"]));

        for _ in 0..3 {
            harness.spin_to_result();
            harness.engine.acknowledge_winner();
        }
        let snapshot = harness.engine.snapshot();
        assert_eq!(snapshot.history.len(), 3);
        assert!(!harness.store.contains("wheel"));
    }

    #[test]
    fn failed_remove_still_resets() {
        let mut store = MockSessionStore::new();
        store.expect_read().returning(|_| Ok(None));
        store
            .expect_remove()
            .returning(|_| Err(StoreError::unavailable("storage disabled")));

        let engine = DrawingEngine::new(
            Arc::new(store),
            Arc::new(FixedRandom { index: 0, turns: 15 }),
            clock(),
            Arc::new(ManualScheduler::new()),
            config(),
        );
        engine.load_roster(roster(&["a"]));
        assert!(matches!(engine.reset_session(), WheelUpdate::Reset { .. }));
    }

    #[test]
    fn reload_resumes_the_saved_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let first = Harness::with_store(Arc::new(SeededRandom::new(8)), store.clone(), config());
        first.engine.load_roster(roster(&["a", "b", "c", "d"]));
        first.spin_to_result();
        first.engine.acknowledge_winner();
        let before = first.engine.snapshot();
        drop(first);

        // A page reload: new engine, same store, same roster.
        let second = Harness::with_store(Arc::new(SeededRandom::new(8)), store.clone(), config());
        assert_eq!(
            second.engine.load_roster(roster(&["a", "b", "c", "d"])),
            LoadOutcome::Restored
        );
        let restored = second.engine.snapshot();
        assert_eq!(restored.pool, before.pool);
        assert_eq!(restored.history, before.history);
        assert_eq!(restored.state, DrawingState::Idle);

        // Restoring again yields the same session
        assert!(second.engine.load_roster(roster(&["a", "b", "c", "d"])).is_restored());
        let again = second.engine.snapshot();
        assert_eq!(again.pool, restored.pool);
        assert_eq!(again.history, restored.history);
    }

    #[test]
    fn reload_mid_reveal_keeps_the_drawn_winner() {
        let store = Arc::new(InMemorySessionStore::new());
        let first = Harness::with_store(
            Arc::new(FixedRandom { index: 2, turns: 15 }),
            store.clone(),
            config(),
        );
        first.engine.load_roster(roster(&["a", "b", "c"]));
        first.engine.request_spin();
        first.scheduler.advance(SPIN);
        drop(first);

        let second = Harness::with_store(Arc::new(SeededRandom::new(1)), store, config());
        assert!(second.engine.load_roster(roster(&["a", "b", "c"])).is_restored());
        let snapshot = second.engine.snapshot();
        assert_eq!(ids(&snapshot.pool), vec!["a", "b"]);
        assert_eq!(ids(&snapshot.history), vec!["c"]);
    }

    #[test]
    fn size_mismatch_starts_fresh() {
        let five = roster(&["a", "b", "c", "d", "e"]);
        let six = roster(&["a", "b", "c", "d", "e", "f"]);
        let store = Arc::new(InMemorySessionStore::new());

        let first = Harness::with_store(Arc::new(SeededRandom::new(2)), store.clone(), config());
        first.engine.load_roster(five);
        first.spin_to_result();
        first.engine.acknowledge_winner();
        drop(first);

        let second = Harness::with_store(Arc::new(SeededRandom::new(2)), store, config());
        let outcome = second.engine.load_roster(six.clone());
        assert_eq!(
            outcome,
            LoadOutcome::Fresh(FreshReason::Rejected(RestoreRejected::SizeMismatch {
                persisted: 5,
                roster: 6
            }))
        );
        let snapshot = second.engine.snapshot();
        assert_eq!(snapshot.pool, six.candidates().to_vec());
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn fingerprint_policy_rejects_same_size_roster() {
        let store = Arc::new(InMemorySessionStore::new());
        let config = DrawingConfig {
            restore_policy: RestorePolicy::RosterFingerprint,
            ..config()
        };

        let first = Harness::with_store(Arc::new(SeededRandom::new(4)), store.clone(), config.clone());
        first.engine.load_roster(roster(&["a", "b"]));
        first.spin_to_result();
        first.engine.acknowledge_winner();
        drop(first);

        let second = Harness::with_store(Arc::new(SeededRandom::new(4)), store, config);
        let outcome = second.engine.load_roster(roster(&["x", "y"]));
        assert_eq!(
            outcome,
            LoadOutcome::Fresh(FreshReason::Rejected(RestoreRejected::FingerprintMismatch))
        );
    }

    #[test]
    fn corrupt_record_starts_fresh() {
        let store = Arc::new(InMemorySessionStore::new());
        store.write("wheel", b"[1, 2, 3]").unwrap();
        let harness = Harness::with_store(Arc::new(SeededRandom::new(1)), store, config());

        let outcome = harness.engine.load_roster(roster(&["a"]));
        assert!(matches!(outcome, LoadOutcome::Fresh(FreshReason::Malformed(_))));
        assert_eq!(harness.engine.snapshot().remaining, 1);
    }

    /// Store that notes whether the engine held the wheel lock during a read.
    #[derive(Default)]
    struct LockCheckingStore {
        engine: std::sync::OnceLock<Weak<EngineInner>>,
        reads: std::sync::atomic::AtomicUsize,
        reads_under_lock: std::sync::atomic::AtomicUsize,
    }

    impl SessionStore for LockCheckingStore {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            use std::sync::atomic::Ordering;
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(inner) = self.engine.get().and_then(Weak::upgrade) {
                if inner.wheel.try_lock().is_err() {
                    self.reads_under_lock.fetch_add(1, Ordering::SeqCst);
                }
            }
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn roster_load_reads_the_record_under_the_wheel_lock() {
        use std::sync::atomic::Ordering;

        let store = Arc::new(LockCheckingStore::default());
        let engine = DrawingEngine::new(
            store.clone(),
            Arc::new(SeededRandom::new(2)),
            clock(),
            Arc::new(ManualScheduler::new()),
            config(),
        );
        assert!(store.engine.set(Arc::downgrade(&engine.inner)).is_ok());

        engine.load_roster(roster(&["a", "b"]));

        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.reads_under_lock.load(Ordering::SeqCst), 1);
    }
}

// =============================================================================
// Observables
// =============================================================================

mod observables {
    use super::*;

    #[test]
    fn subscribers_see_every_transition() {
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        let mut updates = harness.engine.subscribe();
        harness.engine.load_roster(roster(&["a", "b"]));
        assert_eq!(updates.borrow_and_update().remaining, 2);

        harness.engine.request_spin();
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().state, DrawingState::Spinning);

        harness.scheduler.advance(SPIN);
        assert_eq!(updates.borrow_and_update().state, DrawingState::RevealPending);

        harness.scheduler.advance(REVEAL);
        assert_eq!(updates.borrow_and_update().state, DrawingState::ShowingResult);

        harness.engine.acknowledge_winner();
        let idle = updates.borrow_and_update().clone();
        assert_eq!(idle.state, DrawingState::Idle);
        assert_eq!(ids(&idle.history), vec!["a"]);
    }

    #[test]
    fn color_bands_follow_the_visual_set() {
        let names: Vec<String> = (0..600).map(|i| format!("s{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(roster(&refs));

        let bands = harness.engine.color_bands();
        assert!(bands.is_grouped());
        assert!(bands.bands().len() <= DrawingConfig::default().max_color_bands);
        assert_eq!(bands.bands().last().map(|b| b.end), Some(600));

        // While the result is shown the bands still cover the frozen set
        harness.spin_to_result();
        assert_eq!(harness.engine.snapshot().remaining, 599);
        assert_eq!(harness.engine.color_bands().bands().last().map(|b| b.end), Some(600));
    }

    #[test]
    fn group_counts_come_from_the_roster() {
        use luckywheel_domain::GroupTag;

        let north = GroupTag::new("North").unwrap();
        let south = GroupTag::new("South").unwrap();
        let candidates = vec![
            Candidate::new(CandidateId::new("a").unwrap(), CandidateName::new("A").unwrap())
                .with_group(north.clone()),
            Candidate::new(CandidateId::new("b").unwrap(), CandidateName::new("B").unwrap())
                .with_group(north.clone()),
            Candidate::new(CandidateId::new("c").unwrap(), CandidateName::new("C").unwrap())
                .with_group(south.clone()),
        ];
        let harness = Harness::new(Arc::new(FixedRandom { index: 0, turns: 15 }));
        harness.engine.load_roster(Roster::new(candidates).unwrap());

        assert_eq!(harness.engine.group_counts(), vec![(north, 2), (south, 1)]);
    }
}

// =============================================================================
// Real Timers
// =============================================================================

mod tokio_timers {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn cycle_runs_on_tokio_time() {
        let engine = DrawingEngine::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(FixedRandom { index: 0, turns: 15 }),
            clock(),
            Arc::new(TokioScheduler::from_current().unwrap()),
            DrawingConfig::default(),
        );
        engine.load_roster(roster(&["a", "b"]));
        let mut updates = engine.subscribe();

        engine.request_spin();
        tokio::time::sleep(SPIN + Duration::from_millis(10)).await;
        assert_eq!(engine.snapshot().state, DrawingState::RevealPending);

        tokio::time::sleep(REVEAL).await;
        assert_eq!(engine.snapshot().state, DrawingState::ShowingResult);
        assert!(updates.has_changed().unwrap());

        engine.acknowledge_winner();
        assert_eq!(engine.snapshot().history.len(), 1);
    }
}
