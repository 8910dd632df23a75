//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    app_settings::{SessionStoreKind, WheelSettings},
    clock::SystemClock,
    ports::{ClockPort, RandomPort, SchedulerPort, SessionStore},
    random::{SeededRandom, SystemRandom},
    session_store::{InMemorySessionStore, JsonFileSessionStore},
};
use crate::use_cases::{DrawingConfig, DrawingEngine};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub drawing: DrawingEngine,
    pub settings: WheelSettings,
}

impl App {
    pub fn new(
        settings: WheelSettings,
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        scheduler: Arc<dyn SchedulerPort>,
    ) -> Self {
        let drawing = DrawingEngine::new(
            store,
            random,
            clock,
            scheduler,
            DrawingConfig::from(&settings),
        );
        Self { drawing, settings }
    }

    /// Wire the production adapters for `settings`.
    pub fn from_settings(settings: WheelSettings, scheduler: Arc<dyn SchedulerPort>) -> Self {
        let store = session_store_for(&settings);
        let random: Arc<dyn RandomPort> = match settings.random_seed {
            Some(seed) => {
                tracing::warn!(seed, "Draw order is seeded and therefore predictable");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(SystemRandom::new()),
        };
        Self::new(
            settings,
            store,
            random,
            Arc::new(SystemClock::new()),
            scheduler,
        )
    }
}

fn session_store_for(settings: &WheelSettings) -> Arc<dyn SessionStore> {
    match settings.session_store {
        SessionStoreKind::Memory => Arc::new(InMemorySessionStore::new()),
        SessionStoreKind::File => {
            let store = JsonFileSessionStore::open(settings.session_store_path.clone());
            tracing::info!(path = ?store.path(), "Draw sessions are saved to disk");
            Arc::new(store)
        }
    }
}
