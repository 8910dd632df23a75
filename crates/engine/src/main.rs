//! Lucky Wheel Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::App;
use infrastructure::{
    app_settings::WheelSettings,
    ports::{RosterProvider, SchedulerPort},
    roster_file::JsonRosterProvider,
    scheduler::TokioScheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luckywheel_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lucky Wheel Engine");

    // Load configuration
    let settings = WheelSettings::from_env();
    tracing::info!(
        spin_duration_ms = settings.spin_duration.as_millis() as u64,
        reveal_delay_ms = settings.reveal_delay.as_millis() as u64,
        min_full_turns = settings.min_full_turns,
        max_full_turns = settings.max_full_turns,
        restore_policy = %settings.restore_policy,
        session_store = %settings.session_store,
        "Wheel configured"
    );
    let addr: SocketAddr = settings.bind_address().parse()?;
    let roster_path = settings.roster_path.clone();

    let scheduler: Arc<dyn SchedulerPort> = Arc::new(
        TokioScheduler::from_current()
            .ok_or_else(|| anyhow::anyhow!("engine must run inside a tokio runtime"))?,
    );
    let app = Arc::new(App::from_settings(settings, scheduler));

    // Initial roster, if one is configured. Otherwise the presentation layer
    // posts it to /api/wheel/roster.
    if let Some(path) = roster_path {
        let provider: Arc<dyn RosterProvider> = Arc::new(JsonRosterProvider::new(&path));
        match provider.load().await {
            Ok(roster) => {
                let outcome = app.drawing.load_roster(roster);
                tracing::info!(restored = outcome.is_restored(), "Initial roster installed");
            }
            Err(e) => {
                tracing::warn!(error = %e, path = ?path, "Failed to load initial roster");
            }
        }
    }

    // Trace wheel transitions
    let mut updates = app.drawing.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            tracing::debug!(
                state = %snapshot.state,
                remaining = snapshot.remaining,
                drawn = snapshot.drawn,
                epoch = %snapshot.epoch,
                "Wheel updated"
            );
        }
    });

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    // The wheel page posts JSON, which triggers CORS preflights.
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
