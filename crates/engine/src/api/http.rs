//! HTTP routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use luckywheel_domain::{DomainError, WheelUpdate};
use luckywheel_shared::{
    CandidateData, ColorBandData, GroupCountData, LoadRosterRequest, LoadRosterResponse,
    SpinResponse, WheelStateResponse,
};

use crate::app::App;
use crate::use_cases::{LoadOutcome, WheelSnapshot};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/wheel", get(get_wheel))
        .route("/api/wheel/roster", post(load_roster))
        .route("/api/wheel/spin", post(spin))
        .route("/api/wheel/acknowledge", post(acknowledge))
        .route("/api/wheel/reset", post(reset))
        .route("/api/wheel/bands", get(color_bands))
        .route("/api/roster/groups", get(group_counts))
        .fallback(not_found)
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn get_wheel(State(app): State<Arc<App>>) -> Json<WheelStateResponse> {
    Json(wheel_state(app.drawing.snapshot()))
}

async fn load_roster(
    State(app): State<Arc<App>>,
    Json(request): Json<LoadRosterRequest>,
) -> Result<Json<LoadRosterResponse>, ApiError> {
    let roster = request.into_roster()?;
    let outcome = app.drawing.load_roster(roster);

    let discarded = match &outcome {
        LoadOutcome::Fresh(reason) if reason.discarded_session() => Some(reason.to_string()),
        _ => None,
    };
    Ok(Json(LoadRosterResponse {
        restored: outcome.is_restored(),
        discarded,
        wheel: wheel_state(app.drawing.snapshot()),
    }))
}

async fn spin(State(app): State<Arc<App>>) -> Json<SpinResponse> {
    let spin_duration_ms = app.drawing.config().spin_duration.as_millis() as u64;

    let response = match app.drawing.request_spin() {
        WheelUpdate::SpinStarted {
            pool_size,
            target_rotation,
            ..
        } => SpinResponse {
            started: true,
            target_rotation: target_rotation.degrees(),
            pool_size,
            spin_duration_ms,
            ignored: None,
        },
        other => {
            let snapshot = app.drawing.snapshot();
            let ignored = match other {
                WheelUpdate::Ignored { reason } => reason.to_string(),
                _ => "spin not started".to_string(),
            };
            SpinResponse {
                started: false,
                target_rotation: snapshot.rotation.degrees(),
                pool_size: snapshot.remaining,
                spin_duration_ms,
                ignored: Some(ignored),
            }
        }
    };
    Json(response)
}

async fn acknowledge(State(app): State<Arc<App>>) -> Json<WheelStateResponse> {
    app.drawing.acknowledge_winner();
    Json(wheel_state(app.drawing.snapshot()))
}

async fn reset(State(app): State<Arc<App>>) -> Json<WheelStateResponse> {
    app.drawing.reset_session();
    Json(wheel_state(app.drawing.snapshot()))
}

async fn color_bands(State(app): State<Arc<App>>) -> Json<Vec<ColorBandData>> {
    let bands = app.drawing.color_bands();
    Json(bands.into_bands().into_iter().map(ColorBandData::from).collect())
}

async fn group_counts(State(app): State<Arc<App>>) -> Json<Vec<GroupCountData>> {
    let counts = app
        .drawing
        .group_counts()
        .into_iter()
        .map(|(group, count)| GroupCountData {
            group: group.to_string(),
            count,
        })
        .collect();
    Json(counts)
}

/// The winner is withheld until the reveal. Until then the pool is reported
/// as it stood when the spin started, so it cannot be diffed against the
/// visual set.
fn wheel_state(snapshot: WheelSnapshot) -> WheelStateResponse {
    let winner = snapshot.revealed_winner().map(CandidateData::from);
    let withheld = winner.is_none() && snapshot.winner.is_some();
    let to_data = |candidates: &[luckywheel_domain::Candidate]| {
        candidates.iter().map(CandidateData::from).collect::<Vec<_>>()
    };

    let (pool, remaining, drawn) = if withheld {
        (
            to_data(&snapshot.visual_candidates),
            snapshot.visual_candidates.len(),
            snapshot.history.len(),
        )
    } else {
        (to_data(&snapshot.pool), snapshot.remaining, snapshot.drawn)
    };

    WheelStateResponse {
        state: snapshot.state,
        rotation: snapshot.rotation.degrees(),
        visual_candidates: to_data(&snapshot.visual_candidates),
        pool,
        history: to_data(&snapshot.history),
        remaining,
        drawn,
        roster_size: snapshot.roster_size,
        winner,
        message: snapshot.message,
    }
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
