//! Response types returned by the engine's HTTP API.

use serde::{Deserialize, Serialize};

use luckywheel_domain::{ColorBand, DrawingState};

use crate::requests::CandidateData;

/// Everything the presentation layer needs to draw the wheel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelStateResponse {
    pub state: DrawingState,
    /// Absolute target rotation of the latest spin, in degrees
    pub rotation: f64,
    /// Candidates to render on the selector (frozen while a spin is shown)
    pub visual_candidates: Vec<CandidateData>,
    pub pool: Vec<CandidateData>,
    /// Most recent first
    pub history: Vec<CandidateData>,
    pub remaining: usize,
    pub drawn: usize,
    pub roster_size: usize,
    /// Only present once the result is being shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<CandidateData>,
    /// Informational message, e.g. when nobody is left to draw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a spin request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub started: bool,
    pub target_rotation: f64,
    /// Number of slices the target rotation was computed over
    pub pool_size: usize,
    pub spin_duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRosterResponse {
    /// True when a persisted session was resumed
    pub restored: bool,
    /// Why a persisted session was discarded, if one existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discarded: Option<String>,
    pub wheel: WheelStateResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBandData {
    pub start: usize,
    pub end: usize,
    pub palette_index: usize,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl From<ColorBand> for ColorBandData {
    fn from(band: ColorBand) -> Self {
        Self {
            start: band.start,
            end: band.end,
            palette_index: band.palette_index,
            start_angle: band.start_angle,
            sweep_angle: band.sweep_angle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCountData {
    pub group: String,
    pub count: usize,
}
