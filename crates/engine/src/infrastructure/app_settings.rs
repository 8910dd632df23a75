//! Wheel settings loaded from the environment.
//!
//! Every value has a default; an unparseable value is logged and replaced by
//! its default rather than failing startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use luckywheel_domain::RestorePolicy;

pub const DEFAULT_SPIN_DURATION_MS: u64 = 6000;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 2000;
pub const DEFAULT_MIN_FULL_TURNS: u32 = 15;
pub const DEFAULT_MAX_FULL_TURNS: u32 = 19;
pub const DEFAULT_MAX_COLOR_BANDS: usize = 60;
pub const DEFAULT_PALETTE_SIZE: usize = 6;
pub const DEFAULT_SESSION_KEY: &str = "luckywheel_session";
pub const DEFAULT_SESSION_STORE_PATH: &str = "luckywheel_session.json";

// ============================================================================
// Session Store Kind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStoreKind {
    /// Lost when the engine stops
    #[default]
    Memory,
    /// Mirrored to `SESSION_STORE_PATH`
    File,
}

impl std::fmt::Display for SessionStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreKind::Memory => write!(f, "memory"),
            SessionStoreKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for SessionStoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" | "in_memory" => Ok(SessionStoreKind::Memory),
            "file" | "json" | "json_file" => Ok(SessionStoreKind::File),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Wheel Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WheelSettings {
    /// How long the spin animation plays before the pool is updated
    pub spin_duration: Duration,
    /// Suspense delay between the end of the spin and the reveal
    pub reveal_delay: Duration,
    pub min_full_turns: u32,
    pub max_full_turns: u32,
    pub max_color_bands: usize,
    pub palette_size: usize,
    pub restore_policy: RestorePolicy,
    pub session_store: SessionStoreKind,
    pub session_store_path: PathBuf,
    pub session_key: String,
    pub roster_path: Option<PathBuf>,
    /// Seed for a reproducible draw order (rehearsals); unset draws are random
    pub random_seed: Option<u64>,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_duration: Duration::from_millis(DEFAULT_SPIN_DURATION_MS),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            min_full_turns: DEFAULT_MIN_FULL_TURNS,
            max_full_turns: DEFAULT_MAX_FULL_TURNS,
            max_color_bands: DEFAULT_MAX_COLOR_BANDS,
            palette_size: DEFAULT_PALETTE_SIZE,
            restore_policy: RestorePolicy::default(),
            session_store: SessionStoreKind::default(),
            session_store_path: PathBuf::from(DEFAULT_SESSION_STORE_PATH),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            roster_path: None,
            random_seed: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
        }
    }
}

impl WheelSettings {
    /// Load settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut min_full_turns = parse_or(var("MIN_FULL_TURNS"), "MIN_FULL_TURNS", defaults.min_full_turns);
        let mut max_full_turns = parse_or(var("MAX_FULL_TURNS"), "MAX_FULL_TURNS", defaults.max_full_turns);
        if min_full_turns > max_full_turns {
            tracing::warn!(
                min_full_turns,
                max_full_turns,
                "MIN_FULL_TURNS is above MAX_FULL_TURNS, swapping"
            );
            std::mem::swap(&mut min_full_turns, &mut max_full_turns);
        }

        Self {
            spin_duration: Duration::from_millis(parse_or(
                var("SPIN_DURATION_MS"),
                "SPIN_DURATION_MS",
                DEFAULT_SPIN_DURATION_MS,
            )),
            reveal_delay: Duration::from_millis(parse_or(
                var("REVEAL_DELAY_MS"),
                "REVEAL_DELAY_MS",
                DEFAULT_REVEAL_DELAY_MS,
            )),
            min_full_turns: min_full_turns.max(1),
            max_full_turns: max_full_turns.max(1),
            max_color_bands: parse_or(var("MAX_COLOR_BANDS"), "MAX_COLOR_BANDS", defaults.max_color_bands)
                .max(1),
            palette_size: parse_or(var("PALETTE_SIZE"), "PALETTE_SIZE", defaults.palette_size).max(1),
            restore_policy: parse_or(var("RESTORE_POLICY"), "RESTORE_POLICY", defaults.restore_policy),
            session_store: parse_or(var("SESSION_STORE"), "SESSION_STORE", defaults.session_store),
            session_store_path: var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_store_path),
            session_key: var("SESSION_KEY").unwrap_or(defaults.session_key),
            roster_path: var("ROSTER_PATH").map(PathBuf::from),
            random_seed: var("RANDOM_SEED").and_then(|raw| match raw.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!(value = %raw, "Invalid RANDOM_SEED, draws stay random");
                    None
                }
            }),
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(
                var("SERVER_PORT").or_else(|| var("PORT")),
                "SERVER_PORT",
                defaults.server_port,
            ),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid setting, using default");
            default
        }),
        None => default,
    }
}
