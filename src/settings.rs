//! Driver settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults and
//! a missing or unreadable file falls back to `Settings::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::sim::Viewport;

/// Settings for the headless driver loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Session ===
    /// RNG seed; `None` picks one from the system clock
    pub seed: Option<u64>,
    /// Reset automatically when the run ends
    pub auto_restart: bool,
    /// Let the built-in pilot fly the ship
    pub autopilot: bool,

    // === Loop ===
    /// Driver cadence (ticks per second)
    pub tick_rate_hz: u32,
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// Sleep between ticks and read the real clock
    pub realtime: bool,

    // === Output ===
    /// Print a JSON snapshot every N ticks (0 = never)
    pub snapshot_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            seed: None,
            auto_restart: false,
            autopilot: true,

            tick_rate_hz: 60,
            max_ticks: 3600,
            realtime: false,

            snapshot_every: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not read settings {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.viewport_width.is_finite() && self.viewport_width > crate::consts::BOSS_WIDTH) {
            log::warn!("viewport_width {} too small; using {}", self.viewport_width, defaults.viewport_width);
            self.viewport_width = defaults.viewport_width;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > crate::consts::PLAYER_BOTTOM_OFFSET) {
            log::warn!("viewport_height {} too small; using {}", self.viewport_height, defaults.viewport_height);
            self.viewport_height = defaults.viewport_height;
        }
        if self.tick_rate_hz == 0 {
            self.tick_rate_hz = defaults.tick_rate_hz;
        }
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
        })
    }

    /// Milliseconds of simulated time per tick
    pub fn tick_ms(&self) -> f64 {
        1000.0 / f64::from(self.tick_rate_hz.max(1))
    }
}
