//! Board and bankroll configuration
//!
//! Defaults mirror `crate::consts`. A partial JSON document can override any
//! field; the browser build reads one from LocalStorage, the native runner
//! from a file.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PlinkoError;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Surface ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Vertical distance per tick
    pub ball_speed: f32,

    // === Pegs ===
    pub peg_radius: f32,
    pub peg_rows: u32,
    pub peg_row_spacing: f32,

    // === Slots ===
    pub slot_row_height: f32,
    /// One entry per slot, left to right
    pub multipliers: Vec<f64>,

    // === Bankroll ===
    pub starting_balance: f64,

    // === Timing ===
    /// Simulation ticks per second
    pub frame_rate: f32,
}

/// Largest canvas edge accepted from an override
pub const MAX_CANVAS_DIM: f32 = 16_384.0;
/// Longest round (in ticks) a config may describe
pub const MAX_ROUND_TICKS: u64 = 100_000;
/// Highest accepted tick rate
pub const MAX_FRAME_RATE: f32 = 1_000.0;
/// Largest peg field accepted from an override
pub const MAX_PEG_ROWS: u32 = 256;

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            peg_radius: PEG_RADIUS,
            peg_rows: PEG_ROWS,
            peg_row_spacing: PEG_ROW_SPACING,

            slot_row_height: SLOT_ROW_HEIGHT,
            multipliers: MULTIPLIERS.to_vec(),

            starting_balance: STARTING_BALANCE,

            frame_rate: FRAME_RATE,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, PlinkoError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject boards the simulation cannot run on
    pub fn validate(&self) -> Result<(), PlinkoError> {
        let invalid = |reason: &str| Err(PlinkoError::InvalidConfig(reason.into()));

        // Out-of-range JSON numbers arrive as inf
        let lengths = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("peg_radius", self.peg_radius),
            ("peg_row_spacing", self.peg_row_spacing),
            ("slot_row_height", self.slot_row_height),
            ("frame_rate", self.frame_rate),
        ];
        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(PlinkoError::InvalidConfig(format!("{} must be finite", name)));
            }
        }

        if self.multipliers.is_empty() {
            return invalid("at least one slot is required");
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return invalid("canvas dimensions must be positive");
        }
        if self.canvas_width > MAX_CANVAS_DIM || self.canvas_height > MAX_CANVAS_DIM {
            return invalid("canvas is larger than 16384 units");
        }
        if !(self.ball_radius > 0.0 && self.ball_speed > 0.0) {
            return invalid("ball radius and speed must be positive");
        }
        if self.canvas_width < self.ball_radius * 2.0 {
            return invalid("canvas is narrower than the ball");
        }
        if self.peg_radius < 0.0 || self.peg_row_spacing <= 0.0 {
            return invalid("peg radius must be >= 0 and row spacing positive");
        }
        if self.peg_rows > MAX_PEG_ROWS {
            return invalid("too many peg rows");
        }
        if self.slot_row_height < 0.0 || self.slot_row_height >= self.canvas_height {
            return invalid("slot row must fit inside the canvas");
        }
        if self.ball_speed >= self.slot_row_top() {
            return invalid("ball speed must be less than the drop height");
        }
        if self.max_round_ticks() > MAX_ROUND_TICKS {
            return invalid("ball speed too slow for the drop height");
        }
        if !(self.frame_rate > 0.0 && self.frame_rate <= MAX_FRAME_RATE) {
            return invalid("frame rate must be in (0, 1000]");
        }
        if self.multipliers.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return invalid("multipliers must be finite and >= 0");
        }
        if !(self.starting_balance.is_finite() && self.starting_balance >= 0.0) {
            return invalid("starting balance must be >= 0");
        }
        Ok(())
    }

    pub fn slot_count(&self) -> usize {
        self.multipliers.len()
    }

    pub fn slot_width(&self) -> f32 {
        self.canvas_width / self.slot_count() as f32
    }

    /// Y coordinate where the ball is considered landed
    pub fn slot_row_top(&self) -> f32 {
        self.canvas_height - self.slot_row_height
    }

    /// Fixed simulation step
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Ticks a drop needs to reach the slot row, plus one for rounding
    pub fn max_round_ticks(&self) -> u64 {
        let ticks = (self.slot_row_top() / self.ball_speed).ceil();
        if ticks.is_finite() && ticks >= 0.0 {
            // Saturating float-to-int cast
            ticks as u64 + 1
        } else {
            u64::MAX
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "plinko_config";

    /// Load a config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native builds take overrides from a file instead
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
