//! Plinko Drop - A ball-drop betting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board layout, ball physics, payouts)
//! - `controller`: Owns the simulation state and drives it with fixed ticks
//! - `renderer`: Frame drawing onto an abstract 2D surface
//! - `config`: Data-driven board and bankroll settings
//! - `history`: Recent round outcomes

pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod renderer;
pub mod sim;

pub use config::Config;
pub use controller::Controller;
pub use error::PlinkoError;
pub use history::RoundHistory;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const FRAME_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Drawing surface dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Vertical distance covered per tick
    pub const BALL_SPEED: f32 = 5.0;
    /// Horizontal drift is this fraction of the vertical speed
    pub const DRIFT_FACTOR: f32 = 0.5;

    /// Peg field
    pub const PEG_RADIUS: f32 = 5.0;
    pub const PEG_ROWS: u32 = 16;
    /// Also the y of the first row
    pub const PEG_ROW_SPACING: f32 = 40.0;

    /// Slot row along the bottom edge
    pub const SLOT_ROW_HEIGHT: f32 = 50.0;
    pub const MULTIPLIERS: [f64; 11] = [0.5, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 50.0];
    pub const SLOT_COUNT: usize = MULTIPLIERS.len();

    /// Bankroll at the start of every session
    pub const STARTING_BALANCE: f64 = 100.0;
}

/// Format a money amount the way the balance and result displays show it
#[inline]
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
