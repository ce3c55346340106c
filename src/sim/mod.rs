//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pegs in layout order)
//! - No rendering or platform dependencies

pub mod bet;
pub mod board;
pub mod state;
pub mod tick;

pub use bet::{parse_bet, validate_bet};
pub use board::{Board, Peg, Slot, generate_pegs, generate_slots};
pub use state::{Ball, RoundEvent, RoundOutcome, RoundPhase, SimulationState};
pub use tick::tick;
