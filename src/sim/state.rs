//! Round state and core simulation types
//!
//! Everything that changes during a session lives in `SimulationState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bet::validate_bet;
use crate::config::Config;
use crate::error::PlinkoError;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No ball in play, waiting for a bet
    Idle,
    /// Ball descending through the pegs
    Dropping,
    /// Ball landed, payout applied, loop halted
    Resolved,
}

/// The falling ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal drift: -1 left, 0 straight down, 1 right
    pub direction: i8,
}

impl Ball {
    /// Ball at top-center, falling straight
    pub fn at_start(config: &Config) -> Self {
        Self {
            pos: Vec2::new(config.canvas_width / 2.0, 0.0),
            radius: config.ball_radius,
            direction: 0,
        }
    }

    /// Flip horizontal drift (wall contact)
    pub fn reflect(&mut self) {
        self.direction = -self.direction;
    }
}

/// Result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub bet: f64,
    pub slot_index: usize,
    pub multiplier: f64,
    /// Gross winnings, `bet * multiplier`
    pub payout: f64,
    pub balance_after: f64,
}

impl RoundOutcome {
    /// Change to the balance, `payout - bet`
    pub fn net(&self) -> f64 {
        self.payout - self.bet
    }
}

/// Things that happened during a tick (for logging and effects)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    /// Ball came within reach of a peg and picked a new direction
    PegHit { peg: usize, direction: i8 },
    /// Ball touched a side wall and bounced
    WallBounce { direction: i8 },
    /// Ball reached the slot row
    Landed { slot: usize },
}

/// Complete session state (ball, bankroll, RNG)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: RoundPhase,
    pub ball: Ball,
    pub balance: f64,
    /// Stake of the active round (0 when idle)
    pub bet: f64,
    /// Ticks elapsed in the active round
    pub time_ticks: u64,
    /// Set on resolution, cleared on reset
    pub outcome: Option<RoundOutcome>,
    /// Events raised since the last drain
    pub events: Vec<RoundEvent>,
    rng: Pcg32,
}

impl SimulationState {
    /// Fresh session with the configured starting balance
    pub fn new(config: &Config, seed: u64) -> Self {
        Self {
            seed,
            phase: RoundPhase::Idle,
            ball: Ball::at_start(config),
            balance: config.starting_balance,
            bet: 0.0,
            time_ticks: 0,
            outcome: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Idle -> Dropping with an already parsed bet.
    ///
    /// A resolved round is cleared first. The balance is not touched until
    /// the ball lands.
    pub fn begin_round(&mut self, bet: f64, config: &Config) -> Result<(), PlinkoError> {
        if self.phase == RoundPhase::Dropping {
            return Err(PlinkoError::RoundInProgress);
        }
        let bet = validate_bet(bet, self.balance)?;

        self.reset(config);
        self.bet = bet;
        self.phase = RoundPhase::Dropping;
        Ok(())
    }

    /// Any phase -> Idle. Abandons a drop in progress without charging the bet.
    pub fn reset(&mut self, config: &Config) {
        self.phase = RoundPhase::Idle;
        self.ball = Ball::at_start(config);
        self.bet = 0.0;
        self.time_ticks = 0;
        self.outcome = None;
        self.events.clear();
    }

    /// Text for the result display (empty until the ball lands)
    pub fn result_message(&self) -> String {
        match self.outcome {
            Some(outcome) => format!("You won {}!", crate::format_amount(outcome.payout)),
            None => String::new(),
        }
    }

    pub fn is_dropping(&self) -> bool {
        self.phase == RoundPhase::Dropping
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
