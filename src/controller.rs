//! Session controller
//!
//! Single owner of the board, the simulation state and the round history.
//! All mutation goes through these methods; the scheduler (browser animation
//! frames, the headless runner, tests) only feeds it elapsed time.

use crate::config::{Config, MAX_ROUND_TICKS};
use crate::consts::MAX_SUBSTEPS;
use crate::error::PlinkoError;
use crate::history::RoundHistory;
use crate::sim::{Board, RoundEvent, RoundOutcome, RoundPhase, SimulationState, parse_bet, tick};

/// Longest frame we catch up on; anything slower is treated as a stall
const MAX_FRAME_DT: f32 = 0.1;

pub struct Controller {
    board: Board,
    state: SimulationState,
    history: RoundHistory,
    accumulator: f32,
}

impl Controller {
    pub fn new(config: Config, seed: u64) -> Self {
        let state = SimulationState::new(&config, seed);
        log::info!(
            "Session started with seed {} and balance {:.2}",
            state.seed,
            state.balance
        );
        Self {
            board: Board::new(config),
            state,
            history: RoundHistory::new(),
            accumulator: 0.0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn balance(&self) -> f64 {
        self.state.balance
    }

    pub fn result_message(&self) -> String {
        self.state.result_message()
    }

    /// Validate the bet input and drop a new ball
    pub fn start_round(&mut self, bet_input: &str) -> Result<(), PlinkoError> {
        if self.state.is_dropping() {
            log::warn!("Start ignored, ball still dropping");
            return Err(PlinkoError::RoundInProgress);
        }

        let bet = parse_bet(bet_input, self.state.balance).inspect_err(|e| {
            log::warn!("Rejected bet: {}", e);
        })?;

        self.state.begin_round(bet, &self.board.config)?;
        self.accumulator = 0.0;
        log::info!("Round started: bet {:.2}, balance {:.2}", bet, self.state.balance);
        Ok(())
    }

    /// Back to idle, ball at the top. An abandoned drop costs nothing.
    pub fn reset(&mut self) {
        if self.state.is_dropping() {
            log::info!("Round abandoned at y={:.1}", self.state.ball.pos.y);
        }
        self.state.reset(&self.board.config);
        self.accumulator = 0.0;
    }

    /// Run as many fixed ticks as `frame_dt` covers.
    ///
    /// Returns the outcome if the ball landed during this frame.
    pub fn update(&mut self, frame_dt: f32) -> Option<RoundOutcome> {
        if !self.state.is_dropping() {
            self.accumulator = 0.0;
            return None;
        }

        let sim_dt = self.board.config.sim_dt();
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        let mut landed = None;
        while self.accumulator >= sim_dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= sim_dt;
            substeps += 1;
            if let Some(outcome) = tick(&mut self.state, &self.board, sim_dt) {
                landed = Some(outcome);
                break;
            }
        }

        self.drain_events();

        if let Some(outcome) = landed {
            self.accumulator = 0.0;
            self.history.record(outcome);
        }
        landed
    }

    /// Run the active round to completion without a frame clock.
    ///
    /// Gives up after the ticks the drop height allows (capped at
    /// `MAX_ROUND_TICKS`) and abandons the round, so a board the ball can
    /// never cross cannot hang the caller.
    pub fn run_to_completion(&mut self) -> Option<RoundOutcome> {
        let sim_dt = self.board.config.sim_dt();
        let limit = self.board.config.max_round_ticks().min(MAX_ROUND_TICKS);
        while self.state.is_dropping() {
            if let Some(outcome) = self.update(sim_dt) {
                return Some(outcome);
            }
            if self.state.time_ticks > limit {
                log::warn!(
                    "Round abandoned after {} ticks at y={:.1}",
                    self.state.time_ticks,
                    self.state.ball.pos.y
                );
                self.reset();
                return None;
            }
        }
        None
    }

    fn drain_events(&mut self) {
        for event in self.state.events.drain(..) {
            match event {
                RoundEvent::PegHit { peg, direction } => {
                    log::debug!("Peg {} sent ball {}", peg, if direction > 0 { "right" } else { "left" });
                }
                RoundEvent::WallBounce { direction } => {
                    log::debug!("Wall bounce, now heading {}", direction);
                }
                RoundEvent::Landed { slot } => {
                    log::debug!("Landed in slot {}", slot);
                }
            }
        }
    }
}
