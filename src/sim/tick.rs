//! Fixed timestep simulation tick
//!
//! Advances a dropping ball by one step and resolves the payout when it
//! reaches the slot row.

use rand::Rng;

use super::board::Board;
use super::state::{RoundEvent, RoundOutcome, RoundPhase, SimulationState};
use crate::consts::DRIFT_FACTOR;

/// Advance the round by one timestep.
///
/// Returns the outcome on the tick the ball lands. Idle and resolved rounds
/// are left untouched.
pub fn tick(state: &mut SimulationState, board: &Board, dt: f32) -> Option<RoundOutcome> {
    if state.phase != RoundPhase::Dropping {
        return None;
    }

    state.time_ticks += 1;

    // One tick at the configured step covers exactly `ball_speed`
    let step = board.config.ball_speed * (dt / board.config.sim_dt());
    move_ball(state, board, step);
    check_slot_collision(state, board)
}

/// Fall, react to pegs, drift sideways, bounce off the walls
fn move_ball(state: &mut SimulationState, board: &Board, step: f32) {
    state.ball.pos.y += step;

    // Every peg in reach re-rolls the direction; the last one in layout
    // order decides.
    for (i, peg) in board.pegs.iter().enumerate() {
        let reach = state.ball.radius + peg.radius;
        if state.ball.pos.distance(peg.pos) < reach {
            let direction = if state.rng().random_bool(0.5) { 1 } else { -1 };
            state.ball.direction = direction;
            state.events.push(RoundEvent::PegHit { peg: i, direction });
            log::trace!("Peg {} hit at {:?}, direction {}", i, peg.pos, direction);
        }
    }

    state.ball.pos.x += state.ball.direction as f32 * step * DRIFT_FACTOR;

    let min_x = state.ball.radius;
    let max_x = board.config.canvas_width - state.ball.radius;
    if state.ball.pos.x < min_x || state.ball.pos.x > max_x {
        state.ball.reflect();
        state.ball.pos.x = state.ball.pos.x.clamp(min_x, max_x);
        state.events.push(RoundEvent::WallBounce {
            direction: state.ball.direction,
        });
    }
}

/// Resolve the round once the ball reaches the slot row
fn check_slot_collision(state: &mut SimulationState, board: &Board) -> Option<RoundOutcome> {
    if state.ball.pos.y < board.config.slot_row_top() {
        return None;
    }

    let slot_index = board.slot_index_at(state.ball.pos.x);
    let multiplier = board.slots[slot_index].multiplier;
    let payout = state.bet * multiplier;
    state.balance = state.balance + payout - state.bet;

    let outcome = RoundOutcome {
        bet: state.bet,
        slot_index,
        multiplier,
        payout,
        balance_after: state.balance,
    };

    state.outcome = Some(outcome);
    state.phase = RoundPhase::Resolved;
    state.events.push(RoundEvent::Landed { slot: slot_index });

    log::info!(
        "Ball landed in slot {} ({}x) after {} ticks: bet {:.2}, payout {:.2}, balance {:.2}",
        slot_index,
        multiplier,
        state.time_ticks,
        outcome.bet,
        payout,
        state.balance
    );

    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::sim::board::Peg;
    use glam::Vec2;
    use proptest::prelude::*;

    fn dropping_state(board: &Board, seed: u64, bet: f64) -> SimulationState {
        let mut state = SimulationState::new(&board.config, seed);
        state.begin_round(bet, &board.config).unwrap();
        state
    }

    /// Tick until resolved, bounded so a broken loop fails instead of hanging
    fn run_round(state: &mut SimulationState, board: &Board) -> RoundOutcome {
        for _ in 0..10_000 {
            if let Some(outcome) = tick(state, board, SIM_DT) {
                return outcome;
            }
        }
        panic!("round never resolved");
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let board = Board::new(Config::default());
        let mut state = SimulationState::new(&board.config, 7);
        let before = state.ball;
        assert!(tick(&mut state, &board, SIM_DT).is_none());
        assert_eq!(state.ball, before);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_tick_moves_ball_down_by_speed() {
        let board = Board::new(Config::default());
        let mut state = dropping_state(&board, 7, 10.0);
        tick(&mut state, &board, SIM_DT);
        assert_eq!(state.ball.pos.y, 5.0);
        // Nothing near the top center, still falling straight
        assert_eq!(state.ball.pos.x, 400.0);
        assert_eq!(state.ball.direction, 0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let board = Board::new(Config::default());
        let mut state = dropping_state(&board, 7, 10.0);
        // Clear of pegs: nearest are (20, 280) and (30, 320)
        state.ball.pos = Vec2::new(11.0, 300.0);
        state.ball.direction = -1;

        tick(&mut state, &board, SIM_DT);

        assert_eq!(state.ball.direction, 1);
        assert_eq!(state.ball.pos.x, 10.0);
        assert!(state.events.contains(&RoundEvent::WallBounce { direction: 1 }));
    }

    #[test]
    fn test_last_peg_in_reach_decides_direction() {
        let config = Config::default();
        let mut board = Board::new(config);
        board.pegs = vec![
            Peg { pos: Vec2::new(395.0, 105.0), radius: 5.0 },
            Peg { pos: Vec2::new(405.0, 105.0), radius: 5.0 },
        ];
        let mut state = dropping_state(&board, 3, 10.0);
        state.ball.pos = Vec2::new(400.0, 100.0);

        tick(&mut state, &board, SIM_DT);

        let hits: Vec<i8> = state
            .events
            .iter()
            .filter_map(|e| match e {
                RoundEvent::PegHit { direction, .. } => Some(*direction),
                _ => None,
            })
            .collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(state.ball.direction, hits[1]);
    }

    #[test]
    fn test_landing_in_slot_six_pays_ten_times() {
        let board = Board::new(Config::default());
        let mut state = dropping_state(&board, 11, 10.0);
        let slot = board.slots[6];
        state.ball.pos = Vec2::new(slot.center_x(), 549.0);

        let outcome = tick(&mut state, &board, SIM_DT).expect("should land");

        assert_eq!(outcome.slot_index, 6);
        assert_eq!(outcome.multiplier, 10.0);
        assert_eq!(outcome.payout, 100.0);
        assert_eq!(outcome.balance_after, 190.0);
        assert_eq!(state.balance, 190.0);
        assert_eq!(state.phase, RoundPhase::Resolved);
        assert_eq!(state.result_message(), "You won 100.00!");
        assert!(state.events.contains(&RoundEvent::Landed { slot: 6 }));
    }

    #[test]
    fn test_resolved_round_stops_ticking() {
        let board = Board::new(Config::default());
        let mut state = dropping_state(&board, 5, 1.0);
        run_round(&mut state, &board);
        let balance = state.balance;
        let ball = state.ball;
        assert!(tick(&mut state, &board, SIM_DT).is_none());
        assert_eq!(state.balance, balance);
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_balance_unchanged_until_landing() {
        let board = Board::new(Config::default());
        let mut state = dropping_state(&board, 21, 25.0);
        while state.phase == RoundPhase::Dropping {
            let landed = tick(&mut state, &board, SIM_DT).is_some();
            if !landed {
                assert_eq!(state.balance, 100.0);
            }
        }
        let outcome = state.outcome.unwrap();
        assert_eq!(state.balance, 100.0 + outcome.payout - 25.0);
    }

    #[test]
    fn test_determinism() {
        let board = Board::new(Config::default());
        let mut a = dropping_state(&board, 99999, 10.0);
        let mut b = dropping_state(&board, 99999, 10.0);
        let oa = run_round(&mut a, &board);
        let ob = run_round(&mut b, &board);
        assert_eq!(oa, ob);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_within_walls(seed in any::<u64>()) {
            let board = Board::new(Config::default());
            let mut state = dropping_state(&board, seed, 10.0);
            let r = board.config.ball_radius;
            let max_x = board.config.canvas_width - r;
            let mut ticks = 0;
            while state.phase == RoundPhase::Dropping {
                tick(&mut state, &board, SIM_DT);
                prop_assert!(state.ball.pos.x >= r && state.ball.pos.x <= max_x);
                ticks += 1;
                prop_assert!(ticks <= 200);
            }
            let outcome = state.outcome.unwrap();
            prop_assert!(outcome.slot_index < board.slots.len());
        }
    }
}
