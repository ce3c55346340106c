// End-to-end rounds through the public controller API (native, no browser).

use plinko_drop::consts::SIM_DT;
use plinko_drop::sim::RoundPhase;
use plinko_drop::{Config, Controller, PlinkoError};

#[test]
fn overdrawn_bet_is_rejected() {
    let mut controller = Controller::new(Config::default(), 1);
    let err = controller.start_round("150").unwrap_err();
    assert!(matches!(err, PlinkoError::InvalidBet { .. }));
    assert_eq!(controller.phase(), RoundPhase::Idle);
    assert_eq!(controller.balance(), 100.0);
}

#[test]
fn round_settles_balance_by_landing_slot() {
    let mut controller = Controller::new(Config::default(), 2024);
    controller.start_round("10").unwrap();

    // Frames at roughly 60 Hz with jitter
    let frames = [SIM_DT, SIM_DT * 1.3, SIM_DT * 0.7, SIM_DT * 2.0];
    let mut outcome = None;
    for frame in frames.iter().cycle().take(1_000) {
        if let Some(o) = controller.update(*frame) {
            outcome = Some(o);
            break;
        }
        assert_eq!(controller.balance(), 100.0);
    }

    let outcome = outcome.expect("ball should land");
    let multiplier = controller.board().slots[outcome.slot_index].multiplier;
    assert_eq!(outcome.multiplier, multiplier);
    assert_eq!(outcome.payout, 10.0 * multiplier);
    assert_eq!(controller.balance(), 100.0 + 10.0 * multiplier - 10.0);
    assert_eq!(controller.phase(), RoundPhase::Resolved);
}

#[test]
fn same_seed_same_landing() {
    let play = |seed| {
        let mut controller = Controller::new(Config::default(), seed);
        let mut slots = Vec::new();
        for _ in 0..3 {
            controller.start_round("1").unwrap();
            slots.push(controller.run_to_completion().unwrap().slot_index);
        }
        slots
    };
    assert_eq!(play(7), play(7));
}

#[test]
fn config_override_changes_bankroll() {
    let config = Config::from_json(r#"{ "starting_balance": 500.0 }"#).unwrap();
    let mut controller = Controller::new(config, 3);
    controller.start_round("150").unwrap();
    assert_eq!(controller.phase(), RoundPhase::Dropping);
}

#[test]
fn history_tracks_session() {
    let mut controller = Controller::new(Config::default(), 9);
    for _ in 0..3 {
        controller.start_round("1").unwrap();
        controller.run_to_completion();
    }
    let history = controller.history();
    assert_eq!(history.rounds_played, 3);
    assert_eq!(history.total_wagered, 3.0);
    assert!((controller.balance() - (100.0 + history.net)).abs() < 1e-9);
    let best = history.entries.iter().map(|e| e.payout).fold(0.0, f64::max);
    assert_eq!(history.best_payout(), Some(best));
}
