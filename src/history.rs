//! Recent round history
//!
//! Session-only: kept in memory, never written to storage.

use serde::{Deserialize, Serialize};

use crate::sim::RoundOutcome;

/// Maximum number of rounds to keep
pub const MAX_HISTORY: usize = 10;

/// Most recent outcomes, newest first, plus running session totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    pub entries: Vec<RoundOutcome>,
    /// Sum of all bets this session (not just the kept entries)
    pub total_wagered: f64,
    /// Sum of `payout - bet` this session
    pub net: f64,
    pub rounds_played: u32,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round
    pub fn record(&mut self, outcome: RoundOutcome) {
        self.entries.insert(0, outcome);
        self.entries.truncate(MAX_HISTORY);
        self.total_wagered += outcome.bet;
        self.net += outcome.net();
        self.rounds_played += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&RoundOutcome> {
        self.entries.first()
    }

    /// Largest payout among the kept entries
    pub fn best_payout(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.payout).reduce(f64::max)
    }

    /// JSON dump of the history, for the debug console
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
