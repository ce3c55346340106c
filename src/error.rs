//! Error types

use std::fmt;

/// Everything that can stop a round from starting or a config from loading
#[derive(Debug, Clone, PartialEq)]
pub enum PlinkoError {
    /// Bet did not parse as a finite number in `(0, balance]`
    InvalidBet { input: String, balance: f64 },
    /// A start request arrived while the ball is still dropping
    RoundInProgress,
    /// Config override failed to parse or describes an unusable board
    InvalidConfig(String),
}

impl PlinkoError {
    /// Message suitable for showing to the player
    pub fn user_message(&self) -> &'static str {
        match self {
            PlinkoError::InvalidBet { .. } => "Please enter a valid bet amount.",
            PlinkoError::RoundInProgress => "Wait for the ball to land.",
            PlinkoError::InvalidConfig(_) => "Board configuration is invalid.",
        }
    }
}

impl fmt::Display for PlinkoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlinkoError::InvalidBet { input, balance } => {
                write!(f, "invalid bet {:?} (balance {:.2})", input, balance)
            }
            PlinkoError::RoundInProgress => write!(f, "a round is already in progress"),
            PlinkoError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for PlinkoError {}

impl From<serde_json::Error> for PlinkoError {
    fn from(err: serde_json::Error) -> Self {
        PlinkoError::InvalidConfig(err.to_string())
    }
}
