//! Bet parsing and validation
//!
//! A bet is accepted only when `0 < bet <= balance`.

use crate::error::PlinkoError;

/// Parse the bet input field and check it against the balance
pub fn parse_bet(input: &str, balance: f64) -> Result<f64, PlinkoError> {
    let invalid = || PlinkoError::InvalidBet {
        input: input.to_string(),
        balance,
    };
    let amount: f64 = input.trim().parse().map_err(|_| invalid())?;
    validate_bet(amount, balance).map_err(|_| invalid())
}

/// Check an already numeric bet against the balance
pub fn validate_bet(amount: f64, balance: f64) -> Result<f64, PlinkoError> {
    // NaN fails every comparison, so it lands in the error branch
    if amount.is_finite() && amount > 0.0 && amount <= balance {
        Ok(amount)
    } else {
        Err(PlinkoError::InvalidBet {
            input: amount.to_string(),
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_bets() {
        assert_eq!(parse_bet("10", 100.0), Ok(10.0));
        assert_eq!(parse_bet(" 2.5 ", 100.0), Ok(2.5));
        // Whole balance is allowed
        assert_eq!(parse_bet("100", 100.0), Ok(100.0));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", "abc", "0", "-5", "150", "NaN", "inf", "10 coins"] {
            let err = parse_bet(input, 100.0).unwrap_err();
            assert_eq!(
                err,
                PlinkoError::InvalidBet {
                    input: input.to_string(),
                    balance: 100.0
                },
                "input {:?} should be rejected",
                input
            );
        }
    }

    proptest! {
        #[test]
        fn prop_in_range_bets_accepted(balance in 0.01f64..1_000_000.0, frac in 0.0001f64..=1.0) {
            let bet = balance * frac;
            prop_assume!(bet > 0.0);
            prop_assert_eq!(validate_bet(bet, balance), Ok(bet));
        }

        #[test]
        fn prop_out_of_range_bets_rejected(balance in 0.0f64..1_000.0, bet in -1_000.0f64..2_000.0) {
            prop_assume!(bet <= 0.0 || bet > balance);
            prop_assert!(validate_bet(bet, balance).is_err());
        }
    }
}
