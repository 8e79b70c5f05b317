//! Sport constants and format rules shared by the engines and config.

use crate::domain::model::Side;
use crate::errors::domain::DomainError;

// Badminton (rally-point, 21 with golden point at 29-29)
pub const GAME_POINT: u8 = 21;
pub const WINNING_MARGIN: u8 = 2;
pub const DEUCE_FLOOR: u8 = 20;
pub const GOLDEN_POINT_SCORE: u8 = 29;
pub const POINT_CAP: u8 = 30;
pub const SUPPORTED_BEST_OF: [u8; 3] = [1, 3, 5];
pub const BADMINTON_MIN_PLAYERS: usize = 1;
pub const BADMINTON_MAX_PLAYERS: usize = 2;

// Cricket
pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS: u8 = 10;
pub const MIN_OVERS: u8 = 1;
pub const MAX_OVERS: u8 = 50;
pub const MAX_RUNS_PER_DELIVERY: u8 = 7;
pub const CRICKET_MIN_PLAYERS: usize = 11;
pub const CRICKET_MAX_PLAYERS: usize = 15;

/// Games needed to win a best-of-N match (`ceil(N/2)`), for supported N only.
pub fn games_to_win(best_of: u8) -> Option<u8> {
    if SUPPORTED_BEST_OF.contains(&best_of) {
        Some(best_of.div_ceil(2))
    } else {
        None
    }
}

pub fn validate_best_of(best_of: u8) -> Result<u8, DomainError> {
    games_to_win(best_of).ok_or_else(|| {
        DomainError::malformed_format(format!(
            "best_of must be one of {SUPPORTED_BEST_OF:?}, got {best_of}"
        ))
    })
}

pub fn validate_overs(overs: u8) -> Result<(), DomainError> {
    if (MIN_OVERS..=MAX_OVERS).contains(&overs) {
        Ok(())
    } else {
        Err(DomainError::malformed_format(format!(
            "overs_per_innings must be within {MIN_OVERS}..={MAX_OVERS}, got {overs}"
        )))
    }
}

/// Legal deliveries available in one innings.
#[inline]
pub fn max_legal_balls(overs_per_innings: u8) -> u32 {
    overs_per_innings as u32 * BALLS_PER_OVER
}

/// A game is decided at 21+ with a two-point lead, or at the 30-point cap.
#[inline]
pub fn is_game_won(own: u8, other: u8) -> bool {
    (own >= GAME_POINT && own >= other + WINNING_MARGIN) || own == POINT_CAP
}

/// Server at 0-0 of game `game_no` (1-based, `>= 2`).
///
/// Game 2 → loser of game 1, game 3 → winner of game 2, alternating
/// thereafter (even games: previous loser, odd games: previous winner).
#[inline]
pub fn opening_server(game_no: u8, previous_winner: Side) -> Side {
    debug_assert!(game_no >= 2, "game 1 server is part of the match setup");
    if game_no % 2 == 0 {
        previous_winner.opponent()
    } else {
        previous_winner
    }
}
