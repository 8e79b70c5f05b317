//! Badminton rules engine.
//!
//! Rally-point scoring to 21 with a two-point lead, capped by a golden point
//! at 29-29. The point log is the source of truth: every public transition
//! returns a new `BadmintonMatch`, and undo replays the log minus its last
//! point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::model::{validate_teams, MatchStatus, Side, Team};
use crate::domain::rules::{
    games_to_win, is_game_won, opening_server, validate_best_of, BADMINTON_MAX_PLAYERS,
    BADMINTON_MIN_PLAYERS, DEUCE_FLOOR, GOLDEN_POINT_SCORE,
};
use crate::errors::domain::DomainError;

/// Format and participants, fixed for the lifetime of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadmintonSetup {
    pub teams: [Team; 2],
    /// 1, 3 or 5.
    pub best_of: u8,
    /// Serves first in game 1.
    pub first_server: Side,
}

/// Service court, from the server's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtSide {
    Right,
    Left,
}

impl CourtSide {
    /// Right court on an even score, left on an odd score.
    #[inline]
    pub fn for_score(score: u8) -> Self {
        if score % 2 == 0 {
            CourtSide::Right
        } else {
            CourtSide::Left
        }
    }
}

/// A single rally, won by `winner`. `seq` is 1-based within `game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub game: u8,
    pub seq: u16,
    pub winner: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 1-based game number.
    pub number: u8,
    /// Indexed by `Side::index()`.
    pub score: [u8; 2],
    pub server: Side,
    pub server_court: CourtSide,
    pub is_deuce: bool,
    pub is_golden_point: bool,
    pub winner: Option<Side>,
}

impl GameState {
    fn opening(number: u8, server: Side) -> Self {
        Self {
            number,
            score: [0, 0],
            server,
            server_court: CourtSide::for_score(0),
            is_deuce: false,
            is_golden_point: false,
            winner: None,
        }
    }

    #[inline]
    pub fn score_of(&self, side: Side) -> u8 {
        self.score[side.index()]
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn points_played(&self) -> u16 {
        self.score[0] as u16 + self.score[1] as u16
    }
}

/// Derived match state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadmintonState {
    pub status: MatchStatus,
    /// Closed games in order, followed by the game in progress (if any).
    pub games: Vec<GameState>,
    pub games_won: [u8; 2],
    pub winner: Option<Side>,
}

impl BadmintonState {
    fn opening(first_server: Side) -> Self {
        Self {
            status: MatchStatus::Setup,
            games: vec![GameState::opening(1, first_server)],
            games_won: [0, 0],
            winner: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadmintonMatch {
    setup: BadmintonSetup,
    points: Vec<Point>,
    state: BadmintonState,
}

impl BadmintonMatch {
    /// Validate the setup and open game 1 at 0-0.
    pub fn new(setup: BadmintonSetup) -> Result<Self, DomainError> {
        validate_best_of(setup.best_of)?;
        validate_teams(&setup.teams, BADMINTON_MIN_PLAYERS, BADMINTON_MAX_PLAYERS)?;
        let state = BadmintonState::opening(setup.first_server);
        Ok(Self {
            setup,
            points: Vec::new(),
            state,
        })
    }

    /// Rebuild a match by folding `points` over a fresh setup.
    pub fn replay(setup: BadmintonSetup, points: &[Point]) -> Result<Self, DomainError> {
        let mut m = Self::new(setup)?;
        for point in points {
            m.apply(*point)?;
        }
        Ok(m)
    }

    /// Award the current rally to `side`.
    pub fn record_point(&self, side: Side) -> Result<Self, DomainError> {
        let game = self.require_open_game()?;
        let point = Point {
            game: game.number,
            seq: game.points_played() + 1,
            winner: side,
        };
        let mut next = self.clone();
        next.apply(point)?;
        Ok(next)
    }

    /// Remove the most recent point and recompute state from the remaining log.
    ///
    /// Rejected when no point exists, or when the last point closed its game
    /// (history never crosses a game boundary backwards).
    pub fn undo_last_point(&self) -> Result<Self, DomainError> {
        let Some(last) = self.points.last() else {
            return Err(DomainError::undo_unavailable("no points recorded"));
        };
        let closed = self
            .state
            .games
            .get(last.game.saturating_sub(1) as usize)
            .is_some_and(GameState::is_closed);
        if closed {
            return Err(DomainError::undo_unavailable(format!(
                "last point belongs to closed game {}",
                last.game
            )));
        }
        Self::replay(self.setup.clone(), &self.points[..self.points.len() - 1])
    }

    pub fn setup(&self) -> &BadmintonSetup {
        &self.setup
    }

    pub fn state(&self) -> &BadmintonState {
        &self.state
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    /// The game in progress, or the final game once the match is completed.
    pub fn current_game(&self) -> &GameState {
        // `games` is never empty: game 1 is opened in `new`.
        &self.state.games[self.state.games.len() - 1]
    }

    /// Side on serve; `None` once the match is completed.
    pub fn on_serve(&self) -> Option<Side> {
        match self.state.status {
            MatchStatus::Completed => None,
            _ => Some(self.current_game().server),
        }
    }

    fn games_to_win(&self) -> Result<u8, DomainError> {
        games_to_win(self.setup.best_of).ok_or_else(|| {
            DomainError::malformed_format(format!("unsupported best_of {}", self.setup.best_of))
        })
    }

    fn require_open_game(&self) -> Result<&GameState, DomainError> {
        if self.state.status == MatchStatus::Completed {
            return Err(DomainError::invalid_event("match already completed"));
        }
        let game = self.current_game();
        if game.is_closed() {
            return Err(DomainError::invalid_event(format!(
                "no game in progress (game {} is closed)",
                game.number
            )));
        }
        Ok(game)
    }

    fn apply(&mut self, point: Point) -> Result<(), DomainError> {
        let target = self.games_to_win()?;
        let game = self.require_open_game()?;
        let expected_seq = game.points_played() + 1;
        if point.game != game.number || point.seq != expected_seq {
            return Err(DomainError::invalid_event(format!(
                "point {}/{} out of order, expected {}/{}",
                point.game, point.seq, game.number, expected_seq
            )));
        }
        award_point(&mut self.state, point.winner, target);
        self.points.push(point);
        Ok(())
    }
}

/// Apply one rally to the game in progress and roll the match forward.
fn award_point(state: &mut BadmintonState, side: Side, games_to_win: u8) {
    let last = state.games.len() - 1;
    let game = &mut state.games[last];

    game.score[side.index()] += 1;
    // Rally point: the scorer serves next, from the court matching their score parity.
    game.server = side;
    let own = game.score_of(side);
    let other = game.score_of(side.opponent());
    game.server_court = CourtSide::for_score(own);

    if is_game_won(own, other) {
        game.winner = Some(side);
        game.is_deuce = false;
        game.is_golden_point = false;
    } else {
        game.is_deuce = own.min(other) >= DEUCE_FLOOR;
        game.is_golden_point = own == GOLDEN_POINT_SCORE && other == GOLDEN_POINT_SCORE;
    }

    state.status = MatchStatus::Ongoing;

    let Some(winner) = game.winner else {
        return;
    };
    let number = game.number;
    debug!(game = number, winner = ?winner, score = ?game.score, "badminton game completed");

    state.games_won[winner.index()] += 1;
    if state.games_won[winner.index()] >= games_to_win {
        state.winner = Some(winner);
        state.status = MatchStatus::Completed;
        debug!(winner = ?winner, games_won = ?state.games_won, "badminton match completed");
        return;
    }

    let next_no = number + 1;
    state
        .games
        .push(GameState::opening(next_no, opening_server(next_no, winner)));
}
