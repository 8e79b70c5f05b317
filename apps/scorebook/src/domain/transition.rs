// apps/scorebook/src/domain/transition.rs

use serde::Serialize;

use crate::domain::badminton::BadmintonMatch;
use crate::domain::cricket::{Awaiting, CricketMatch, InningsClose};
use crate::domain::model::{MatchStatus, Side};
use crate::domain::snapshot::MatchState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchTransition {
    /// Edge-triggered: Setup -> Ongoing (first scoring event)
    MatchStarted,

    /// Edge-triggered: service passed to the other side
    ServerChanged { side: Side },

    /// Edge-triggered: a badminton game got its winner
    GameCompleted { game: u8, winner: Side },

    /// Edge-triggered: a cricket innings closed
    InningsClosed { innings: u8, reason: InningsClose },

    /// Edge-triggered: play is blocked on a caller selection
    InputRequired { awaiting: Awaiting },

    /// Edge-triggered: !Completed -> Completed
    MatchCompleted,
}

/// Derive transitions from a before/after pair of the same match.
///
/// Pairs of different sports yield nothing.
pub fn derive_match_transitions(before: &MatchState, after: &MatchState) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    // 1. Start
    if before.status() == MatchStatus::Setup && after.status() != MatchStatus::Setup {
        transitions.push(MatchTransition::MatchStarted);
    }

    // 2. Sport-specific edges
    match (before, after) {
        (MatchState::Badminton(b), MatchState::Badminton(a)) => {
            badminton_edges(b, a, &mut transitions)
        }
        (MatchState::Cricket(b), MatchState::Cricket(a)) => cricket_edges(b, a, &mut transitions),
        _ => return Vec::new(),
    }

    // 3. Completion
    if before.status() != MatchStatus::Completed && after.status() == MatchStatus::Completed {
        transitions.push(MatchTransition::MatchCompleted);
    }

    transitions
}

fn badminton_edges(before: &BadmintonMatch, after: &BadmintonMatch, out: &mut Vec<MatchTransition>) {
    for game in &after.state().games {
        let was_closed = before
            .state()
            .games
            .get(game.number.saturating_sub(1) as usize)
            .is_some_and(|g| g.is_closed());
        if let (Some(winner), false) = (game.winner, was_closed) {
            out.push(MatchTransition::GameCompleted {
                game: game.number,
                winner,
            });
        }
    }

    if let Some(side) = after.on_serve() {
        if before.on_serve() != Some(side) {
            out.push(MatchTransition::ServerChanged { side });
        }
    }
}

fn cricket_edges(before: &CricketMatch, after: &CricketMatch, out: &mut Vec<MatchTransition>) {
    for innings in &after.state().innings {
        let was_closed = before
            .innings(innings.number)
            .is_some_and(|i| i.is_closed());
        if let (Some(reason), false) = (innings.closed, was_closed) {
            out.push(MatchTransition::InningsClosed {
                innings: innings.number,
                reason,
            });
        }
    }

    match after.awaiting() {
        Some(Awaiting::Delivery) | None => {}
        Some(awaiting) => {
            let same_innings = before.current_innings().number == after.current_innings().number;
            if !same_innings || before.awaiting() != Some(awaiting) {
                out.push(MatchTransition::InputRequired { awaiting });
            }
        }
    }
}
