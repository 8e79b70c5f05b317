//! Caller-facing scoring inputs and their routing onto the engines.

use serde::{Deserialize, Serialize};

use crate::domain::cricket::{DismissalKind, ExtraKind, Wicket};
use crate::domain::model::{PlayerId, Side, Sport};
use crate::domain::snapshot::MatchState;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScoringCommand {
    // Badminton
    RecordPoint {
        side: Side,
    },
    UndoLastPoint,

    // Cricket
    SelectOpeners {
        striker: PlayerId,
        non_striker: PlayerId,
    },
    SelectBowler {
        bowler: PlayerId,
    },
    SelectNewBatter {
        batter: PlayerId,
    },
    RecordBall {
        runs: u8,
        #[serde(default)]
        extra: Option<ExtraKind>,
    },
    RecordWicket {
        kind: DismissalKind,
        #[serde(default)]
        fielder: Option<PlayerId>,
    },
    RecordDelivery {
        runs: u8,
        #[serde(default)]
        extra: Option<ExtraKind>,
        #[serde(default)]
        wicket: Option<Wicket>,
    },
    UndoLastBall,
}

impl ScoringCommand {
    pub fn sport(&self) -> Sport {
        match self {
            ScoringCommand::RecordPoint { .. } | ScoringCommand::UndoLastPoint => Sport::Badminton,
            _ => Sport::Cricket,
        }
    }

    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScoringCommand::RecordPoint { .. } => "record_point",
            ScoringCommand::UndoLastPoint => "undo_last_point",
            ScoringCommand::SelectOpeners { .. } => "select_openers",
            ScoringCommand::SelectBowler { .. } => "select_bowler",
            ScoringCommand::SelectNewBatter { .. } => "select_new_batter",
            ScoringCommand::RecordBall { .. } => "record_ball",
            ScoringCommand::RecordWicket { .. } => "record_wicket",
            ScoringCommand::RecordDelivery { .. } => "record_delivery",
            ScoringCommand::UndoLastBall => "undo_last_ball",
        }
    }

    pub fn is_undo(&self) -> bool {
        matches!(
            self,
            ScoringCommand::UndoLastPoint | ScoringCommand::UndoLastBall
        )
    }
}

impl MatchState {
    /// Apply one command, returning the next state. `self` is left untouched
    /// on rejection.
    pub fn apply(&self, command: &ScoringCommand) -> Result<MatchState, DomainError> {
        match (self, command) {
            (MatchState::Badminton(m), ScoringCommand::RecordPoint { side }) => {
                m.record_point(*side).map(Into::into)
            }
            (MatchState::Badminton(m), ScoringCommand::UndoLastPoint) => {
                m.undo_last_point().map(Into::into)
            }
            (
                MatchState::Cricket(m),
                ScoringCommand::SelectOpeners {
                    striker,
                    non_striker,
                },
            ) => m
                .select_openers(striker.clone(), non_striker.clone())
                .map(Into::into),
            (MatchState::Cricket(m), ScoringCommand::SelectBowler { bowler }) => {
                m.select_bowler(bowler.clone()).map(Into::into)
            }
            (MatchState::Cricket(m), ScoringCommand::SelectNewBatter { batter }) => {
                m.select_new_batter(batter.clone()).map(Into::into)
            }
            (MatchState::Cricket(m), ScoringCommand::RecordBall { runs, extra }) => {
                m.record_ball(*runs, *extra).map(Into::into)
            }
            (MatchState::Cricket(m), ScoringCommand::RecordWicket { kind, fielder }) => {
                m.record_wicket(*kind, fielder.clone()).map(Into::into)
            }
            (
                MatchState::Cricket(m),
                ScoringCommand::RecordDelivery {
                    runs,
                    extra,
                    wicket,
                },
            ) => m
                .record_delivery(*runs, *extra, wicket.clone())
                .map(Into::into),
            (MatchState::Cricket(m), ScoringCommand::UndoLastBall) => {
                m.undo_last_ball().map(Into::into)
            }
            (state, command) => Err(DomainError::invalid_event(format!(
                "{} is not a {} command",
                command.name(),
                state.sport()
            ))),
        }
    }
}
