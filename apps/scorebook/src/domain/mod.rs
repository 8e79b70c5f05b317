//! Domain layer: pure scoring engines and the types they share.

pub mod badminton;
pub mod command;
pub mod cricket;
pub mod model;
pub mod rules;
pub mod snapshot;
pub mod stats;
pub mod transition;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_cricket;
#[cfg(test)]
mod tests_props_cricket;

// Re-exports for ergonomics
pub use badminton::{BadmintonMatch, BadmintonSetup, CourtSide, GameState, Point};
pub use command::ScoringCommand;
pub use cricket::{
    Awaiting, Ball, CricketEvent, CricketMatch, CricketSetup, DismissalKind, ExtraKind,
    InningsClose, InningsState, MatchResult, Wicket,
};
pub use model::{MatchId, MatchStatus, PlayerId, Side, Sport, Team};
pub use snapshot::{MatchRecord, MatchState};
pub use transition::{derive_match_transitions, MatchTransition};
