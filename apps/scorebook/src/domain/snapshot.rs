//! Persisted form of a match: a sport-tagged engine plus record metadata.
//!
//! The engines serialize their setup, event log and derived state together.
//! Only the setup and log are authoritative; `reconcile` rebuilds the derived
//! part from them so a stale or hand-edited document cannot drift.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::badminton::BadmintonMatch;
use crate::domain::cricket::CricketMatch;
use crate::domain::model::{MatchId, MatchStatus, Side, Sport, Team};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", content = "data", rename_all = "snake_case")]
pub enum MatchState {
    Badminton(BadmintonMatch),
    Cricket(CricketMatch),
}

impl MatchState {
    pub fn sport(&self) -> Sport {
        match self {
            MatchState::Badminton(_) => Sport::Badminton,
            MatchState::Cricket(_) => Sport::Cricket,
        }
    }

    pub fn status(&self) -> MatchStatus {
        match self {
            MatchState::Badminton(m) => m.status(),
            MatchState::Cricket(m) => m.status(),
        }
    }

    pub fn teams(&self) -> &[Team; 2] {
        match self {
            MatchState::Badminton(m) => &m.setup().teams,
            MatchState::Cricket(m) => &m.setup().teams,
        }
    }

    /// Winning side once completed. A tied cricket match has none.
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchState::Badminton(m) => m.winner(),
            MatchState::Cricket(m) => m.result().and_then(|r| r.winner()),
        }
    }

    /// Number of entries in the event log.
    pub fn event_count(&self) -> usize {
        match self {
            MatchState::Badminton(m) => m.points().len(),
            MatchState::Cricket(m) => m.events().len(),
        }
    }

    /// Replay the stored log from its setup.
    ///
    /// Returns the replayed state and whether it differed from `self`. A log
    /// that no longer replays (bad setup, out-of-order event) is an error.
    pub fn reconcile(&self) -> Result<(MatchState, bool), DomainError> {
        let replayed = match self {
            MatchState::Badminton(m) => {
                MatchState::Badminton(BadmintonMatch::replay(m.setup().clone(), m.points())?)
            }
            MatchState::Cricket(m) => {
                MatchState::Cricket(CricketMatch::replay(m.setup().clone(), m.events())?)
            }
        };
        let drifted = &replayed != self;
        Ok((replayed, drifted))
    }
}

impl From<BadmintonMatch> for MatchState {
    fn from(m: BadmintonMatch) -> Self {
        MatchState::Badminton(m)
    }
}

impl From<CricketMatch> for MatchState {
    fn from(m: CricketMatch) -> Self {
        MatchState::Cricket(m)
    }
}

/// What the caller persists: the match plus identity, timestamps and a
/// version that increments on every accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub version: u64,
    pub state: MatchState,
}

impl MatchRecord {
    pub fn new(id: MatchId, state: MatchState, now: OffsetDateTime) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            version: 1,
            state,
        }
    }

    /// Replace the state after an accepted transition.
    pub fn advance(&mut self, state: MatchState, now: OffsetDateTime) {
        self.state = state;
        self.updated_at = now;
        self.version += 1;
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
