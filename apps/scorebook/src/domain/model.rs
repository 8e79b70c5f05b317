//! Match model shared by the badminton and cricket engines.
//!
//! Participant identity is always supplied by the caller; the engines never
//! invent player ids.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::errors::domain::DomainError;

/// Unique match identifier (ULID, serialized as its 26-char string form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Ulid);

impl MatchId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Badminton,
    Cricket,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Badminton => write!(f, "badminton"),
            Sport::Cricket => write!(f, "cricket"),
        }
    }
}

/// Match lifecycle, derived from the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created, no scoring event applied yet.
    Setup,
    Ongoing,
    /// Winner (or result) recorded; no further events accepted.
    Completed,
}

/// One of the two participating teams. Per-side data is stored as `[T; 2]`
/// indexed by [`Side::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Ordered roster (batting order hint for cricket, pairing for doubles).
    pub players: Vec<PlayerId>,
}

impl Team {
    pub fn new<P: Into<PlayerId>>(
        name: impl Into<String>,
        players: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            name: name.into(),
            players: players.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.iter().any(|p| p == player)
    }
}

/// Validate both rosters: non-empty names, size within `min..=max`, and no
/// player id appearing twice anywhere in the match.
pub fn validate_teams(teams: &[Team; 2], min: usize, max: usize) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for team in teams {
        if team.name.trim().is_empty() {
            return Err(DomainError::malformed_format("team name must not be empty"));
        }
        let n = team.players.len();
        if n < min || n > max {
            return Err(DomainError::malformed_format(format!(
                "team '{}' has {n} players, expected {min}..={max}",
                team.name
            )));
        }
        for player in &team.players {
            if !seen.insert(player) {
                return Err(DomainError::malformed_format(format!(
                    "player '{player}' appears more than once"
                )));
            }
        }
    }
    Ok(())
}
