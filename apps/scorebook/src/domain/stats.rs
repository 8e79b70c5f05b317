//! Running cricket statistics and the rate math derived from them.

use serde::{Deserialize, Serialize};

use crate::domain::cricket::{DismissalKind, ExtraKind};
use crate::domain::model::PlayerId;
use crate::domain::rules::BALLS_PER_OVER;

/// Runs per over for `runs` scored across `legal_balls`; 0.0 before any ball.
pub fn rate_per_over(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    runs as f64 * BALLS_PER_OVER as f64 / legal_balls as f64
}

/// Cricket over notation: completed overs, a dot, balls into the next over.
pub fn overs_display(legal_balls: u32) -> String {
    format!(
        "{}.{}",
        legal_balls / BALLS_PER_OVER,
        legal_balls % BALLS_PER_OVER
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl Extras {
    pub fn add(&mut self, kind: ExtraKind, runs: u32) {
        match kind {
            ExtraKind::Wide => self.wides += runs,
            ExtraKind::NoBall => self.no_balls += runs,
            ExtraKind::Bye => self.byes += runs,
            ExtraKind::LegBye => self.leg_byes += runs,
        }
    }

    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }
}

/// How and to whom a batter got out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissalRecord {
    pub kind: DismissalKind,
    /// Bowler at the time of the dismissal (credited only when `kind.credits_bowler()`).
    pub bowler: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterStats {
    pub player: PlayerId,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: Option<DismissalRecord>,
}

impl BatterStats {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            dismissal: None,
        }
    }

    /// Runs per hundred balls faced.
    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            return 0.0;
        }
        self.runs as f64 / self.balls_faced as f64 * 100.0
    }

    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Credit a legal, non-extra delivery.
    pub(crate) fn face(&mut self, runs: u32) {
        self.runs += runs;
        self.balls_faced += 1;
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub player: PlayerId,
    pub legal_balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub dot_balls: u32,
    pub maidens: u32,
}

impl BowlerStats {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            legal_balls: 0,
            runs_conceded: 0,
            wickets: 0,
            dot_balls: 0,
            maidens: 0,
        }
    }

    /// Runs conceded per over bowled.
    pub fn economy(&self) -> f64 {
        rate_per_over(self.runs_conceded, self.legal_balls)
    }

    pub fn overs_display(&self) -> String {
        overs_display(self.legal_balls)
    }
}
