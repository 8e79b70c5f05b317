//! Cricket rules engine.
//!
//! Two limited-overs innings. The event log holds deliveries *and* the
//! participant selections around them (openers, bowler per over, incoming
//! batters) so that replaying the log reproduces the exact state, including
//! who is on strike.

use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::model::{validate_teams, MatchStatus, PlayerId, Side, Team};
use crate::domain::rules::{
    max_legal_balls, validate_overs, BALLS_PER_OVER, CRICKET_MAX_PLAYERS, CRICKET_MIN_PLAYERS,
    MAX_RUNS_PER_DELIVERY, MAX_WICKETS,
};
use crate::domain::stats::{
    overs_display, rate_per_over, BatterStats, BowlerStats, DismissalRecord, Extras,
};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketSetup {
    pub teams: [Team; 2],
    pub overs_per_innings: u8,
    pub batting_first: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    /// Byes and leg-byes still count toward the over; wides and no-balls do not.
    #[inline]
    pub fn is_legal(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }

    /// Wides and no-balls are charged to the bowler's figures.
    #[inline]
    pub fn charged_to_bowler(self) -> bool {
        matches!(self, ExtraKind::Wide | ExtraKind::NoBall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    Stumped,
    HitWicket,
    RunOut,
}

impl DismissalKind {
    #[inline]
    pub fn credits_bowler(self) -> bool {
        !matches!(self, DismissalKind::RunOut)
    }

    /// Whether this dismissal can happen on a delivery of the given kind.
    pub fn allowed_on(self, extra: Option<ExtraKind>) -> bool {
        match extra {
            None => true,
            Some(ExtraKind::Wide) => matches!(
                self,
                DismissalKind::Stumped | DismissalKind::RunOut | DismissalKind::HitWicket
            ),
            Some(ExtraKind::NoBall | ExtraKind::Bye | ExtraKind::LegBye) => {
                self == DismissalKind::RunOut
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wicket {
    pub kind: DismissalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<PlayerId>,
}

/// One delivery, with the participants as they stood when it was bowled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub innings: u8,
    /// 1-based within the innings, counting wides and no-balls.
    pub seq: u32,
    pub runs: u8,
    pub extra: Option<ExtraKind>,
    pub wicket: Option<Wicket>,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

impl Ball {
    #[inline]
    pub fn is_legal(&self) -> bool {
        self.extra.is_none_or(ExtraKind::is_legal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CricketEvent {
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
    Delivery(Ball),
}

/// Input the caller must supply before play can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Awaiting {
    Openers,
    NewBatter,
    Bowler,
    /// Crease and bowler are set; the next delivery can be recorded.
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsClose {
    AllOut,
    OversComplete,
    TargetReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    WonByRuns { winner: Side, margin: u32 },
    WonByWickets { winner: Side, margin: u8 },
    Tie,
}

impl MatchResult {
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchResult::WonByRuns { winner, .. } | MatchResult::WonByWickets { winner, .. } => {
                Some(*winner)
            }
            MatchResult::Tie => None,
        }
    }

    /// Human-readable result line, e.g. "Blues won by 7 wickets".
    pub fn describe(&self, teams: &[Team; 2]) -> String {
        match self {
            MatchResult::WonByRuns { winner, margin } => format!(
                "{} won by {margin} {}",
                teams[winner.index()].name,
                if *margin == 1 { "run" } else { "runs" }
            ),
            MatchResult::WonByWickets { winner, margin } => format!(
                "{} won by {margin} {}",
                teams[winner.index()].name,
                if *margin == 1 { "wicket" } else { "wickets" }
            ),
            MatchResult::Tie => "Match tied".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsState {
    /// 1 or 2.
    pub number: u8,
    pub batting: Side,
    pub bowling: Side,
    pub score: u32,
    pub wickets: u8,
    pub legal_balls: u32,
    /// All deliveries including wides and no-balls.
    pub deliveries: u32,
    pub extras: Extras,
    /// Only set on the second innings: first-innings score + 1.
    pub target: Option<u32>,
    /// Batting order as batters came in.
    pub batters: Vec<BatterStats>,
    /// In order of first selection.
    pub bowlers: Vec<BowlerStats>,
    pub striker: Option<PlayerId>,
    pub non_striker: Option<PlayerId>,
    pub bowler: Option<PlayerId>,
    pub previous_over_bowler: Option<PlayerId>,
    /// Runs charged to the bowler in the over in progress (maiden tracking).
    pub over_runs_conceded: u32,
    pub closed: Option<InningsClose>,
}

impl InningsState {
    fn opening(number: u8, batting: Side, target: Option<u32>) -> Self {
        Self {
            number,
            batting,
            bowling: batting.opponent(),
            score: 0,
            wickets: 0,
            legal_balls: 0,
            deliveries: 0,
            extras: Extras::default(),
            target,
            batters: Vec::new(),
            bowlers: Vec::new(),
            striker: None,
            non_striker: None,
            bowler: None,
            previous_over_bowler: None,
            over_runs_conceded: 0,
            closed: None,
        }
    }

    /// `(completed overs, balls into the current over)`.
    pub fn overs(&self) -> (u32, u32) {
        (
            self.legal_balls / BALLS_PER_OVER,
            self.legal_balls % BALLS_PER_OVER,
        )
    }

    pub fn overs_display(&self) -> String {
        overs_display(self.legal_balls)
    }

    pub fn run_rate(&self) -> f64 {
        rate_per_over(self.score, self.legal_balls)
    }

    pub fn runs_required(&self) -> Option<u32> {
        self.target.map(|t| t.saturating_sub(self.score))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    pub fn batter(&self, player: &PlayerId) -> Option<&BatterStats> {
        self.batters.iter().find(|b| &b.player == player)
    }

    pub fn bowler_stats(&self, player: &PlayerId) -> Option<&BowlerStats> {
        self.bowlers.iter().find(|b| &b.player == player)
    }

    /// Next input required, or `None` once the innings is closed.
    pub fn awaiting(&self) -> Option<Awaiting> {
        if self.is_closed() {
            None
        } else if self.batters.is_empty() {
            Some(Awaiting::Openers)
        } else if self.striker.is_none() || self.non_striker.is_none() {
            Some(Awaiting::NewBatter)
        } else if self.bowler.is_none() {
            Some(Awaiting::Bowler)
        } else {
            Some(Awaiting::Delivery)
        }
    }

    fn next_seq(&self) -> Result<u32, DomainError> {
        self.deliveries.checked_add(1).ok_or_else(|| {
            DomainError::invalid_event(format!(
                "innings {} has no delivery numbers left",
                self.number
            ))
        })
    }

    fn batter_mut(&mut self, player: &PlayerId) -> Result<&mut BatterStats, DomainError> {
        self.batters
            .iter_mut()
            .find(|b| &b.player == player)
            .ok_or_else(|| DomainError::invalid_event(format!("'{player}' has not come in to bat")))
    }

    fn bowler_mut(&mut self, player: &PlayerId) -> Result<&mut BowlerStats, DomainError> {
        self.bowlers
            .iter_mut()
            .find(|b| &b.player == player)
            .ok_or_else(|| DomainError::invalid_event(format!("'{player}' has not been selected to bowl")))
    }
}

/// Derived match state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketState {
    pub status: MatchStatus,
    /// Closed innings followed by the innings in progress.
    pub innings: Vec<InningsState>,
    pub result: Option<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketMatch {
    setup: CricketSetup,
    events: Vec<CricketEvent>,
    state: CricketState,
}

impl CricketMatch {
    /// Validate the setup and open the first innings.
    pub fn new(setup: CricketSetup) -> Result<Self, DomainError> {
        validate_overs(setup.overs_per_innings)?;
        validate_teams(&setup.teams, CRICKET_MIN_PLAYERS, CRICKET_MAX_PLAYERS)?;
        let state = CricketState {
            status: MatchStatus::Setup,
            innings: vec![InningsState::opening(1, setup.batting_first, None)],
            result: None,
        };
        Ok(Self {
            setup,
            events: Vec::new(),
            state,
        })
    }

    /// Rebuild a match by folding `events` over a fresh setup.
    pub fn replay(setup: CricketSetup, events: &[CricketEvent]) -> Result<Self, DomainError> {
        let mut m = Self::new(setup)?;
        for event in events {
            m.apply(event.clone())?;
        }
        Ok(m)
    }

    pub fn select_openers(
        &self,
        striker: impl Into<PlayerId>,
        non_striker: impl Into<PlayerId>,
    ) -> Result<Self, DomainError> {
        self.with_event(CricketEvent::SelectOpeners {
            striker: striker.into(),
            non_striker: non_striker.into(),
        })
    }

    pub fn select_bowler(&self, bowler: impl Into<PlayerId>) -> Result<Self, DomainError> {
        self.with_event(CricketEvent::SelectBowler {
            bowler: bowler.into(),
        })
    }

    pub fn select_new_batter(&self, batter: impl Into<PlayerId>) -> Result<Self, DomainError> {
        self.with_event(CricketEvent::SelectNewBatter {
            batter: batter.into(),
        })
    }

    /// Record a delivery without a wicket.
    pub fn record_ball(&self, runs: u8, extra: Option<ExtraKind>) -> Result<Self, DomainError> {
        self.record_delivery(runs, extra, None)
    }

    /// Record a legal, scoreless delivery on which the striker is out.
    pub fn record_wicket(
        &self,
        kind: DismissalKind,
        fielder: Option<PlayerId>,
    ) -> Result<Self, DomainError> {
        self.record_delivery(0, None, Some(Wicket { kind, fielder }))
    }

    /// Record any delivery: runs, optional extra, optional wicket.
    pub fn record_delivery(
        &self,
        runs: u8,
        extra: Option<ExtraKind>,
        wicket: Option<Wicket>,
    ) -> Result<Self, DomainError> {
        let innings = self.require_open_innings()?;
        let (striker, non_striker, bowler) = require_participants(innings)?;
        let ball = Ball {
            innings: innings.number,
            seq: innings.next_seq()?,
            runs,
            extra,
            wicket,
            striker: striker.clone(),
            non_striker: non_striker.clone(),
            bowler: bowler.clone(),
        };
        self.with_event(CricketEvent::Delivery(ball))
    }

    /// Remove the latest delivery (and any selections made after it) and
    /// replay the remaining log.
    ///
    /// Rejected when no delivery exists, or when the latest delivery belongs
    /// to a closed innings.
    pub fn undo_last_ball(&self) -> Result<Self, DomainError> {
        let last = self
            .events
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, e)| match e {
                CricketEvent::Delivery(ball) => Some((idx, ball)),
                _ => None,
            });
        let Some((idx, ball)) = last else {
            return Err(DomainError::undo_unavailable("no deliveries recorded"));
        };
        let closed = self
            .state
            .innings
            .get(ball.innings.saturating_sub(1) as usize)
            .is_some_and(InningsState::is_closed);
        if closed {
            return Err(DomainError::undo_unavailable(format!(
                "last delivery belongs to closed innings {}",
                ball.innings
            )));
        }
        Self::replay(self.setup.clone(), &self.events[..idx])
    }

    pub fn setup(&self) -> &CricketSetup {
        &self.setup
    }

    pub fn state(&self) -> &CricketState {
        &self.state
    }

    pub fn events(&self) -> &[CricketEvent] {
        &self.events
    }

    pub fn status(&self) -> MatchStatus {
        self.state.status
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.state.result
    }

    /// The innings in progress, or the final innings once the match is completed.
    pub fn current_innings(&self) -> &InningsState {
        // `innings` is never empty: innings 1 is opened in `new`.
        &self.state.innings[self.state.innings.len() - 1]
    }

    pub fn innings(&self, number: u8) -> Option<&InningsState> {
        self.state.innings.get(number.checked_sub(1)? as usize)
    }

    pub fn awaiting(&self) -> Option<Awaiting> {
        match self.state.status {
            MatchStatus::Completed => None,
            _ => self.current_innings().awaiting(),
        }
    }

    pub fn on_strike(&self) -> Option<&PlayerId> {
        match self.state.status {
            MatchStatus::Completed => None,
            _ => self.current_innings().striker.as_ref(),
        }
    }

    pub fn target(&self) -> Option<u32> {
        self.current_innings().target
    }

    pub fn overs(&self) -> (u32, u32) {
        self.current_innings().overs()
    }

    pub fn overs_display(&self) -> String {
        self.current_innings().overs_display()
    }

    pub fn run_rate(&self) -> f64 {
        self.current_innings().run_rate()
    }

    pub fn runs_required(&self) -> Option<u32> {
        self.current_innings().runs_required()
    }

    pub fn balls_remaining(&self) -> u32 {
        max_legal_balls(self.setup.overs_per_innings)
            .saturating_sub(self.current_innings().legal_balls)
    }

    /// Runs per over needed to reach the target; `None` outside a live chase.
    pub fn required_run_rate(&self) -> Option<f64> {
        let innings = self.current_innings();
        if innings.is_closed() {
            return None;
        }
        let needed = innings.runs_required()?;
        let balls = self.balls_remaining();
        if balls == 0 {
            return None;
        }
        Some(rate_per_over(needed, balls))
    }

    fn with_event(&self, event: CricketEvent) -> Result<Self, DomainError> {
        let mut next = self.clone();
        next.apply(event)?;
        Ok(next)
    }

    fn require_open_innings(&self) -> Result<&InningsState, DomainError> {
        if self.state.status == MatchStatus::Completed {
            return Err(DomainError::invalid_event("match already completed"));
        }
        let innings = self.current_innings();
        if innings.is_closed() {
            return Err(DomainError::invalid_event(format!(
                "no innings in progress (innings {} is closed)",
                innings.number
            )));
        }
        Ok(innings)
    }

    fn apply(&mut self, event: CricketEvent) -> Result<(), DomainError> {
        self.require_open_innings()?;
        let max_balls = max_legal_balls(self.setup.overs_per_innings);
        let teams = &self.setup.teams;
        let last = self.state.innings.len() - 1;
        let innings = &mut self.state.innings[last];
        let batting_team = &teams[innings.batting.index()];
        let bowling_team = &teams[innings.bowling.index()];

        match &event {
            CricketEvent::SelectOpeners {
                striker,
                non_striker,
            } => open_batting(innings, batting_team, striker, non_striker)?,
            CricketEvent::SelectBowler { bowler } => choose_bowler(innings, bowling_team, bowler)?,
            CricketEvent::SelectNewBatter { batter } => {
                choose_new_batter(innings, batting_team, batter)?
            }
            CricketEvent::Delivery(ball) => {
                bowl(innings, bowling_team, ball)?;
                self.state.status = MatchStatus::Ongoing;
            }
        }

        let innings = &self.state.innings[last];
        if let Some(reason) = closing_reason(innings, max_balls) {
            close_innings(&mut self.state, reason);
        }
        self.events.push(event);
        Ok(())
    }
}

fn require_participants(
    innings: &InningsState,
) -> Result<(&PlayerId, &PlayerId, &PlayerId), DomainError> {
    if innings.batters.is_empty() {
        return Err(DomainError::missing_participant("opening batters not selected"));
    }
    let (Some(striker), Some(non_striker)) = (&innings.striker, &innings.non_striker) else {
        return Err(DomainError::missing_participant("new batter not selected"));
    };
    let Some(bowler) = &innings.bowler else {
        return Err(DomainError::missing_participant("bowler not selected"));
    };
    Ok((striker, non_striker, bowler))
}

fn open_batting(
    innings: &mut InningsState,
    batting_team: &Team,
    striker: &PlayerId,
    non_striker: &PlayerId,
) -> Result<(), DomainError> {
    if !innings.batters.is_empty() {
        return Err(DomainError::invalid_event("openers already selected"));
    }
    if striker == non_striker {
        return Err(DomainError::invalid_event("openers must be two different players"));
    }
    for p in [striker, non_striker] {
        if !batting_team.contains(p) {
            return Err(DomainError::invalid_event(format!(
                "'{p}' is not in the batting team"
            )));
        }
    }
    innings.batters.push(BatterStats::new(striker.clone()));
    innings.batters.push(BatterStats::new(non_striker.clone()));
    innings.striker = Some(striker.clone());
    innings.non_striker = Some(non_striker.clone());
    Ok(())
}

fn choose_bowler(
    innings: &mut InningsState,
    bowling_team: &Team,
    bowler: &PlayerId,
) -> Result<(), DomainError> {
    if innings.bowler.is_some() {
        return Err(DomainError::invalid_event("bowler already set for this over"));
    }
    if !bowling_team.contains(bowler) {
        return Err(DomainError::invalid_event(format!(
            "'{bowler}' is not in the bowling team"
        )));
    }
    if innings.previous_over_bowler.as_ref() == Some(bowler) {
        return Err(DomainError::invalid_event(format!(
            "'{bowler}' bowled the previous over"
        )));
    }
    if innings.bowler_stats(bowler).is_none() {
        innings.bowlers.push(BowlerStats::new(bowler.clone()));
    }
    innings.bowler = Some(bowler.clone());
    Ok(())
}

fn choose_new_batter(
    innings: &mut InningsState,
    batting_team: &Team,
    batter: &PlayerId,
) -> Result<(), DomainError> {
    if innings.batters.is_empty() {
        return Err(DomainError::invalid_event("select the opening batters first"));
    }
    if innings.striker.is_some() && innings.non_striker.is_some() {
        return Err(DomainError::invalid_event("no vacancy at the crease"));
    }
    if !batting_team.contains(batter) {
        return Err(DomainError::invalid_event(format!(
            "'{batter}' is not in the batting team"
        )));
    }
    if innings.batter(batter).is_some() {
        return Err(DomainError::invalid_event(format!("'{batter}' has already batted")));
    }
    innings.batters.push(BatterStats::new(batter.clone()));
    if innings.striker.is_none() {
        innings.striker = Some(batter.clone());
    } else {
        innings.non_striker = Some(batter.clone());
    }
    Ok(())
}

fn validate_ball(
    innings: &InningsState,
    bowling_team: &Team,
    ball: &Ball,
) -> Result<(), DomainError> {
    let (striker, non_striker, bowler) = require_participants(innings)?;
    let expected = innings.next_seq()?;
    if ball.innings != innings.number || ball.seq != expected {
        return Err(DomainError::invalid_event(format!(
            "delivery {}/{} out of order, expected {}/{}",
            ball.innings, ball.seq, innings.number, expected
        )));
    }
    if &ball.striker != striker || &ball.non_striker != non_striker || &ball.bowler != bowler {
        return Err(DomainError::invalid_event(
            "delivery participants do not match the crease",
        ));
    }
    if ball.runs > MAX_RUNS_PER_DELIVERY {
        return Err(DomainError::invalid_event(format!(
            "{} runs exceeds the per-delivery maximum of {MAX_RUNS_PER_DELIVERY}",
            ball.runs
        )));
    }
    if matches!(ball.extra, Some(ExtraKind::Bye | ExtraKind::LegBye))
        && ball.runs == 0
        && ball.wicket.is_none()
    {
        return Err(DomainError::invalid_event("byes and leg-byes need at least one run"));
    }
    if let Some(wicket) = &ball.wicket {
        if !wicket.kind.allowed_on(ball.extra) {
            return Err(DomainError::invalid_event(format!(
                "{:?} is not possible on a {:?} delivery",
                wicket.kind, ball.extra
            )));
        }
        if ball.runs > 0 && wicket.kind != DismissalKind::RunOut {
            return Err(DomainError::invalid_event(
                "only a run-out can complete runs on a wicket delivery",
            ));
        }
        if let Some(fielder) = &wicket.fielder {
            if !bowling_team.contains(fielder) {
                return Err(DomainError::invalid_event(format!(
                    "fielder '{fielder}' is not in the bowling team"
                )));
            }
        }
    }
    Ok(())
}

/// Apply one delivery to the innings in progress.
fn bowl(innings: &mut InningsState, bowling_team: &Team, ball: &Ball) -> Result<(), DomainError> {
    validate_ball(innings, bowling_team, ball)?;

    let runs = ball.runs as u32;
    let legal = ball.is_legal();

    innings.score += runs;
    innings.deliveries = ball.seq;
    if legal {
        innings.legal_balls += 1;
    }
    match ball.extra {
        Some(kind) => innings.extras.add(kind, runs),
        None => innings.batter_mut(&ball.striker)?.face(runs),
    }

    let conceded = match ball.extra {
        Some(kind) if !kind.charged_to_bowler() => 0,
        _ => runs,
    };
    innings.over_runs_conceded += conceded;
    {
        let bowler = innings.bowler_mut(&ball.bowler)?;
        bowler.runs_conceded += conceded;
        if legal {
            bowler.legal_balls += 1;
            if runs == 0 {
                bowler.dot_balls += 1;
            }
        }
        if ball.wicket.as_ref().is_some_and(|w| w.kind.credits_bowler()) {
            bowler.wickets += 1;
        }
    }

    if let Some(wicket) = &ball.wicket {
        innings.wickets += 1;
        innings.batter_mut(&ball.striker)?.dismissal = Some(DismissalRecord {
            kind: wicket.kind,
            bowler: ball.bowler.clone(),
            fielder: wicket.fielder.clone(),
        });
        innings.striker = None;
    }

    // Odd runs first, then end of over, each swapping the current pair.
    if legal && runs % 2 == 1 {
        swap_strike(innings);
    }
    if legal && innings.legal_balls % BALLS_PER_OVER == 0 {
        swap_strike(innings);
        if innings.over_runs_conceded == 0 {
            innings.bowler_mut(&ball.bowler)?.maidens += 1;
        }
        innings.over_runs_conceded = 0;
        innings.previous_over_bowler = innings.bowler.take();
        trace!(innings = innings.number, overs = %innings.overs_display(), "over completed");
    }

    trace!(
        innings = innings.number,
        seq = ball.seq,
        runs,
        extra = ?ball.extra,
        wicket = ball.wicket.is_some(),
        score = innings.score,
        wickets = innings.wickets,
        "delivery recorded"
    );
    Ok(())
}

#[inline]
fn swap_strike(innings: &mut InningsState) {
    mem::swap(&mut innings.striker, &mut innings.non_striker);
}

fn closing_reason(innings: &InningsState, max_balls: u32) -> Option<InningsClose> {
    if innings.is_closed() {
        return None;
    }
    if innings.target.is_some_and(|t| innings.score >= t) {
        Some(InningsClose::TargetReached)
    } else if innings.wickets >= MAX_WICKETS {
        Some(InningsClose::AllOut)
    } else if innings.legal_balls >= max_balls {
        Some(InningsClose::OversComplete)
    } else {
        None
    }
}

/// Close the innings in progress and either open the chase or finish the match.
fn close_innings(state: &mut CricketState, reason: InningsClose) {
    let last = state.innings.len() - 1;
    let innings = &mut state.innings[last];
    innings.closed = Some(reason);
    innings.bowler = None;
    debug!(
        innings = innings.number,
        reason = ?reason,
        score = innings.score,
        wickets = innings.wickets,
        "innings closed"
    );

    if innings.number == 1 {
        let target = innings.score + 1;
        let chasing = innings.bowling;
        state
            .innings
            .push(InningsState::opening(2, chasing, Some(target)));
        return;
    }

    let result = decide_result(&state.innings[0], &state.innings[last]);
    debug!(result = ?result, "cricket match completed");
    state.result = Some(result);
    state.status = MatchStatus::Completed;
}

fn decide_result(first: &InningsState, second: &InningsState) -> MatchResult {
    let target = first.score + 1;
    if second.score >= target {
        MatchResult::WonByWickets {
            winner: second.batting,
            margin: MAX_WICKETS.saturating_sub(second.wickets),
        }
    } else if first.score > second.score {
        MatchResult::WonByRuns {
            winner: first.batting,
            margin: first.score - second.score,
        }
    } else {
        MatchResult::Tie
    }
}
