//! Cricket engine scenarios (pure domain, no I/O).

use crate::domain::cricket::{
    Awaiting, CricketEvent, CricketMatch, DismissalKind, ExtraKind, InningsClose, MatchResult,
    Wicket,
};
use crate::domain::fixtures::{cricket, cricket_ready, cricket_setup, fill_selections};
use crate::domain::model::{MatchStatus, PlayerId, Side, Team};
use crate::errors::domain::DomainError;

fn p(id: &str) -> PlayerId {
    PlayerId::from(id)
}

/// Fill pending selections, then bowl one delivery.
fn deliver(
    m: CricketMatch,
    runs: u8,
    extra: Option<ExtraKind>,
    wicket: Option<Wicket>,
) -> CricketMatch {
    fill_selections(m)
        .record_delivery(runs, extra, wicket)
        .unwrap()
}

fn runs(m: CricketMatch, balls: &[u8]) -> CricketMatch {
    balls.iter().fold(m, |m, r| deliver(m, *r, None, None))
}

fn bowled() -> Option<Wicket> {
    Some(Wicket {
        kind: DismissalKind::Bowled,
        fielder: None,
    })
}

#[test]
fn maiden_over_rotates_strike_once() {
    let m = runs(cricket_ready(20), &[0; 6]);
    let innings = m.current_innings();
    assert_eq!(innings.overs(), (1, 0));
    assert_eq!(innings.legal_balls, 6);
    assert_eq!(innings.striker, Some(p("l2")));
    assert_eq!(innings.non_striker, Some(p("l1")));
    assert_eq!(m.awaiting(), Some(Awaiting::Bowler));

    let t1 = innings.bowler_stats(&p("t1")).unwrap();
    assert_eq!(t1.maidens, 1);
    assert_eq!(t1.dot_balls, 6);
    assert_eq!(t1.overs_display(), "1.0");
    assert_eq!(innings.previous_over_bowler, Some(p("t1")));
}

#[test]
fn odd_run_on_last_ball_composes_with_over_end() {
    let m = runs(cricket_ready(20), &[0, 0, 0, 0, 0, 1]);
    let innings = m.current_innings();
    // single swaps l1 -> l2, end of over swaps back
    assert_eq!(innings.striker, Some(p("l1")));
    assert_eq!(innings.bowler_stats(&p("t1")).unwrap().maidens, 0);
}

#[test]
fn odd_runs_rotate_mid_over() {
    let m = runs(cricket_ready(20), &[3]);
    assert_eq!(m.on_strike(), Some(&p("l2")));
    let m = runs(m, &[2]);
    assert_eq!(m.on_strike(), Some(&p("l2")));
    let batter = m.current_innings().batter(&p("l1")).unwrap();
    assert_eq!((batter.runs, batter.balls_faced), (3, 1));
}

#[test]
fn wide_is_not_a_legal_ball() {
    let m = deliver(cricket_ready(20), 1, Some(ExtraKind::Wide), None);
    let innings = m.current_innings();
    assert_eq!(innings.legal_balls, 0);
    assert_eq!(innings.deliveries, 1);
    assert_eq!(innings.score, 1);
    assert_eq!(innings.extras.wides, 1);
    assert_eq!(innings.batter(&p("l1")).unwrap().balls_faced, 0);
    let t1 = innings.bowler_stats(&p("t1")).unwrap();
    assert_eq!(t1.runs_conceded, 1);
    assert_eq!(t1.legal_balls, 0);
    // odd runs on an illegal ball do not rotate
    assert_eq!(m.on_strike(), Some(&p("l1")));
}

#[test]
fn no_ball_runs_are_charged_to_the_bowler() {
    let m = deliver(cricket_ready(20), 5, Some(ExtraKind::NoBall), None);
    let innings = m.current_innings();
    assert_eq!(innings.legal_balls, 0);
    assert_eq!(innings.extras.no_balls, 5);
    assert_eq!(innings.bowler_stats(&p("t1")).unwrap().runs_conceded, 5);
    assert_eq!(innings.batter(&p("l1")).unwrap().runs, 0);
}

#[test]
fn byes_count_as_legal_balls_but_not_against_the_bowler() {
    let m = deliver(cricket_ready(20), 1, Some(ExtraKind::LegBye), None);
    let innings = m.current_innings();
    assert_eq!(innings.legal_balls, 1);
    assert_eq!(innings.extras.leg_byes, 1);
    assert_eq!(innings.extras.total(), 1);
    let t1 = innings.bowler_stats(&p("t1")).unwrap();
    assert_eq!(t1.runs_conceded, 0);
    assert_eq!(t1.legal_balls, 1);
    // a legal ball with one run: strike rotates, but it is not a dot ball
    assert_eq!(t1.dot_balls, 0);
    assert_eq!(m.on_strike(), Some(&p("l2")));
    assert_eq!(innings.batter(&p("l1")).unwrap().balls_faced, 0);
}

#[test]
fn wicket_requires_a_new_batter() {
    let m = cricket_ready(20)
        .record_wicket(DismissalKind::Caught, Some(p("t5")))
        .unwrap();
    let innings = m.current_innings();
    assert_eq!(innings.wickets, 1);
    assert_eq!(innings.striker, None);
    assert_eq!(m.awaiting(), Some(Awaiting::NewBatter));

    let out = innings.batter(&p("l1")).unwrap();
    let dismissal = out.dismissal.as_ref().unwrap();
    assert_eq!(dismissal.kind, DismissalKind::Caught);
    assert_eq!(dismissal.bowler, p("t1"));
    assert_eq!(dismissal.fielder, Some(p("t5")));
    assert_eq!(out.balls_faced, 1);
    assert_eq!(innings.bowler_stats(&p("t1")).unwrap().wickets, 1);

    let err = m.record_ball(1, None).unwrap_err();
    assert!(matches!(err, DomainError::MissingParticipant(_)));

    let err = m.select_new_batter("l1").unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));
    let err = m.select_new_batter("l2").unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));
    let err = m.select_new_batter("t3").unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));

    let m = m.select_new_batter("l3").unwrap();
    assert_eq!(m.on_strike(), Some(&p("l3")));
    assert_eq!(m.awaiting(), Some(Awaiting::Delivery));
}

#[test]
fn run_out_with_a_single_leaves_the_vacancy_at_the_non_strikers_end() {
    let wicket = Some(Wicket {
        kind: DismissalKind::RunOut,
        fielder: Some(p("t4")),
    });
    let m = cricket_ready(20).record_delivery(1, None, wicket).unwrap();
    let innings = m.current_innings();
    assert_eq!(innings.score, 1);
    assert_eq!(innings.striker, Some(p("l2")));
    assert_eq!(innings.non_striker, None);
    // run-outs are not credited to the bowler
    assert_eq!(innings.bowler_stats(&p("t1")).unwrap().wickets, 0);

    let m = m.select_new_batter("l3").unwrap();
    assert_eq!(m.current_innings().non_striker, Some(p("l3")));
    assert_eq!(m.on_strike(), Some(&p("l2")));
}

#[test]
fn stumped_off_a_wide_is_allowed() {
    let wicket = Some(Wicket {
        kind: DismissalKind::Stumped,
        fielder: Some(p("t2")),
    });
    let m = cricket_ready(20)
        .record_delivery(0, Some(ExtraKind::Wide), wicket)
        .unwrap();
    let innings = m.current_innings();
    assert_eq!(innings.wickets, 1);
    assert_eq!(innings.legal_balls, 0);
    assert_eq!(innings.deliveries, 1);
    assert_eq!(innings.bowler_stats(&p("t1")).unwrap().wickets, 1);
}

#[test]
fn invalid_deliveries_are_rejected_without_side_effects() {
    let m = cricket_ready(20);
    let cases = [
        (8, None, None),
        (0, Some(ExtraKind::Bye), None),
        (
            0,
            Some(ExtraKind::NoBall),
            Some(Wicket {
                kind: DismissalKind::Bowled,
                fielder: None,
            }),
        ),
        (
            0,
            Some(ExtraKind::Wide),
            Some(Wicket {
                kind: DismissalKind::Lbw,
                fielder: None,
            }),
        ),
        (
            2,
            None,
            Some(Wicket {
                kind: DismissalKind::Caught,
                fielder: None,
            }),
        ),
        (
            0,
            None,
            Some(Wicket {
                kind: DismissalKind::Caught,
                fielder: Some(p("l9")),
            }),
        ),
    ];
    for (runs, extra, wicket) in cases {
        let err = m.record_delivery(runs, extra, wicket).unwrap_err();
        assert!(matches!(err, DomainError::InvalidEvent(_)), "{err}");
    }
    assert_eq!(m.events().len(), 2);
    assert_eq!(m.current_innings().deliveries, 0);
}

#[test]
fn deliveries_need_openers_and_a_bowler() {
    let m = cricket(20);
    assert_eq!(m.awaiting(), Some(Awaiting::Openers));
    let err = m.record_ball(0, None).unwrap_err();
    assert!(matches!(err, DomainError::MissingParticipant(_)));

    let m = m.select_openers("l1", "l2").unwrap();
    assert_eq!(m.awaiting(), Some(Awaiting::Bowler));
    let err = m.record_ball(0, None).unwrap_err();
    assert!(matches!(err, DomainError::MissingParticipant(_)));
    assert_eq!(m.status(), MatchStatus::Setup);
}

#[test]
fn selections_are_validated() {
    let m = cricket(20);
    assert!(matches!(
        m.select_openers("l1", "l1").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
    assert!(matches!(
        m.select_openers("l1", "t1").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
    assert!(matches!(
        m.select_bowler("l1").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));

    let m = m.select_openers("l1", "l2").unwrap();
    assert!(matches!(
        m.select_openers("l3", "l4").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
    assert!(matches!(
        m.select_bowler("l5").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
    assert!(matches!(
        m.select_new_batter("l3").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
    let m = m.select_bowler("t1").unwrap();
    assert!(matches!(
        m.select_bowler("t2").unwrap_err(),
        DomainError::InvalidEvent(_)
    ));
}

#[test]
fn bowler_cannot_bowl_consecutive_overs() {
    let m = runs(cricket_ready(20), &[0; 6]);
    let err = m.select_bowler("t1").unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));
    let m = m.select_bowler("t2").unwrap();
    let m = runs(m, &[0; 6]);
    // t1 may come back after a gap
    let m = m.select_bowler("t1").unwrap();
    assert_eq!(m.current_innings().bowlers.len(), 2);
}

#[test]
fn chase_to_target_wins_by_wickets() {
    // First innings: 25 sixes then ten wickets -> 150 all out.
    let mut m = runs(cricket_ready(50), &[6; 25]);
    for _ in 0..10 {
        m = deliver(m, 0, None, bowled());
    }
    let first = m.innings(1).unwrap();
    assert_eq!(first.score, 150);
    assert_eq!(first.closed, Some(InningsClose::AllOut));
    assert_eq!(first.overs_display(), "5.5");

    let second = m.current_innings();
    assert_eq!(second.number, 2);
    assert_eq!(second.batting, Side::B);
    assert_eq!(m.target(), Some(151));
    assert_eq!(m.awaiting(), Some(Awaiting::Openers));

    for _ in 0..3 {
        m = deliver(m, 0, None, bowled());
    }
    m = runs(m, &[6; 25]);
    assert_eq!(m.runs_required(), Some(1));
    m = runs(m, &[1]);

    assert_eq!(m.status(), MatchStatus::Completed);
    assert_eq!(
        m.innings(2).unwrap().closed,
        Some(InningsClose::TargetReached)
    );
    let result = m.result().unwrap();
    assert_eq!(
        result,
        MatchResult::WonByWickets {
            winner: Side::B,
            margin: 7
        }
    );
    assert_eq!(result.describe(&m.setup().teams), "Tigers won by 7 wickets");
    assert_eq!(m.awaiting(), None);
    assert_eq!(m.on_strike(), None);

    let err = m.record_ball(1, None).unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));
}

#[test]
fn winning_run_out_as_the_tenth_wicket_still_wins_by_wickets() {
    let mut m = runs(cricket_ready(20), &[4]);
    for _ in 0..10 {
        m = deliver(m, 0, None, bowled());
    }
    assert_eq!(m.target(), Some(5));

    for _ in 0..9 {
        m = deliver(m, 0, None, bowled());
    }
    let run_out = Some(Wicket {
        kind: DismissalKind::RunOut,
        fielder: Some(p("l5")),
    });
    m = deliver(m, 5, None, run_out);

    let second = m.innings(2).unwrap();
    assert_eq!(second.wickets, 10);
    // reaching the target is checked before all out
    assert_eq!(second.closed, Some(InningsClose::TargetReached));
    let result = m.result().unwrap();
    assert_eq!(
        result,
        MatchResult::WonByWickets {
            winner: Side::B,
            margin: 0
        }
    );
    assert_eq!(result.describe(&m.setup().teams), "Tigers won by 0 wickets");
}

#[test]
fn overs_limit_closes_the_innings() {
    let m = runs(cricket_ready(1), &[4, 0, 0, 0, 0, 0]);
    let first = m.innings(1).unwrap();
    assert_eq!(first.closed, Some(InningsClose::OversComplete));
    assert_eq!(first.wickets, 0);
    assert_eq!(m.target(), Some(5));
    assert_eq!(m.balls_remaining(), 6);

    let m = runs(m, &[1, 0, 0, 0, 0, 0]);
    let result = m.result().unwrap();
    assert_eq!(
        result,
        MatchResult::WonByRuns {
            winner: Side::A,
            margin: 3
        }
    );
    assert_eq!(result.describe(&m.setup().teams), "Lions won by 3 runs");
    assert_eq!(result.winner(), Some(Side::A));
}

#[test]
fn level_scores_are_a_tie() {
    let m = runs(cricket_ready(1), &[2, 0, 0, 0, 0, 0]);
    let m = runs(m, &[2, 0, 0, 0, 0, 0]);
    assert_eq!(m.result(), Some(MatchResult::Tie));
    assert_eq!(m.result().unwrap().winner(), None);
    assert_eq!(
        m.innings(2).unwrap().closed,
        Some(InningsClose::OversComplete)
    );
}

#[test]
fn rates_and_required_rate() {
    assert_eq!(cricket_ready(2).required_run_rate(), None);

    let m = runs(cricket_ready(2), &[1; 12]);
    assert_eq!(m.target(), Some(13));
    assert!((m.required_run_rate().unwrap() - 6.5).abs() < 1e-9);

    let m = runs(m, &[1; 6]);
    assert_eq!(m.overs(), (1, 0));
    assert_eq!(m.overs_display(), "1.0");
    assert!((m.run_rate() - 6.0).abs() < 1e-9);
    assert_eq!(m.runs_required(), Some(7));
    assert_eq!(m.balls_remaining(), 6);
    assert!((m.required_run_rate().unwrap() - 7.0).abs() < 1e-9);
}

#[test]
fn undo_drops_the_ball_and_trailing_selections() {
    let five = runs(cricket_ready(20), &[0; 5]);
    let six = runs(five.clone(), &[0]);
    let with_bowler = six.select_bowler("t2").unwrap();
    assert!(matches!(
        with_bowler.events().last(),
        Some(CricketEvent::SelectBowler { .. })
    ));

    let undone = with_bowler.undo_last_ball().unwrap();
    assert_eq!(undone, five);
    assert_eq!(undone.awaiting(), Some(Awaiting::Delivery));
    assert_eq!(undone.current_innings().bowler, Some(p("t1")));
}

#[test]
fn undo_restores_a_dismissed_striker() {
    let before = runs(cricket_ready(20), &[1]);
    let after = before
        .record_wicket(DismissalKind::Lbw, None)
        .unwrap()
        .select_new_batter("l3")
        .unwrap();
    let undone = after.undo_last_ball().unwrap();
    assert_eq!(undone, before);
    assert_eq!(undone.on_strike(), Some(&p("l2")));
    assert_eq!(undone.current_innings().wickets, 0);
}

#[test]
fn undo_is_unavailable_without_a_ball_in_the_open_innings() {
    let err = cricket_ready(20).undo_last_ball().unwrap_err();
    assert!(matches!(err, DomainError::UndoUnavailable(_)));

    let m = runs(cricket_ready(1), &[0; 6]);
    let err = m.undo_last_ball().unwrap_err();
    assert!(matches!(err, DomainError::UndoUnavailable(_)));
    let m = fill_selections(m);
    assert!(m.undo_last_ball().is_err());
}

#[test]
fn replay_reproduces_state_including_selections() {
    let mut m = runs(cricket_ready(2), &[1, 4, 0, 6]);
    m = deliver(m, 0, None, bowled());
    m = deliver(m, 2, Some(ExtraKind::Wide), None);
    m = runs(m, &[3, 0, 0, 0, 1, 1]);
    let replayed = CricketMatch::replay(m.setup().clone(), m.events()).unwrap();
    assert_eq!(replayed, m);
}

#[test]
fn setup_is_validated() {
    for overs in [0, 51] {
        let err = CricketMatch::new(cricket_setup(overs)).unwrap_err();
        assert!(matches!(err, DomainError::MalformedFormat(_)));
    }
    let mut setup = cricket_setup(20);
    setup.teams[1] = Team::new("Tigers", (1..=10).map(|i| format!("t{i}")));
    let err = CricketMatch::new(setup).unwrap_err();
    assert!(matches!(err, DomainError::MalformedFormat(_)));
}

/// Reload `m` with the open innings' delivery counter forced to `deliveries`.
fn with_delivery_count(m: &CricketMatch, deliveries: u32) -> CricketMatch {
    let mut json = serde_json::to_value(m).unwrap();
    json["state"]["innings"][0]["deliveries"] = serde_json::json!(deliveries);
    serde_json::from_value(json).unwrap()
}

#[test]
fn delivery_numbers_are_not_limited_by_illegal_balls() {
    let m = with_delivery_count(&cricket_ready(20), u32::from(u16::MAX));
    let m = m.record_ball(0, Some(ExtraKind::Wide)).unwrap();
    let innings = m.current_innings();
    assert_eq!(innings.deliveries, u32::from(u16::MAX) + 1);
    assert_eq!(innings.legal_balls, 0);
    match m.events().last() {
        Some(CricketEvent::Delivery(ball)) => assert_eq!(ball.seq, 65_536),
        other => panic!("expected a delivery, got {other:?}"),
    }
}

#[test]
fn exhausted_delivery_numbers_are_rejected() {
    let m = with_delivery_count(&cricket_ready(20), u32::MAX);
    let err = m.record_ball(0, Some(ExtraKind::Wide)).unwrap_err();
    assert!(matches!(err, DomainError::InvalidEvent(_)));
    assert_eq!(m.current_innings().deliveries, u32::MAX);
}
