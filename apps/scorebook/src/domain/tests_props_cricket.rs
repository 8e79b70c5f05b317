//! Property tests for the cricket engine (pure domain, no I/O).
//!
//! Properties tested:
//! - Wides and no-balls never count toward the over
//! - Strike rotates on odd runs and again at each over boundary
//! - Score is always batters' runs plus extras
//! - Second-innings target is first-innings score + 1
//! - An innings closes exactly on ten wickets, the overs limit or the target
//! - Replaying the event log reproduces the state exactly
//! - Undo inverts any delivery that does not close an innings

use proptest::prelude::*;

use crate::domain::cricket::{Awaiting, CricketMatch, InningsState};
use crate::domain::fixtures::{cricket, fill_selections};
use crate::domain::model::MatchStatus;
use crate::domain::rules::{max_legal_balls, BALLS_PER_OVER, MAX_WICKETS};
use crate::domain::test_gens::{self, DeliveryInput};
use crate::domain::test_prelude;

fn bowl(m: &CricketMatch, d: &DeliveryInput) -> CricketMatch {
    m.record_delivery(d.runs, d.extra, d.wicket.clone()).unwrap()
}

/// Play `deliveries` on a fresh match, recording each before/after pair.
fn play(
    overs: u8,
    deliveries: &[DeliveryInput],
) -> Vec<(CricketMatch, DeliveryInput, CricketMatch)> {
    let mut steps = Vec::new();
    let mut m = cricket(overs);
    for d in deliveries {
        if m.status() == MatchStatus::Completed {
            break;
        }
        let ready = fill_selections(m);
        let next = bowl(&ready, d);
        steps.push((ready, d.clone(), next.clone()));
        m = next;
    }
    steps
}

fn same_innings<'a>(m: &'a CricketMatch, innings: &InningsState) -> &'a InningsState {
    m.innings(innings.number).unwrap()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: only legal deliveries advance the ball count, by exactly one
    #[test]
    fn prop_illegal_balls_never_count(deliveries in test_gens::deliveries(60)) {
        for (before, d, after) in play(2, &deliveries) {
            let b = before.current_innings();
            let a = same_innings(&after, b);
            let expected = b.legal_balls + u32::from(d.is_legal());
            prop_assert_eq!(a.legal_balls, expected);
            prop_assert_eq!(a.deliveries, b.deliveries + 1);
        }
    }

    /// Property: strike follows odd runs XOR over boundary
    #[test]
    fn prop_strike_rotation(deliveries in test_gens::deliveries(60)) {
        for (before, d, after) in play(3, &deliveries) {
            if d.wicket.is_some() {
                continue;
            }
            let b = before.current_innings();
            let a = same_innings(&after, b);
            if a.is_closed() {
                continue;
            }
            let odd = d.is_legal() && d.runs % 2 == 1;
            let over_end = d.is_legal() && a.legal_balls % BALLS_PER_OVER == 0;
            let expected = if odd ^ over_end {
                b.non_striker.clone()
            } else {
                b.striker.clone()
            };
            prop_assert_eq!(a.striker.clone(), expected);
            if over_end {
                prop_assert_eq!(after.awaiting(), Some(Awaiting::Bowler));
            }
        }
    }

    /// Property: score == batter runs + extras, in every innings
    #[test]
    fn prop_score_is_batters_plus_extras(deliveries in test_gens::deliveries(80)) {
        if let Some((_, _, last)) = play(2, &deliveries).pop() {
            for innings in &last.state().innings {
                let batted: u32 = innings.batters.iter().map(|b| b.runs).sum();
                prop_assert_eq!(innings.score, batted + innings.extras.total());
                let balls: u32 = innings.bowlers.iter().map(|b| b.legal_balls).sum();
                prop_assert_eq!(balls, innings.legal_balls);
            }
        }
    }

    /// Property: target, closure conditions and limits
    #[test]
    fn prop_innings_closure_and_target(deliveries in test_gens::deliveries(80)) {
        let max_balls = max_legal_balls(2);
        for (_, _, after) in play(2, &deliveries) {
            let state = after.state();
            if let Some(second) = state.innings.get(1) {
                prop_assert_eq!(second.target, Some(state.innings[0].score + 1));
            }
            for innings in &state.innings {
                prop_assert!(innings.wickets <= MAX_WICKETS);
                prop_assert!(innings.legal_balls <= max_balls);
                let reached = innings.target.is_some_and(|t| innings.score >= t);
                let should_close = innings.wickets == MAX_WICKETS
                    || innings.legal_balls == max_balls
                    || reached;
                prop_assert_eq!(innings.is_closed(), should_close);
            }
            prop_assert_eq!(
                after.status() == MatchStatus::Completed,
                state.innings.len() == 2 && state.innings[1].is_closed()
            );
        }
    }

    /// Property: replaying the log reproduces the exact state
    #[test]
    fn prop_replay_is_deterministic(deliveries in test_gens::deliveries(80)) {
        if let Some((_, _, last)) = play(2, &deliveries).pop() {
            let replayed = CricketMatch::replay(last.setup().clone(), last.events()).unwrap();
            prop_assert_eq!(replayed, last);
        }
    }

    /// Property: undo(apply(state, ball)) == state unless the ball closed its innings
    #[test]
    fn prop_undo_inverts_open_innings_balls(deliveries in test_gens::deliveries(40)) {
        for (before, _, after) in play(2, &deliveries) {
            let closed = same_innings(&after, before.current_innings()).is_closed();
            match after.undo_last_ball() {
                Ok(undone) => {
                    prop_assert!(!closed);
                    prop_assert_eq!(undone, before);
                }
                Err(_) => prop_assert!(closed),
            }
        }
    }
}
