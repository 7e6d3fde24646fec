//! The per-board deal builder: attempt loop with adaptive re-rolls.
//!
//! Sub-profiles, the dealing order and random-suit choices are fixed up
//! front and only re-rolled at interval boundaries. The sub-profile
//! interval starts wide and decays toward its floor each time it fires,
//! so easy boards pay nothing while hard boards explore combinations ever
//! faster; random suits re-roll on a shorter cycle inside each sub-profile
//! selection.

use crate::attribution::{AttemptFailure, Attribution};
use crate::config::{GenConfig, GenHooks};
use crate::matcher::{match_analysis, HandAnalysis, MatchContext, MatchFailure, RsChoice};
use crate::plan::{dealing_order, processing_order};
use crate::prealloc::{
    contingent_counterparty, deal_with_help, pre_select_rs_suits, tight_seats, RsSelections,
};
use crate::profile::{HandProfile, SubProfile};
use crate::select::{select_subprofiles, Selection};
use dealer_core::{deck, Hand, Seat};
use rand::Rng;
use tracing::trace;

/// Everything fixed between re-rolls.
struct RollState {
    selection: Selection,
    order: [Seat; 4],
    processing: [Seat; 4],
    /// `Err(seat)` marks an attempt-unfixable random-suit pre-selection.
    rs_selections: Result<RsSelections, Seat>,
    tight: [bool; 4],
}

fn roll_all<R: Rng>(
    rng: &mut R,
    profile: &HandProfile,
    dead: &[Vec<bool>; 4],
    cfg: &GenConfig,
) -> Option<RollState> {
    // Selection exhaustion is caught here; it surfaces as a seatless
    // failed attempt and the normal re-roll logic retries it.
    let selection = select_subprofiles(rng, profile, dead, cfg).ok()?;
    let chosen = selection.subs(profile);
    let order = dealing_order(chosen, profile.dealer);
    let processing = processing_order(order, chosen);
    let rs_selections = pre_select_rs_suits(rng, &chosen, &order);
    let tight = match &rs_selections {
        Ok(selections) => tight_seats(&chosen, selections, cfg.dispersion_threshold),
        Err(_) => [false; 4],
    };
    Some(RollState {
        selection,
        order,
        processing,
        rs_selections,
        tight,
    })
}

fn roll_rs_only<R: Rng>(
    rng: &mut R,
    profile: &HandProfile,
    state: &mut RollState,
    cfg: &GenConfig,
) {
    let chosen = state.selection.subs(profile);
    state.rs_selections = pre_select_rs_suits(rng, &chosen, &state.order);
    state.tight = match &state.rs_selections {
        Ok(selections) => tight_seats(&chosen, selections, cfg.dispersion_threshold),
        Err(_) => [false; 4],
    };
}

/// The random-suit commitment of `seat`, if its chosen sub-profile has one.
fn rs_choice_for<'a>(
    seat: Seat,
    chosen: &[&'a SubProfile; 4],
    selections: &'a RsSelections,
) -> Option<RsChoice<'a>> {
    let rs = chosen[seat.idx()].random_suit.as_ref()?;
    let picked = selections[seat.idx()].as_ref()?;
    Some(RsChoice {
        chosen: picked,
        allowed: &rs.allowed_suits,
    })
}

/// Build one board, mutating `attribution` across the whole retry.
/// Returns the four matched hands, or `None` when the attempt budget is
/// exhausted.
pub(crate) fn build_board<R: Rng>(
    rng: &mut R,
    profile: &HandProfile,
    dead: &[Vec<bool>; 4],
    board_number: u32,
    cfg: &GenConfig,
    hooks: &mut GenHooks,
    attribution: &mut Attribution,
) -> Option<[Hand; 4]> {
    let mut i_sub = cfg.sub_reroll_initial.max(1);
    let mut i_rs = ((i_sub as f64) * cfg.rs_reroll_ratio).round() as u32;
    let mut since_sub: u32 = 0;
    let mut since_rs: u32 = 0;

    let mut state = roll_all(rng, profile, dead, cfg);

    for attempt in 1..=cfg.max_board_attempts {
        attribution.total_attempts += 1;

        if attempt > 1 {
            if since_sub >= i_sub {
                i_sub = cfg
                    .sub_reroll_min
                    .max(((i_sub as f64) * cfg.sub_reroll_decay).round() as u32)
                    .max(1);
                i_rs = ((i_sub as f64) * cfg.rs_reroll_ratio).round() as u32;
                trace!(board_number, attempt, i_sub, i_rs, "sub-profile re-roll");
                state = roll_all(rng, profile, dead, cfg);
                since_sub = 0;
                since_rs = 0;
            } else if since_rs >= i_rs.max(1) {
                if let Some(state) = state.as_mut() {
                    trace!(board_number, attempt, "random-suit re-roll");
                    roll_rs_only(rng, profile, state, cfg);
                }
                since_rs = 0;
            }
        }
        since_sub += 1;
        since_rs += 1;

        let Some(st) = state.as_ref() else {
            // Selection exhausted: a failed attempt with no seat to blame.
            hooks.attempt_failure(&AttemptFailure {
                board_number,
                attempt,
                seat: None,
                kind: None,
            });
            continue;
        };
        let chosen = st.selection.subs(profile);

        let selections = match &st.rs_selections {
            Ok(selections) => selections,
            Err(seat) => {
                let seat = *seat;
                attribution.record_checked(seat);
                attribution.record_first_failure(seat, MatchFailure::Shape);
                record_unchecked_others(attribution, &st.processing, seat);
                hooks.attempt_failure(&AttemptFailure {
                    board_number,
                    attempt,
                    seat: Some(seat),
                    kind: Some(MatchFailure::Shape),
                });
                continue;
            }
        };

        let mut deck = deck::shuffled(rng);
        let card_hands =
            match deal_with_help(rng, &mut deck, &chosen, &st.tight, &st.order, selections, cfg) {
                Ok(hands) => hands,
                Err(seat) => {
                    // Phase-2 HCP rejection.
                    attribution.record_checked(seat);
                    attribution.record_first_failure(seat, MatchFailure::Hcp);
                    record_unchecked_others(attribution, &st.processing, seat);
                    hooks.attempt_failure(&AttemptFailure {
                        board_number,
                        attempt,
                        seat: Some(seat),
                        kind: Some(MatchFailure::Hcp),
                    });
                    continue;
                }
            };

        // Constrained fill can starve a seat below 13 cards; such an
        // attempt can never be a legal deal.
        if let Some(&short) = st
            .processing
            .iter()
            .find(|s| card_hands[s.idx()].len() != 13)
        {
            attribution.record_checked(short);
            attribution.record_first_failure(short, MatchFailure::Shape);
            record_unchecked_others(attribution, &st.processing, short);
            hooks.attempt_failure(&AttemptFailure {
                board_number,
                attempt,
                seat: Some(short),
                kind: Some(MatchFailure::Shape),
            });
            continue;
        }

        let hands = card_hands.map(Hand::new);
        let mut failure: Option<(Seat, MatchFailure)> = None;
        let mut passed: Vec<Seat> = Vec::with_capacity(4);

        for &seat in &st.processing {
            attribution.record_checked(seat);
            let analysis = HandAnalysis::of(&hands[seat.idx()]);
            let ctx = MatchContext {
                rs_pre_committed: selections[seat.idx()].as_deref(),
                partner_rs: rs_choice_for(seat.partner(), &chosen, selections),
                opponent_rs: contingent_counterparty(seat, &chosen)
                    .and_then(|o| rs_choice_for(o, &chosen, selections)),
                exclusions: &profile.seat_profile(seat).unwrap().exclusions,
            };
            match match_analysis(&analysis, chosen[seat.idx()], &ctx, Some(&mut *rng)) {
                Ok(_) => passed.push(seat),
                Err(kind) => {
                    failure = Some((seat, kind));
                    break;
                }
            }
        }

        match failure {
            None => return Some(hands),
            Some((seat, kind)) => {
                attribution.record_first_failure(seat, kind);
                for &earlier in &passed {
                    attribution.record_passed_before_failure(earlier);
                }
                let reached: usize = passed.len() + 1;
                for &later in &st.processing[reached..] {
                    attribution.record_unchecked(later);
                }
                hooks.attempt_failure(&AttemptFailure {
                    board_number,
                    attempt,
                    seat: Some(seat),
                    kind: Some(kind),
                });
            }
        }
    }

    let summary = crate::attribution::ViabilitySummary::from_attribution(attribution);
    hooks.max_attempts(attribution, &summary);
    None
}

fn record_unchecked_others(attribution: &mut Attribution, processing: &[Seat; 4], failed: Seat) {
    for &seat in processing {
        if seat != failed {
            attribution.record_unchecked(seat);
        }
    }
}
