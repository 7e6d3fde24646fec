//! The public entry point: validate, then build boards one at a time with
//! board-level retries and adaptive re-seeding.

use crate::attribution::Attribution;
use crate::builder::build_board;
use crate::config::{GenConfig, GenHooks};
use crate::error::DealGenerationError;
use crate::profile::HandProfile;
use crate::validate::validate_profile_feasibility;
use dealer_core::{Deal, DealSet, Seat, Vulnerability};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::debug;

/// Generate `n` boards satisfying `profile`, deterministically from `seed`
/// (until a wall-clock re-seed fires; see [`GenConfig::reseed_threshold`]).
pub fn generate_deals(
    seed: u64,
    profile: &HandProfile,
    n: u32,
    rotate: bool,
) -> Result<DealSet, DealGenerationError> {
    generate_deals_with(
        seed,
        profile,
        n,
        rotate,
        &GenConfig::default(),
        &mut GenHooks::default(),
    )
}

/// As [`generate_deals`], with explicit configuration and debug hooks.
pub fn generate_deals_with(
    seed: u64,
    profile: &HandProfile,
    n: u32,
    rotate: bool,
    cfg: &GenConfig,
    hooks: &mut GenHooks,
) -> Result<DealSet, DealGenerationError> {
    let report = validate_profile_feasibility(profile)?;
    let dead = report.dead_mask(profile);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut deals = Vec::with_capacity(n as usize);
    let mut board_times = Vec::with_capacity(n as usize);
    let mut reseed_count = 0u32;

    for board_number in 1..=n {
        let board_start = Instant::now();
        let mut reseed_clock = Instant::now();
        let mut attribution = Attribution::default();
        let mut built = None;

        for retry in 0..cfg.max_board_retries {
            if let Some(hands) = build_board(
                &mut rng,
                profile,
                &dead,
                board_number,
                cfg,
                hooks,
                &mut attribution,
            ) {
                let total_cards: usize = hands.iter().map(|h| h.cards.len()).sum();
                if total_cards != 52 {
                    return Err(DealGenerationError::Internal {
                        detail: format!("board {board_number} dealt {total_cards} cards"),
                    });
                }
                built = Some(Deal {
                    board_number,
                    dealer: profile.dealer,
                    vulnerability: Vulnerability::from_board_number(board_number),
                    hands,
                    attempts: attribution.total_attempts,
                    retries: retry,
                });
                break;
            }

            // A slow board is probably on an unfavourable trajectory:
            // replace the RNG from system entropy and keep trying. The
            // re-seed clock restarts so the new state gets a full budget.
            if let Some(threshold) = cfg.reseed_threshold {
                if reseed_clock.elapsed() >= threshold {
                    rng = StdRng::from_entropy();
                    reseed_count += 1;
                    reseed_clock = Instant::now();
                    debug!(board_number, reseed_count, "re-seeded from system entropy");
                }
            }
        }

        board_times.push(board_start.elapsed());
        match built {
            Some(deal) => deals.push(deal),
            None => {
                return Err(DealGenerationError::BoardExhausted {
                    board: board_number,
                    attribution,
                })
            }
        }
    }

    apply_vulnerability_and_rotation(&mut rng, &mut deals, rotate);

    Ok(DealSet {
        deals,
        board_times,
        reseed_count,
    })
}

/// Post-processing: set each board's vulnerability from the standard
/// 16-board rotation, and when `rotate` is on, swap seats within both
/// pairs (N with S, E with W) with probability one half per board so the
/// constrained seats do not always sit in the same chairs.
pub fn apply_vulnerability_and_rotation<R: Rng>(rng: &mut R, deals: &mut [Deal], rotate: bool) {
    for deal in deals.iter_mut() {
        deal.vulnerability = Vulnerability::from_board_number(deal.board_number);
        if rotate && rng.gen_bool(0.5) {
            deal.hands.swap(Seat::North.idx(), Seat::South.idx());
            deal.hands.swap(Seat::East.idx(), Seat::West.idx());
            deal.dealer = deal.dealer.partner();
        }
    }
}
