//! Per-board sub-profile selection.
//!
//! Coupled pairs pick a driver index by weight and derive the follower
//! index through the bespoke map (or index identity); independent seats
//! pick by weight alone. Selections that fail cross-seat feasibility are
//! resampled up to the configured retry cap.

use crate::config::GenConfig;
use crate::error::DealGenerationError;
use crate::profile::{HandProfile, RoleMode, SubProfile};
use crate::validate::{tuple_feasible, usable_in_role, Role};
use dealer_core::{Pair, Seat};
use rand::Rng;

/// One board's sub-profile choice: an index per seat, by `Seat::idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub indices: [usize; 4],
}

impl Selection {
    pub fn subs<'a>(&self, profile: &'a HandProfile) -> [&'a SubProfile; 4] {
        Seat::ALL.map(|seat| {
            &profile.seat_profile(seat).unwrap().subprofiles[self.indices[seat.idx()]]
        })
    }
}

/// Weighted index choice over `candidates`; a zero total weight falls back
/// to a uniform pick.
fn weighted_pick<R: Rng>(rng: &mut R, candidates: &[(usize, f64)]) -> usize {
    debug_assert!(!candidates.is_empty());
    let total: f64 = candidates.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return candidates[rng.gen_range(0..candidates.len())].0;
    }
    let mut threshold = rng.gen_range(0.0..total);
    for &(index, weight) in candidates {
        if threshold < weight {
            return index;
        }
        threshold -= weight;
    }
    candidates[candidates.len() - 1].0
}

fn eligible_independent(subs: &[SubProfile], dead: &[bool]) -> Vec<(usize, f64)> {
    subs.iter()
        .enumerate()
        .filter(|(i, _)| !dead[*i])
        .map(|(i, sub)| (i, sub.weight))
        .collect()
}

/// Pick indices for one pair, writing into `indices`. Returns false when
/// no eligible choice exists for the rolled driver.
fn select_pair<R: Rng>(
    rng: &mut R,
    profile: &HandProfile,
    pair: Pair,
    dead: &[Vec<bool>; 4],
    indices: &mut [usize; 4],
) -> bool {
    let mode = profile.role_mode(pair);
    let [first, second] = pair.seats();

    if !mode.is_coupled() {
        for seat in [first, second] {
            let subs = &profile.seat_profile(seat).unwrap().subprofiles;
            let eligible = eligible_independent(subs, &dead[seat.idx()]);
            if eligible.is_empty() {
                return false;
            }
            indices[seat.idx()] = weighted_pick(rng, &eligible);
        }
        return true;
    }

    let driver = match mode {
        RoleMode::NsRandomDriver | RoleMode::EwRandomDriver => {
            let seats = pair.seats();
            seats[rng.gen_range(0..2)]
        }
        mode => mode.fixed_driver().expect("coupled mode has a driver"),
    };
    let follower = driver.partner();

    let driver_subs = &profile.seat_profile(driver).unwrap().subprofiles;
    let follower_subs = &profile.seat_profile(follower).unwrap().subprofiles;
    let map = profile.bespoke_map(pair);

    // Only drivers whose mapped follower is itself usable are candidates.
    let eligible: Vec<(usize, f64)> = driver_subs
        .iter()
        .enumerate()
        .filter(|(d_idx, d_sub)| {
            if dead[driver.idx()][*d_idx] || !usable_in_role(d_sub, pair, Role::Driver) {
                return false;
            }
            let f_idx = match map {
                Some(map) => match map.get(d_idx) {
                    Some(&f) => f,
                    None => return false,
                },
                None => *d_idx,
            };
            follower_subs.get(f_idx).is_some_and(|f_sub| {
                !dead[follower.idx()][f_idx] && usable_in_role(f_sub, pair, Role::Follower)
            })
        })
        .map(|(d_idx, d_sub)| (d_idx, d_sub.weight))
        .collect();
    if eligible.is_empty() {
        return false;
    }

    let d_idx = weighted_pick(rng, &eligible);
    let f_idx = match map {
        Some(map) => map[&d_idx],
        None => d_idx,
    };
    indices[driver.idx()] = d_idx;
    indices[follower.idx()] = f_idx;
    true
}

/// Select one sub-profile per seat for a board, retrying until the 4-tuple
/// passes cross-seat feasibility. Exhausting the retry cap yields
/// `SelectionExhausted`, which the builder treats as a failed attempt.
pub fn select_subprofiles<R: Rng>(
    rng: &mut R,
    profile: &HandProfile,
    dead: &[Vec<bool>; 4],
    cfg: &GenConfig,
) -> Result<Selection, DealGenerationError> {
    for _ in 0..cfg.max_selection_retries {
        let mut indices = [0usize; 4];
        if !select_pair(rng, profile, Pair::NS, dead, &mut indices)
            || !select_pair(rng, profile, Pair::EW, dead, &mut indices)
        {
            continue;
        }
        let selection = Selection { indices };
        if tuple_feasible(selection.subs(profile)) {
            return Ok(selection);
        }
    }
    Err(DealGenerationError::SelectionExhausted {
        retries: cfg.max_selection_retries,
    })
}
