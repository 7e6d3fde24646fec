//! Profile validation: structural invariants, pair-coupling feasibility,
//! and cross-seat feasibility with dead sub-profile detection.
//!
//! The three passes always run in that order. Structural violations are
//! `ProfileError::Structural`; an empty coupling or an empty feasible
//! tuple set is `ProfileError::Infeasible`. Dead sub-profiles (feasible in
//! isolation but in no feasible combination) only warn, and are excluded
//! from runtime selection.

use crate::error::ProfileError;
use crate::profile::{
    HandProfile, RandomSuitConstraint, SeatProfile, StandardConstraints, SubProfile, SuitRange,
    SUIT_HCP_MAX,
};
use dealer_core::deck::MAX_HAND_HCP;
use dealer_core::{Pair, Seat, Suit};
use serde::Serialize;
use tracing::warn;

const DECK_HCP: u32 = dealer_core::deck::FULL_HCP_SUM;
const CARDS_PER_SUIT: u32 = 13;

/// A sub-profile that participates in no feasible 4-seat combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadSubProfile {
    pub seat: Seat,
    pub index: usize,
}

/// Outcome of the full feasibility validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibilityReport {
    /// 4-tuples admissible under role filtering and bespoke maps.
    pub admissible_tuples: usize,
    /// Admissible tuples that also pass cross-seat feasibility.
    pub feasible_tuples: usize,
    /// Sub-profiles excluded from runtime selection.
    pub dead: Vec<DeadSubProfile>,
}

impl FeasibilityReport {
    /// Per-seat dead flags, indexed by `Seat::idx` then sub-profile index.
    pub fn dead_mask(&self, profile: &HandProfile) -> [Vec<bool>; 4] {
        let mut mask = Seat::ALL.map(|seat| {
            let len = profile
                .seat_profile(seat)
                .map(|sp| sp.subprofiles.len())
                .unwrap_or(0);
            vec![false; len]
        });
        for dead in &self.dead {
            mask[dead.seat.idx()][dead.index] = true;
        }
        mask
    }
}

/// Structural validation only: every model-level invariant, no
/// cross-seat reasoning.
pub fn validate_profile(profile: &HandProfile) -> Result<(), ProfileError> {
    if profile.name.is_empty() {
        return Err(ProfileError::structural("profile name must not be empty"));
    }

    for seat in Seat::ALL {
        let sp = profile
            .seat_profile(seat)
            .ok_or_else(|| ProfileError::structural(format!("seat {seat} missing")))?;
        validate_seat_profile(seat, sp)?;
    }

    for pair in Pair::ALL {
        validate_pair_policy(profile, pair)?;
    }

    Ok(())
}

/// Structural + coupling + cross-seat feasibility.
pub fn validate_profile_feasibility(
    profile: &HandProfile,
) -> Result<FeasibilityReport, ProfileError> {
    validate_profile(profile)?;

    let ns = pair_index_options(profile, Pair::NS);
    let ew = pair_index_options(profile, Pair::EW);
    if ns.is_empty() {
        return Err(ProfileError::infeasible(
            "no admissible NS sub-profile index pair under the NS role mode",
        ));
    }
    if ew.is_empty() {
        return Err(ProfileError::infeasible(
            "no admissible EW sub-profile index pair under the EW role mode",
        ));
    }

    let seat_subs = Seat::ALL.map(|seat| &profile.seat_profile(seat).unwrap().subprofiles);
    let mut alive = seat_subs.clone().map(|subs| vec![false; subs.len()]);
    let mut feasible_tuples = 0usize;

    for &(n, s) in &ns {
        for &(e, w) in &ew {
            let tuple = [
                &seat_subs[Seat::North.idx()][n],
                &seat_subs[Seat::East.idx()][e],
                &seat_subs[Seat::South.idx()][s],
                &seat_subs[Seat::West.idx()][w],
            ];
            if tuple_feasible(tuple) {
                feasible_tuples += 1;
                alive[Seat::North.idx()][n] = true;
                alive[Seat::East.idx()][e] = true;
                alive[Seat::South.idx()][s] = true;
                alive[Seat::West.idx()][w] = true;
            }
        }
    }

    if feasible_tuples == 0 {
        return Err(ProfileError::infeasible(
            "no admissible sub-profile combination satisfies the deck-level \
             HCP and card-count sums",
        ));
    }

    let mut dead = Vec::new();
    for seat in Seat::ALL {
        for (index, is_alive) in alive[seat.idx()].iter().enumerate() {
            if !is_alive {
                warn!(
                    seat = %seat,
                    subprofile = index,
                    "dead sub-profile: participates in no feasible combination"
                );
                dead.push(DeadSubProfile { seat, index });
            }
        }
    }

    Ok(FeasibilityReport {
        admissible_tuples: ns.len() * ew.len(),
        feasible_tuples,
        dead,
    })
}

/// Deck-level feasibility of one sub-profile per seat, N-E-S-W order.
pub(crate) fn tuple_feasible(subs: [&SubProfile; 4]) -> bool {
    let min_hcp: u32 = subs.iter().map(|s| s.standard.total_hcp_min as u32).sum();
    if min_hcp > DECK_HCP {
        return false;
    }
    let max_hcp: u32 = subs.iter().map(|s| s.standard.total_hcp_max as u32).sum();
    if max_hcp < DECK_HCP {
        return false;
    }
    for suit in Suit::ALL {
        let min_cards: u32 = subs
            .iter()
            .map(|s| s.standard.suit(suit).min_cards as u32)
            .sum();
        if min_cards > CARDS_PER_SUIT {
            return false;
        }
        let max_cards: u32 = subs
            .iter()
            .map(|s| s.standard.suit(suit).max_cards as u32)
            .sum();
        if max_cards < CARDS_PER_SUIT {
            return false;
        }
    }
    true
}

/// The roles a seat may serve within its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Driver,
    Follower,
}

pub(crate) fn usable_in_role(sub: &SubProfile, pair: Pair, role: Role) -> bool {
    match role {
        Role::Driver => sub.role_usage(pair).allows_driver(),
        Role::Follower => sub.role_usage(pair).allows_follower(),
    }
}

/// Admissible (first, second) sub-profile index pairs for a pair's two
/// seats (first = N or E, second = S or W), under role filtering and the
/// bespoke map. For `NoDriverNoIndex` the seats are independent and every
/// index combination is admissible.
pub(crate) fn pair_index_options(profile: &HandProfile, pair: Pair) -> Vec<(usize, usize)> {
    let [first, second] = pair.seats();
    let first_subs = &profile.seat_profile(first).unwrap().subprofiles;
    let second_subs = &profile.seat_profile(second).unwrap().subprofiles;
    let mode = profile.role_mode(pair);

    if !mode.is_coupled() {
        let mut out = Vec::with_capacity(first_subs.len() * second_subs.len());
        for f in 0..first_subs.len() {
            for s in 0..second_subs.len() {
                out.push((f, s));
            }
        }
        return out;
    }

    let mut out = Vec::new();
    for driver in mode.possible_drivers(pair) {
        let follower = driver.partner();
        let (driver_subs, follower_subs) = if driver == first {
            (first_subs, second_subs)
        } else {
            (second_subs, first_subs)
        };
        let map = profile.bespoke_map(pair);
        for (d_idx, d_sub) in driver_subs.iter().enumerate() {
            if !usable_in_role(d_sub, pair, Role::Driver) {
                continue;
            }
            let f_idx = match map {
                Some(map) => match map.get(&d_idx) {
                    Some(&f) => f,
                    None => continue,
                },
                None => d_idx,
            };
            let Some(f_sub) = follower_subs.get(f_idx) else {
                continue;
            };
            if !usable_in_role(f_sub, pair, Role::Follower) {
                continue;
            }
            let pair_indices = if driver == first {
                (d_idx, f_idx)
            } else {
                (f_idx, d_idx)
            };
            if !out.contains(&pair_indices) {
                out.push(pair_indices);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

fn validate_suit_range(sr: &SuitRange, context: &str) -> Result<(), ProfileError> {
    if sr.max_cards > 13 || sr.min_cards > sr.max_cards {
        return Err(ProfileError::structural(format!(
            "{context}: card range {}..{} is outside 0..13 or inverted",
            sr.min_cards, sr.max_cards
        )));
    }
    if sr.max_hcp > SUIT_HCP_MAX || sr.min_hcp > sr.max_hcp {
        return Err(ProfileError::structural(format!(
            "{context}: suit HCP range {}..{} is outside 0..{SUIT_HCP_MAX} or inverted",
            sr.min_hcp, sr.max_hcp
        )));
    }
    Ok(())
}

fn validate_standard(std: &StandardConstraints, context: &str) -> Result<(), ProfileError> {
    for suit in Suit::DESCENDING {
        validate_suit_range(std.suit(suit), &format!("{context} suit {suit}"))?;
    }
    if std.total_hcp_max > MAX_HAND_HCP || std.total_hcp_min > std.total_hcp_max {
        return Err(ProfileError::structural(format!(
            "{context}: total HCP range {}..{} is outside 0..{MAX_HAND_HCP} or inverted",
            std.total_hcp_min, std.total_hcp_max
        )));
    }

    let min_cards: u32 = Suit::ALL.iter().map(|&s| std.suit(s).min_cards as u32).sum();
    if min_cards > CARDS_PER_SUIT {
        return Err(ProfileError::structural(format!(
            "{context}: per-suit minimums sum to {min_cards} > 13"
        )));
    }
    let max_cards: u32 = Suit::ALL.iter().map(|&s| std.suit(s).max_cards as u32).sum();
    if max_cards < CARDS_PER_SUIT {
        return Err(ProfileError::structural(format!(
            "{context}: per-suit maximums sum to {max_cards} < 13"
        )));
    }

    let min_suit_hcp: u32 = Suit::ALL.iter().map(|&s| std.suit(s).min_hcp as u32).sum();
    if min_suit_hcp > std.total_hcp_max as u32 {
        return Err(ProfileError::structural(format!(
            "{context}: per-suit HCP minimums sum to {min_suit_hcp} > total_hcp_max {}",
            std.total_hcp_max
        )));
    }
    let max_suit_hcp: u32 = Suit::ALL.iter().map(|&s| std.suit(s).max_hcp as u32).sum();
    if max_suit_hcp < std.total_hcp_min as u32 {
        return Err(ProfileError::structural(format!(
            "{context}: per-suit HCP maximums sum to {max_suit_hcp} < total_hcp_min {}",
            std.total_hcp_min
        )));
    }
    Ok(())
}

fn validate_random_suit(
    rs: &RandomSuitConstraint,
    std: &StandardConstraints,
    context: &str,
) -> Result<(), ProfileError> {
    if rs.allowed_suits.is_empty() {
        return Err(ProfileError::structural(format!(
            "{context}: allowed_suits must not be empty"
        )));
    }
    for (i, suit) in rs.allowed_suits.iter().enumerate() {
        if rs.allowed_suits[..i].contains(suit) {
            return Err(ProfileError::structural(format!(
                "{context}: duplicate allowed suit {suit}"
            )));
        }
    }
    if rs.required_suits_count == 0 || rs.required_suits_count > rs.allowed_suits.len() {
        return Err(ProfileError::structural(format!(
            "{context}: required_suits_count {} must be in 1..={}",
            rs.required_suits_count,
            rs.allowed_suits.len()
        )));
    }
    validate_suit_range(&rs.per_suit_range, &format!("{context} per_suit_range"))?;
    for (suit, range) in &rs.pair_overrides {
        if !rs.allowed_suits.contains(suit) {
            return Err(ProfileError::structural(format!(
                "{context}: pair override for {suit} which is not an allowed suit"
            )));
        }
        validate_suit_range(range, &format!("{context} pair override {suit}"))?;
    }

    // A chosen suit's range replaces the standard one; the combined card
    // counts must still admit a 13-card hand for every possible choice.
    for &chosen in &rs.allowed_suits {
        let effective = |suit: Suit| -> &SuitRange {
            if suit == chosen {
                rs.range_for(suit)
            } else {
                std.suit(suit)
            }
        };
        let min: u32 = Suit::ALL.iter().map(|&s| effective(s).min_cards as u32).sum();
        if min > CARDS_PER_SUIT {
            return Err(ProfileError::structural(format!(
                "{context}: choosing {chosen} makes per-suit minimums sum to {min} > 13"
            )));
        }
        let max: u32 = Suit::ALL.iter().map(|&s| effective(s).max_cards as u32).sum();
        if max < CARDS_PER_SUIT {
            return Err(ProfileError::structural(format!(
                "{context}: choosing {chosen} makes per-suit maximums sum to {max} < 13"
            )));
        }
    }
    Ok(())
}

fn validate_subprofile(seat: Seat, index: usize, sub: &SubProfile) -> Result<(), ProfileError> {
    let context = format!("seat {seat} sub-profile {index}");

    let optional_count = sub.random_suit.is_some() as u8
        + sub.partner_contingent.is_some() as u8
        + sub.opponent_contingent.is_some() as u8;
    if optional_count > 1 {
        return Err(ProfileError::structural(format!(
            "{context}: at most one of random-suit, partner-contingent and \
             opponent-contingent may be present"
        )));
    }

    if !(sub.weight.is_finite() && sub.weight >= 0.0) {
        return Err(ProfileError::structural(format!(
            "{context}: weight must be finite and non-negative, got {}",
            sub.weight
        )));
    }

    validate_standard(&sub.standard, &context)?;

    if let Some(rs) = &sub.random_suit {
        validate_random_suit(rs, &sub.standard, &context)?;
    }
    if let Some((_, cc)) = sub.contingent() {
        validate_suit_range(&cc.suit_range, &format!("{context} contingent"))?;
    }
    Ok(())
}

fn validate_seat_profile(seat: Seat, sp: &SeatProfile) -> Result<(), ProfileError> {
    if sp.subprofiles.is_empty() {
        return Err(ProfileError::structural(format!(
            "seat {seat} has no sub-profiles"
        )));
    }
    for (index, sub) in sp.subprofiles.iter().enumerate() {
        validate_subprofile(seat, index, sub)?;
    }
    for pattern in &sp.exclusions {
        if !pattern.is_well_formed() {
            return Err(ProfileError::structural(format!(
                "seat {seat}: malformed exclusion shape \"{pattern}\""
            )));
        }
    }
    Ok(())
}

fn validate_pair_policy(profile: &HandProfile, pair: Pair) -> Result<(), ProfileError> {
    let mode = profile.role_mode(pair);
    if !mode.valid_for(pair) {
        return Err(ProfileError::structural(format!(
            "role mode {mode:?} is not valid for the {pair:?} pair"
        )));
    }

    let [first, second] = pair.seats();
    let first_len = profile.seat_profile(first).unwrap().subprofiles.len();
    let second_len = profile.seat_profile(second).unwrap().subprofiles.len();

    match profile.bespoke_map(pair) {
        Some(map) => {
            if !mode.is_coupled() {
                return Err(ProfileError::structural(format!(
                    "{pair:?} bespoke map requires a driver role mode, \
                     not no_driver_no_index"
                )));
            }
            for driver in mode.possible_drivers(pair) {
                let (driver_len, follower_len) = if driver == first {
                    (first_len, second_len)
                } else {
                    (second_len, first_len)
                };
                for d_idx in 0..driver_len {
                    let Some(&f_idx) = map.get(&d_idx) else {
                        return Err(ProfileError::structural(format!(
                            "{pair:?} bespoke map is missing driver index {d_idx}"
                        )));
                    };
                    if f_idx >= follower_len {
                        return Err(ProfileError::structural(format!(
                            "{pair:?} bespoke map sends {d_idx} to {f_idx}, \
                             beyond the follower's {follower_len} sub-profiles"
                        )));
                    }
                }
            }
        }
        None => {
            if mode.is_coupled() && first_len != second_len {
                return Err(ProfileError::structural(format!(
                    "{pair:?} index coupling without a bespoke map requires equal \
                     sub-profile counts, got {first_len} and {second_len}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ContingentConstraint, RoleMode, RoleUsage, ShapePattern};
    use std::collections::BTreeMap;

    fn open_profile() -> HandProfile {
        HandProfile::open("test", Seat::North)
    }

    fn with_min_hcp(profile: &mut HandProfile, mins: [u8; 4]) {
        for (seat, min) in Seat::ALL.into_iter().zip(mins) {
            let sp = profile.seat_profile_mut(seat).unwrap();
            sp.subprofiles[0].standard.total_hcp_min = min;
        }
    }

    #[test]
    fn test_open_profile_validates() {
        let profile = open_profile();
        validate_profile(&profile).unwrap();
        let report = validate_profile_feasibility(&profile).unwrap();
        assert_eq!(report.admissible_tuples, 1);
        assert_eq!(report.feasible_tuples, 1);
        assert!(report.dead.is_empty());
    }

    #[test]
    fn test_impossible_suit_minimum_rejected() {
        let mut profile = open_profile();
        profile
            .seat_profile_mut(Seat::North)
            .unwrap()
            .subprofiles[0]
            .standard
            .spades = SuitRange::cards(14, 14);
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_missing_seat_rejected() {
        let mut profile = open_profile();
        profile.seat_profiles.remove(&Seat::West);
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_two_optional_constraints_rejected() {
        let mut profile = open_profile();
        let sub = &mut profile.seat_profile_mut(Seat::North).unwrap().subprofiles[0];
        sub.random_suit = Some(RandomSuitConstraint {
            allowed_suits: vec![Suit::Spades],
            required_suits_count: 1,
            per_suit_range: SuitRange::full(),
            pair_overrides: BTreeMap::new(),
        });
        sub.partner_contingent = Some(ContingentConstraint {
            use_non_chosen_suit: false,
            suit_range: SuitRange::full(),
        });
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_hcp_sum_41_rejected_40_accepted() {
        let mut profile = open_profile();
        with_min_hcp(&mut profile, [12, 10, 10, 9]);
        assert!(matches!(
            validate_profile_feasibility(&profile),
            Err(ProfileError::Infeasible { .. })
        ));

        let mut profile = open_profile();
        with_min_hcp(&mut profile, [12, 10, 10, 8]);
        validate_profile_feasibility(&profile).unwrap();
    }

    #[test]
    fn test_suit_min_sum_over_13_infeasible() {
        let mut profile = open_profile();
        for seat in Seat::ALL {
            let sub = &mut profile.seat_profile_mut(seat).unwrap().subprofiles[0];
            sub.standard.spades.min_cards = 4; // 16 spades demanded in total
        }
        assert!(matches!(
            validate_profile_feasibility(&profile),
            Err(ProfileError::Infeasible { .. })
        ));
    }

    #[test]
    fn test_cross_seat_predicate_pair_symmetric() {
        // Swapping the two seats of a pair must not change the outcome.
        let mut profile = open_profile();
        with_min_hcp(&mut profile, [15, 9, 8, 8]);
        let a = validate_profile_feasibility(&profile).is_ok();

        let mut swapped = open_profile();
        with_min_hcp(&mut swapped, [8, 9, 15, 8]);
        let b = validate_profile_feasibility(&swapped).is_ok();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dead_subprofile_warns_but_validates() {
        let mut profile = open_profile();
        // North's second sub-profile demands 25 HCP while every other seat
        // demands at least 6: dead, but North's first sub-profile lives.
        with_min_hcp(&mut profile, [0, 6, 6, 6]);
        let mut dead_sub = SubProfile::standard_only(StandardConstraints::open());
        dead_sub.standard.total_hcp_min = 25;
        profile
            .seat_profile_mut(Seat::North)
            .unwrap()
            .subprofiles
            .push(dead_sub);

        let report = validate_profile_feasibility(&profile).unwrap();
        assert_eq!(
            report.dead,
            vec![DeadSubProfile {
                seat: Seat::North,
                index: 1
            }]
        );
        let mask = report.dead_mask(&profile);
        assert_eq!(mask[Seat::North.idx()], vec![false, true]);
    }

    #[test]
    fn test_all_dead_on_seat_rejected() {
        let mut profile = open_profile();
        with_min_hcp(&mut profile, [25, 6, 6, 6]);
        assert!(matches!(
            validate_profile_feasibility(&profile),
            Err(ProfileError::Infeasible { .. })
        ));
    }

    #[test]
    fn test_role_mode_wrong_pair_rejected() {
        let mut profile = open_profile();
        profile.ns_role_mode = RoleMode::EastDrives;
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_coupling_requires_equal_counts_without_bespoke() {
        let mut profile = open_profile();
        profile.ns_role_mode = RoleMode::NorthDrives;
        profile
            .seat_profile_mut(Seat::North)
            .unwrap()
            .subprofiles
            .push(SubProfile::standard_only(StandardConstraints::open()));
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_bespoke_map_requires_driver_mode() {
        let mut profile = open_profile();
        profile.ns_bespoke_map = Some(BTreeMap::from([(0, 0)]));
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));

        profile.ns_role_mode = RoleMode::NorthDrives;
        validate_profile(&profile).unwrap();
    }

    #[test]
    fn test_bespoke_map_must_be_total() {
        let mut profile = open_profile();
        profile.ns_role_mode = RoleMode::NorthDrives;
        profile
            .seat_profile_mut(Seat::North)
            .unwrap()
            .subprofiles
            .push(SubProfile::standard_only(StandardConstraints::open()));
        profile
            .seat_profile_mut(Seat::South)
            .unwrap()
            .subprofiles
            .push(SubProfile::standard_only(StandardConstraints::open()));
        profile.ns_bespoke_map = Some(BTreeMap::from([(0, 1)]));
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));

        profile.ns_bespoke_map = Some(BTreeMap::from([(0, 1), (1, 0)]));
        validate_profile(&profile).unwrap();

        profile.ns_bespoke_map = Some(BTreeMap::from([(0, 1), (1, 5)]));
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_pair_options_respect_role_usage() {
        let mut profile = open_profile();
        profile.ns_role_mode = RoleMode::NorthDrives;
        for seat in [Seat::North, Seat::South] {
            let sp = profile.seat_profile_mut(seat).unwrap();
            sp.subprofiles
                .push(SubProfile::standard_only(StandardConstraints::open()));
        }
        // North's second sub-profile is follower-only; North always drives,
        // so only index 0 is usable as driver.
        profile.seat_profile_mut(Seat::North).unwrap().subprofiles[1].ns_role_usage =
            RoleUsage::FollowerOnly;

        let options = pair_index_options(&profile, Pair::NS);
        assert_eq!(options, vec![(0, 0)]);
    }

    #[test]
    fn test_pair_options_uncoupled_is_cartesian() {
        let mut profile = open_profile();
        profile
            .seat_profile_mut(Seat::North)
            .unwrap()
            .subprofiles
            .push(SubProfile::standard_only(StandardConstraints::open()));
        let options = pair_index_options(&profile, Pair::NS);
        assert_eq!(options, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_random_driver_unions_both_directions() {
        let mut profile = open_profile();
        profile.ns_role_mode = RoleMode::NsRandomDriver;
        for seat in [Seat::North, Seat::South] {
            let sp = profile.seat_profile_mut(seat).unwrap();
            sp.subprofiles
                .push(SubProfile::standard_only(StandardConstraints::open()));
        }
        profile.ns_bespoke_map = Some(BTreeMap::from([(0, 1), (1, 0)]));
        let options = pair_index_options(&profile, Pair::NS);
        // North driving gives (0,1) and (1,0); South driving gives the
        // mirror images (1,0) and (0,1) — the union stays deduplicated.
        assert_eq!(options, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_malformed_exclusion_rejected() {
        let mut profile = open_profile();
        profile
            .seat_profile_mut(Seat::East)
            .unwrap()
            .exclusions
            .push(ShapePattern::new("44"));
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }

    #[test]
    fn test_rs_conflicting_with_standard_minimums_rejected() {
        let mut profile = open_profile();
        let sub = &mut profile.seat_profile_mut(Seat::West).unwrap().subprofiles[0];
        // 6+ hearts and diamonds demanded by standard, plus an RS suit
        // demanding 6 in spades: choosing spades would need 18 cards.
        sub.standard.hearts.min_cards = 6;
        sub.standard.diamonds.min_cards = 6;
        sub.random_suit = Some(RandomSuitConstraint {
            allowed_suits: vec![Suit::Spades],
            required_suits_count: 1,
            per_suit_range: SuitRange::cards(6, 6),
            pair_overrides: BTreeMap::new(),
        });
        assert!(matches!(
            validate_profile(&profile),
            Err(ProfileError::Structural { .. })
        ));
    }
}
