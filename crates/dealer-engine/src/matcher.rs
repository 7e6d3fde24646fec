//! Decides whether a dealt hand satisfies a sub-profile, and classifies
//! failures as shape- or HCP-driven.
//!
//! Matching is a pure function of its inputs; the optional RNG is consumed
//! only when no random-suit pre-commitment is supplied and candidate
//! subsets tie in difficulty.

use crate::profile::{RandomSuitConstraint, ShapePattern, SubProfile, TargetSource};
use dealer_core::{Hand, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Why a hand failed its sub-profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchFailure {
    /// A card-count constraint or shape exclusion was violated.
    Shape,
    /// A total or per-suit HCP constraint was violated.
    Hcp,
}

/// Per-suit counts and HCP computed once per candidate hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandAnalysis {
    /// Indexed by `Suit::idx`.
    pub suit_counts: [u8; 4],
    /// Indexed by `Suit::idx`.
    pub suit_hcp: [u8; 4],
    pub total_hcp: u8,
}

impl HandAnalysis {
    pub fn of(hand: &Hand) -> Self {
        let mut suit_counts = [0u8; 4];
        let mut suit_hcp = [0u8; 4];
        let mut total_hcp = 0u8;
        for card in &hand.cards {
            let idx = card.suit.idx();
            suit_counts[idx] += 1;
            let hcp = card.hcp();
            suit_hcp[idx] += hcp;
            total_hcp += hcp;
        }
        Self {
            suit_counts,
            suit_hcp,
            total_hcp,
        }
    }

    pub fn count(&self, suit: Suit) -> u8 {
        self.suit_counts[suit.idx()]
    }

    pub fn hcp(&self, suit: Suit) -> u8 {
        self.suit_hcp[suit.idx()]
    }

    /// Counts in S-H-D-C order, for shape-pattern matching.
    pub fn shape_counts(&self) -> [u8; 4] {
        Suit::DESCENDING.map(|s| self.count(s))
    }
}

/// A counterparty's random-suit commitment: the suits it chose and the
/// allowed set it chose from.
#[derive(Debug, Clone, Copy)]
pub struct RsChoice<'a> {
    pub chosen: &'a [Suit],
    pub allowed: &'a [Suit],
}

impl RsChoice<'_> {
    /// Resolve the contingent target suit. The chosen target is the first
    /// chosen suit; the non-chosen target is the unique allowed suit not
    /// chosen. Returns `None` when no unique target exists.
    pub fn target_suit(&self, non_chosen: bool) -> Option<Suit> {
        if non_chosen {
            let mut remaining = self
                .allowed
                .iter()
                .copied()
                .filter(|s| !self.chosen.contains(s));
            let first = remaining.next()?;
            if remaining.next().is_some() {
                return None;
            }
            Some(first)
        } else {
            self.chosen.first().copied()
        }
    }
}

/// Everything the matcher needs beyond the hand and sub-profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Random suits the builder fixed for this seat before dealing. When
    /// present, the matcher checks exactly these suits instead of
    /// enumerating candidates.
    pub rs_pre_committed: Option<&'a [Suit]>,
    /// The partner's random-suit commitment, for partner-contingent
    /// constraints.
    pub partner_rs: Option<RsChoice<'a>>,
    /// The opposing pair's random-suit commitment, for
    /// opponent-contingent constraints.
    pub opponent_rs: Option<RsChoice<'a>>,
    /// Seat-level forbidden shapes.
    pub exclusions: &'a [ShapePattern],
}

/// Match a 13-card hand against a sub-profile.
///
/// Returns `Ok(Some(suits))` with the accepted random-suit choice for RS
/// sub-profiles, `Ok(None)` otherwise. Check order is fixed: total HCP,
/// standard per-suit ranges (skipping RS-chosen suits, whose ranges
/// replace the standard ones), RS per-suit ranges, contingent target,
/// shape exclusions.
pub fn match_hand<R: Rng>(
    hand: &Hand,
    sub: &SubProfile,
    ctx: &MatchContext<'_>,
    rng: Option<&mut R>,
) -> Result<Option<Vec<Suit>>, MatchFailure> {
    let analysis = HandAnalysis::of(hand);
    match_analysis(&analysis, sub, ctx, rng)
}

/// As [`match_hand`], but for a pre-computed analysis.
pub fn match_analysis<R: Rng>(
    analysis: &HandAnalysis,
    sub: &SubProfile,
    ctx: &MatchContext<'_>,
    rng: Option<&mut R>,
) -> Result<Option<Vec<Suit>>, MatchFailure> {
    let std = &sub.standard;
    if analysis.total_hcp < std.total_hcp_min || analysis.total_hcp > std.total_hcp_max {
        return Err(MatchFailure::Hcp);
    }

    let rs_chosen = match &sub.random_suit {
        Some(rs) => match ctx.rs_pre_committed {
            Some(chosen) => {
                check_standard_skipping(analysis, sub, chosen)?;
                check_rs_suits(analysis, rs, chosen)?;
                Some(chosen.to_vec())
            }
            None => Some(enumerate_rs(analysis, sub, rs, rng)?),
        },
        None => {
            check_standard_skipping(analysis, sub, &[])?;
            None
        }
    };

    if let Some((source, cc)) = sub.contingent() {
        let choice = match source {
            TargetSource::Partner => ctx.partner_rs,
            TargetSource::Opponents => ctx.opponent_rs,
        };
        let target = choice
            .and_then(|c| c.target_suit(cc.use_non_chosen_suit))
            .ok_or(MatchFailure::Shape)?;
        if !cc.suit_range.admits_count(analysis.count(target)) {
            return Err(MatchFailure::Shape);
        }
        if !cc.suit_range.admits_hcp(analysis.hcp(target)) {
            return Err(MatchFailure::Hcp);
        }
    }

    for pattern in ctx.exclusions {
        if pattern.matches(analysis.shape_counts()) {
            return Err(MatchFailure::Shape);
        }
    }

    Ok(rs_chosen)
}

/// Standard per-suit checks, skipping suits whose range is replaced by a
/// random-suit choice. Total HCP is the caller's responsibility.
fn check_standard_skipping(
    analysis: &HandAnalysis,
    sub: &SubProfile,
    skip: &[Suit],
) -> Result<(), MatchFailure> {
    for suit in Suit::DESCENDING {
        if skip.contains(&suit) {
            continue;
        }
        let range = sub.standard.suit(suit);
        if !range.admits_count(analysis.count(suit)) {
            return Err(MatchFailure::Shape);
        }
        if !range.admits_hcp(analysis.hcp(suit)) {
            return Err(MatchFailure::Hcp);
        }
    }
    Ok(())
}

fn check_rs_suits(
    analysis: &HandAnalysis,
    rs: &RandomSuitConstraint,
    chosen: &[Suit],
) -> Result<(), MatchFailure> {
    for &suit in chosen {
        let range = rs.range_for(suit);
        if !range.admits_count(analysis.count(suit)) {
            return Err(MatchFailure::Shape);
        }
        if !range.admits_hcp(analysis.hcp(suit)) {
            return Err(MatchFailure::Hcp);
        }
    }
    Ok(())
}

/// How far a suit's holding is from the window of its RS range. Zero means
/// already inside.
fn rs_penalty(analysis: &HandAnalysis, rs: &RandomSuitConstraint, suit: Suit) -> u8 {
    let range = rs.range_for(suit);
    let count = analysis.count(suit);
    if count < range.min_cards {
        range.min_cards - count
    } else if count > range.max_cards {
        count - range.max_cards
    } else {
        0
    }
}

/// No pre-commitment: enumerate k-subsets of the allowed suits, easiest
/// candidates first, and accept the first subset for which both the RS
/// checks and the standard re-check (with that subset skipped) pass.
fn enumerate_rs<R: Rng>(
    analysis: &HandAnalysis,
    sub: &SubProfile,
    rs: &RandomSuitConstraint,
    rng: Option<&mut R>,
) -> Result<Vec<Suit>, MatchFailure> {
    let k = rs.required_suits_count;
    let mut candidates: Vec<Suit> = rs.allowed_suits.clone();
    if candidates.len() < k || k == 0 {
        return Err(MatchFailure::Shape);
    }

    // Ties between equally-easy suits are broken by the fallback RNG when
    // one is supplied; the sort below is stable.
    if let Some(rng) = rng {
        candidates.shuffle(rng);
    }
    candidates.sort_by_key(|&s| rs_penalty(analysis, rs, s));

    let mut first_failure: Option<MatchFailure> = None;
    for combo in combinations(candidates.len(), k) {
        let chosen: Vec<Suit> = combo.iter().map(|&i| candidates[i]).collect();
        let result = check_rs_suits(analysis, rs, &chosen)
            .and_then(|_| check_standard_skipping(analysis, sub, &chosen));
        match result {
            Ok(()) => return Ok(chosen),
            Err(failure) => {
                first_failure.get_or_insert(failure);
            }
        }
    }
    Err(first_failure.unwrap_or(MatchFailure::Shape))
}

/// All k-element index subsets of 0..n in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut combo: Vec<usize> = (0..k).collect();
    loop {
        out.push(combo.clone());
        // Advance the rightmost index that can still move.
        let mut i = k;
        while i > 0 {
            i -= 1;
            if combo[i] < n - (k - i) {
                combo[i] += 1;
                for j in i + 1..k {
                    combo[j] = combo[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                return out;
            }
        }
    }
}
