//! Shape help: random-suit pre-selection, dispersion analysis, phased
//! pre-allocation with HCP-targeted rejection, the HCP feasibility gate,
//! and constrained fill.
//!
//! All of it exists to pull low-probability shape/HCP events forward so
//! the attempt loop does not burn its budget on hands that could never
//! match.

use crate::config::GenConfig;
use crate::matcher::RsChoice;
use crate::profile::{SubProfile, SuitRange, TargetSource};
use dealer_core::deck::{FULL_HCP_SUM, FULL_HCP_SUM_SQ};
use dealer_core::{Card, Seat, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// P(a random 13-card hand holds >= n cards of one specific suit),
/// hypergeometric with N=52, K=13, n=13. Indexed by n.
pub const P_GE_N: [f64; 14] = [
    1.0, 0.987, 0.920, 0.710, 0.430, 0.189, 0.063, 0.021, 0.005, 0.001, 2.0e-4, 2.0e-5, 1.0e-6,
    3.0e-8,
];

/// Per-seat random-suit choices for one attempt, by `Seat::idx`.
pub type RsSelections = [Option<Vec<Suit>>; 4];

/// Fix random-suit choices for every RS seat before dealing, walking the
/// dealing order so earlier seats exclude their suits from later ones.
/// Returns the seat whose residual allowed set was too small, if any;
/// that attempt cannot be fixed and must fail.
pub fn pre_select_rs_suits<R: Rng>(
    rng: &mut R,
    chosen: &[&SubProfile; 4],
    order: &[Seat; 4],
) -> Result<RsSelections, Seat> {
    let mut selections: RsSelections = Default::default();
    let mut taken: Vec<Suit> = Vec::new();

    for &seat in order {
        let Some(rs) = &chosen[seat.idx()].random_suit else {
            continue;
        };
        let available: Vec<Suit> = rs
            .allowed_suits
            .iter()
            .copied()
            .filter(|s| !taken.contains(s))
            .collect();
        if available.len() < rs.required_suits_count {
            return Err(seat);
        }
        let picked: Vec<Suit> = available
            .choose_multiple(rng, rs.required_suits_count)
            .copied()
            .collect();
        taken.extend(&picked);
        selections[seat.idx()] = Some(picked);
    }
    Ok(selections)
}

/// The seat a contingent constraint follows: the partner, or the unique
/// opponent whose selected sub-profile carries a random-suit constraint.
pub(crate) fn contingent_counterparty(seat: Seat, chosen: &[&SubProfile; 4]) -> Option<Seat> {
    let (source, _) = chosen[seat.idx()].contingent()?;
    match source {
        TargetSource::Partner => Some(seat.partner()),
        TargetSource::Opponents => {
            let holders: Vec<Seat> = seat
                .pair()
                .opponent()
                .seats()
                .into_iter()
                .filter(|o| chosen[o.idx()].random_suit.is_some())
                .collect();
            match holders.as_slice() {
                [only] => Some(*only),
                _ => None,
            }
        }
    }
}

/// Resolve a contingent seat's target suit from the counterparty's fixed
/// random-suit choice.
pub(crate) fn contingent_target(
    seat: Seat,
    chosen: &[&SubProfile; 4],
    selections: &RsSelections,
) -> Option<Suit> {
    let (_, cc) = chosen[seat.idx()].contingent()?;
    let counterparty = contingent_counterparty(seat, chosen)?;
    let rs = chosen[counterparty.idx()].random_suit.as_ref()?;
    let picked = selections[counterparty.idx()].as_ref()?;
    RsChoice {
        chosen: picked,
        allowed: &rs.allowed_suits,
    }
    .target_suit(cc.use_non_chosen_suit)
}

fn tight_min(min_cards: u8, threshold: f64) -> bool {
    min_cards > 0 && P_GE_N[min_cards as usize] <= threshold
}

/// Dispersion check: seats whose minimum card requirements are
/// low-probability events under uniform dealing.
pub fn tight_seats(
    chosen: &[&SubProfile; 4],
    selections: &RsSelections,
    threshold: f64,
) -> [bool; 4] {
    let mut tight = [false; 4];
    for seat in Seat::ALL {
        let sub = chosen[seat.idx()];
        let rs_suits = selections[seat.idx()].as_deref().unwrap_or(&[]);

        let standard_tight = Suit::ALL
            .iter()
            .filter(|s| !rs_suits.contains(s))
            .any(|&s| tight_min(sub.standard.suit(s).min_cards, threshold));

        let rs_tight = sub.random_suit.as_ref().is_some_and(|rs| {
            rs_suits
                .iter()
                .any(|&s| tight_min(rs.range_for(s).min_cards, threshold))
        });

        let contingent_tight = match (sub.contingent(), contingent_target(seat, chosen, selections))
        {
            (Some((_, cc)), Some(_)) => tight_min(cc.suit_range.min_cards, threshold),
            _ => false,
        };

        tight[seat.idx()] = standard_tight || rs_tight || contingent_tight;
    }
    tight
}

/// Effective per-suit card maxima for constrained fill: standard maxima,
/// with random-suit ranges replacing them for the chosen suits.
pub fn effective_suit_maxima(sub: &SubProfile, rs_suits: &[Suit]) -> [u8; 4] {
    let mut maxima = [13u8; 4];
    for suit in Suit::ALL {
        maxima[suit.idx()] = sub.standard.suit(suit).max_cards;
    }
    if let Some(rs) = &sub.random_suit {
        for &suit in rs_suits {
            maxima[suit.idx()] = rs.range_for(suit).max_cards;
        }
    }
    maxima
}

/// Per-suit HCP caps for the chosen random suits, by `Suit::idx`.
pub fn rs_hcp_caps(sub: &SubProfile, rs_suits: &[Suit]) -> [Option<u8>; 4] {
    let mut caps = [None; 4];
    if let Some(rs) = &sub.random_suit {
        for &suit in rs_suits {
            caps[suit.idx()] = Some(rs.range_for(suit).max_hcp);
        }
    }
    caps
}

fn suit_pool(deck: &[Card], suit: Suit) -> Vec<Card> {
    deck.iter().copied().filter(|c| c.suit == suit).collect()
}

fn remove_from_deck(deck: &mut Vec<Card>, cards: &[Card]) {
    if cards.is_empty() {
        return;
    }
    let removed: HashSet<Card> = cards.iter().copied().collect();
    deck.retain(|c| !removed.contains(c));
}

fn sample_cards<R: Rng>(rng: &mut R, pool: &[Card], m: usize) -> Vec<Card> {
    pool.choose_multiple(rng, m).copied().collect()
}

/// Sample `m` cards of a suit, resampling up to `retries` times to keep
/// the drawn HCP inside the range's window pro-rated to `m` of
/// `min_cards` cards. After the retries the last sample stands; the
/// matcher may still accept it.
fn sample_hcp_targeted<R: Rng>(
    rng: &mut R,
    pool: &[Card],
    m: usize,
    range: &SuitRange,
    min_cards: u8,
    retries: u32,
) -> Vec<Card> {
    let mut chosen = sample_cards(rng, pool, m);
    if retries == 0 || min_cards == 0 {
        return chosen;
    }
    let scale = m as f64 / min_cards as f64;
    let target_low = (range.min_hcp as f64 * scale).floor() as u32;
    let target_high = (range.max_hcp as f64 * scale).ceil() as u32;
    for _ in 0..retries {
        let hcp: u32 = chosen.iter().map(|c| c.hcp() as u32).sum();
        if (target_low..=target_high).contains(&hcp) {
            break;
        }
        chosen = sample_cards(rng, pool, m);
    }
    chosen
}

/// Statistical feasibility of a total-HCP target given the cards already
/// drawn and the composition of the remaining deck. The expected
/// additional HCP and its standard deviation come from finite-population
/// sampling; the attempt is rejected when even a `num_sd`-favourable
/// outcome cannot land in the target window.
pub fn check_hcp_feasibility(
    drawn_hcp: u32,
    cards_remaining: u32,
    deck_size: u32,
    deck_hcp_sum: u32,
    deck_hcp_sum_sq: u32,
    target_min: u8,
    target_max: u8,
    num_sd: f64,
) -> bool {
    if cards_remaining == 0 || deck_size == 0 {
        return (target_min as u32..=target_max as u32).contains(&drawn_hcp);
    }

    let mu = deck_hcp_sum as f64 / deck_size as f64;
    let sigma_sq = deck_hcp_sum_sq as f64 / deck_size as f64 - mu * mu;

    let expected_total = drawn_hcp as f64 + cards_remaining as f64 * mu;

    let var_additional = if deck_size <= 1 {
        0.0
    } else {
        let fpc = (deck_size - cards_remaining.min(deck_size)) as f64 / (deck_size - 1) as f64;
        cards_remaining as f64 * sigma_sq * fpc
    };
    let sd_additional = var_additional.max(0.0).sqrt();

    let exp_down = expected_total - num_sd * sd_additional;
    let exp_up = expected_total + num_sd * sd_additional;

    if exp_down > target_max as f64 {
        return false;
    }
    if exp_up < target_min as f64 {
        return false;
    }
    true
}

/// Deal 52 cards to the four seats with shape help.
///
/// Phases: pre-allocate standard minima for tight seats, then the chosen
/// random suits (HCP-targeted), then contingent target suits; gate each
/// pre-allocated seat on HCP feasibility; finally fill non-last seats with
/// constrained fill and hand the remainder to the last seat.
///
/// On success every seat's cards are returned (the deck is emptied); on
/// phase-2 rejection the rejected seat is returned instead.
pub fn deal_with_help<R: Rng>(
    rng: &mut R,
    deck: &mut Vec<Card>,
    chosen: &[&SubProfile; 4],
    tight: &[bool; 4],
    order: &[Seat; 4],
    selections: &RsSelections,
    cfg: &GenConfig,
) -> Result<[Vec<Card>; 4], Seat> {
    let mut pre: [Vec<Card>; 4] = Default::default();

    // Phase 1a: standard suit minima, skipping suits whose range is
    // replaced by a random-suit choice.
    for &seat in order {
        if !tight[seat.idx()] {
            continue;
        }
        let sub = chosen[seat.idx()];
        let rs_suits = selections[seat.idx()].as_deref().unwrap_or(&[]);
        let mut picked = Vec::new();
        for suit in Suit::ALL {
            if rs_suits.contains(&suit) {
                continue;
            }
            let min_cards = sub.standard.suit(suit).min_cards;
            if min_cards == 0 {
                continue;
            }
            let m = (cfg.pre_alloc_std_fraction * min_cards as f64).ceil() as usize;
            if m == 0 {
                continue;
            }
            let pool = suit_pool(deck, suit);
            picked.extend(sample_cards(rng, &pool, m.min(pool.len())));
        }
        remove_from_deck(deck, &picked);
        pre[seat.idx()].extend(picked);
    }

    // Phase 1b: chosen random suits, HCP-targeted.
    for &seat in order {
        if !tight[seat.idx()] {
            continue;
        }
        let sub = chosen[seat.idx()];
        let (Some(rs), Some(rs_suits)) = (&sub.random_suit, selections[seat.idx()].as_ref())
        else {
            continue;
        };
        let mut picked = Vec::new();
        for &suit in rs_suits {
            let range = rs.range_for(suit);
            if range.min_cards == 0 {
                continue;
            }
            let m = (cfg.rs_pre_alloc_fraction * range.min_cards as f64).floor() as usize;
            if m == 0 {
                continue;
            }
            let pool = suit_pool(deck, suit);
            picked.extend(sample_hcp_targeted(
                rng,
                &pool,
                m.min(pool.len()),
                range,
                range.min_cards,
                cfg.rs_hcp_retries,
            ));
        }
        remove_from_deck(deck, &picked);
        pre[seat.idx()].extend(picked);
    }

    // Phase 1c: contingent target suits, HCP-targeted.
    for &seat in order {
        if !tight[seat.idx()] {
            continue;
        }
        let sub = chosen[seat.idx()];
        let Some((_, cc)) = sub.contingent() else {
            continue;
        };
        let Some(target) = contingent_target(seat, chosen, selections) else {
            continue;
        };
        if cc.suit_range.min_cards == 0 {
            continue;
        }
        let m = (cfg.rs_pre_alloc_fraction * cc.suit_range.min_cards as f64).floor() as usize;
        if m == 0 {
            continue;
        }
        let pool = suit_pool(deck, target);
        let picked = sample_hcp_targeted(
            rng,
            &pool,
            m.min(pool.len()),
            &cc.suit_range,
            cc.suit_range.min_cards,
            cfg.rs_hcp_retries,
        );
        remove_from_deck(deck, &picked);
        pre[seat.idx()].extend(picked);
    }

    // Phase 2: HCP feasibility gate. Deck HCP stats are tracked
    // incrementally from the full-deck constants.
    if cfg.hcp_feasibility_enabled {
        let mut removed_sum = 0u32;
        let mut removed_sum_sq = 0u32;
        for cards in &pre {
            for c in cards {
                let v = c.hcp() as u32;
                removed_sum += v;
                removed_sum_sq += v * v;
            }
        }
        let deck_hcp_sum = FULL_HCP_SUM - removed_sum;
        let deck_hcp_sum_sq = FULL_HCP_SUM_SQ - removed_sum_sq;
        let deck_size = deck.len() as u32;

        for &seat in order {
            let drawn = &pre[seat.idx()];
            if drawn.is_empty() {
                continue;
            }
            let std = &chosen[seat.idx()].standard;
            let drawn_hcp: u32 = drawn.iter().map(|c| c.hcp() as u32).sum();
            let cards_remaining = 13u32.saturating_sub(drawn.len() as u32);
            if !check_hcp_feasibility(
                drawn_hcp,
                cards_remaining,
                deck_size,
                deck_hcp_sum,
                deck_hcp_sum_sq,
                std.total_hcp_min,
                std.total_hcp_max,
                cfg.hcp_feasibility_num_sd,
            ) {
                return Err(seat);
            }
        }
    }

    // Phase 3: constrained fill; the last seat takes the remainder.
    let mut hands: [Vec<Card>; 4] = Default::default();
    for (i, &seat) in order.iter().enumerate() {
        let mut hand = std::mem::take(&mut pre[seat.idx()]);
        if i == order.len() - 1 {
            hand.append(deck);
        } else {
            let sub = chosen[seat.idx()];
            let rs_suits = selections[seat.idx()].as_deref().unwrap_or(&[]);
            let need = 13usize.saturating_sub(hand.len());
            let fill = constrained_fill(
                deck,
                need,
                &hand,
                effective_suit_maxima(sub, rs_suits),
                sub.standard.total_hcp_max,
                rs_hcp_caps(sub, rs_suits),
            );
            hand.extend(fill);
        }
        hands[seat.idx()] = hand;
    }
    Ok(hands)
}

/// Fill `n` cards from a shuffled deck, skipping any card that would bust
/// a suit maximum, push total HCP past `total_hcp_max` (honour cards
/// only), or bust a per-suit HCP cap for a random suit (honour cards
/// only). Skipped cards stay in the deck for later seats. The deck is
/// already shuffled, so walking front to back is rejection sampling.
pub fn constrained_fill(
    deck: &mut Vec<Card>,
    n: usize,
    pre_cards: &[Card],
    suit_maxima: [u8; 4],
    total_hcp_max: u8,
    hcp_caps: [Option<u8>; 4],
) -> Vec<Card> {
    if n == 0 {
        return Vec::new();
    }

    let mut suit_count = [0u8; 4];
    let mut suit_hcp = [0u8; 4];
    let mut total_hcp = 0u8;
    for c in pre_cards {
        suit_count[c.suit.idx()] += 1;
        suit_hcp[c.suit.idx()] += c.hcp();
        total_hcp += c.hcp();
    }

    let mut accepted = Vec::with_capacity(n);
    let mut remaining = Vec::with_capacity(deck.len());

    for &card in deck.iter() {
        if accepted.len() >= n {
            remaining.push(card);
            continue;
        }
        let idx = card.suit.idx();
        let hcp = card.hcp();

        if suit_count[idx] >= suit_maxima[idx] {
            remaining.push(card);
            continue;
        }
        if hcp > 0 && total_hcp + hcp > total_hcp_max {
            remaining.push(card);
            continue;
        }
        if hcp > 0 {
            if let Some(cap) = hcp_caps[idx] {
                if suit_hcp[idx] + hcp > cap {
                    remaining.push(card);
                    continue;
                }
            }
        }

        suit_count[idx] += 1;
        suit_hcp[idx] += hcp;
        total_hcp += hcp;
        accepted.push(card);
    }

    *deck = remaining;
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        ContingentConstraint, RandomSuitConstraint, StandardConstraints, SubProfile,
    };
    use dealer_core::deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_sub() -> SubProfile {
        SubProfile::standard_only(StandardConstraints::open())
    }

    fn rs_sub(allowed: Vec<Suit>, k: usize, range: SuitRange) -> SubProfile {
        let mut sub = open_sub();
        sub.random_suit = Some(RandomSuitConstraint {
            allowed_suits: allowed,
            required_suits_count: k,
            per_suit_range: range,
            pair_overrides: Default::default(),
        });
        sub
    }

    #[test]
    fn test_dispersion_threshold_boundary() {
        // min 5 has P_ge 0.189 <= 0.19 (tight); min 4 has 0.43 (not tight).
        let mut five = open_sub();
        five.standard.spades.min_cards = 5;
        let mut four = open_sub();
        four.standard.hearts.min_cards = 4;
        let open1 = open_sub();
        let open2 = open_sub();
        let chosen = [&five, &four, &open1, &open2];
        let tight = tight_seats(&chosen, &Default::default(), 0.19);
        assert_eq!(tight, [true, false, false, false]);
    }

    #[test]
    fn test_rs_chosen_suit_flags_tight() {
        let sub = rs_sub(vec![Suit::Spades, Suit::Hearts], 1, SuitRange::cards(6, 6));
        let open1 = open_sub();
        let open2 = open_sub();
        let open3 = open_sub();
        let chosen = [&sub, &open1, &open2, &open3];

        // Without a pre-selection the RS requirement is invisible.
        let tight = tight_seats(&chosen, &Default::default(), 0.19);
        assert!(!tight[0]);

        let mut selections: RsSelections = Default::default();
        selections[0] = Some(vec![Suit::Spades]);
        let tight = tight_seats(&chosen, &selections, 0.19);
        assert!(tight[0]);
    }

    #[test]
    fn test_pre_select_excludes_earlier_choices() {
        let north = rs_sub(vec![Suit::Spades, Suit::Hearts], 1, SuitRange::cards(5, 6));
        let south = rs_sub(vec![Suit::Spades, Suit::Hearts], 1, SuitRange::cards(5, 6));
        let open1 = open_sub();
        let open2 = open_sub();
        let chosen = [&north, &open1, &south, &open2];
        let order = [Seat::North, Seat::South, Seat::East, Seat::West];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let sel = pre_select_rs_suits(&mut rng, &chosen, &order).unwrap();
            let n = sel[Seat::North.idx()].as_ref().unwrap();
            let s = sel[Seat::South.idx()].as_ref().unwrap();
            assert_ne!(n[0], s[0]);
        }
    }

    #[test]
    fn test_pre_select_unfixable_when_residual_too_small() {
        let north = rs_sub(
            vec![Suit::Spades, Suit::Hearts],
            2,
            SuitRange::cards(4, 6),
        );
        let south = rs_sub(
            vec![Suit::Spades, Suit::Hearts],
            2,
            SuitRange::cards(4, 6),
        );
        let open1 = open_sub();
        let open2 = open_sub();
        let chosen = [&north, &open1, &south, &open2];
        let order = [Seat::North, Seat::South, Seat::East, Seat::West];
        let mut rng = StdRng::seed_from_u64(12);
        assert_eq!(
            pre_select_rs_suits(&mut rng, &chosen, &order),
            Err(Seat::South)
        );
    }

    #[test]
    fn test_contingent_counterparty_resolution() {
        let rs = rs_sub(vec![Suit::Spades, Suit::Hearts], 1, SuitRange::cards(5, 6));
        let mut pc = open_sub();
        pc.partner_contingent = Some(ContingentConstraint {
            use_non_chosen_suit: true,
            suit_range: SuitRange::cards(3, 5),
        });
        let mut oc = open_sub();
        oc.opponent_contingent = Some(ContingentConstraint {
            use_non_chosen_suit: false,
            suit_range: SuitRange::cards(3, 5),
        });
        let open1 = open_sub();
        // North holds RS; South is partner-contingent on it; East is
        // opponent-contingent on the only RS holder of the NS pair.
        let chosen = [&rs, &oc, &pc, &open1];
        assert_eq!(
            contingent_counterparty(Seat::South, &chosen),
            Some(Seat::North)
        );
        assert_eq!(
            contingent_counterparty(Seat::East, &chosen),
            Some(Seat::North)
        );

        let mut selections: RsSelections = Default::default();
        selections[Seat::North.idx()] = Some(vec![Suit::Spades]);
        // South wants the non-chosen suit (hearts); East the chosen one.
        assert_eq!(
            contingent_target(Seat::South, &chosen, &selections),
            Some(Suit::Hearts)
        );
        assert_eq!(
            contingent_target(Seat::East, &chosen, &selections),
            Some(Suit::Spades)
        );
    }

    #[test]
    fn test_constrained_fill_respects_suit_maxima() {
        let mut deck = deck::standard();
        let fill = constrained_fill(&mut deck, 13, &[], [2, 2, 2, 13], 37, [None; 4]);
        assert_eq!(fill.len(), 13);
        let clubs = fill.iter().filter(|c| c.suit == Suit::Clubs).count();
        let diamonds = fill.iter().filter(|c| c.suit == Suit::Diamonds).count();
        let hearts = fill.iter().filter(|c| c.suit == Suit::Hearts).count();
        assert!(clubs <= 2 && diamonds <= 2 && hearts <= 2);
        // Skipped cards remain available.
        assert_eq!(deck.len(), 39);
    }

    #[test]
    fn test_constrained_fill_caps_total_hcp() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut deck = deck::shuffled(&mut rng);
        let fill = constrained_fill(&mut deck, 13, &[], [13; 4], 5, [None; 4]);
        let hcp: u8 = fill.iter().map(|c| c.hcp()).sum();
        assert!(hcp <= 5);
        assert_eq!(fill.len(), 13);
    }

    #[test]
    fn test_constrained_fill_per_suit_hcp_cap() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut deck = deck::shuffled(&mut rng);
        let caps = [None, None, None, Some(3u8)];
        let fill = constrained_fill(&mut deck, 13, &[], [13; 4], 37, caps);
        let spade_hcp: u8 = fill
            .iter()
            .filter(|c| c.suit == Suit::Spades)
            .map(|c| c.hcp())
            .sum();
        assert!(spade_hcp <= 3);
    }

    #[test]
    fn test_constrained_fill_counts_pre_cards() {
        let mut deck = deck::standard();
        let pre = suit_pool(&deck, Suit::Spades)[..2].to_vec();
        remove_from_deck(&mut deck, &pre);
        let fill = constrained_fill(&mut deck, 11, &pre, [2, 13, 13, 13], 37, [None; 4]);
        assert!(fill.iter().all(|c| c.suit != Suit::Spades));
        assert_eq!(fill.len(), 11);
    }

    #[test]
    fn test_hcp_feasibility_rejects_overload() {
        // 20 HCP already drawn in 6 cards against a 10-12 window: the
        // expectation alone busts the maximum.
        assert!(!check_hcp_feasibility(20, 7, 46, 20, 60, 10, 12, 1.0));
        // 0 drawn, target 0..37 is always plausible.
        assert!(check_hcp_feasibility(0, 13, 52, 40, 120, 0, 37, 1.0));
    }

    #[test]
    fn test_hcp_feasibility_complete_hand_exact() {
        assert!(check_hcp_feasibility(11, 0, 39, 29, 80, 10, 12, 1.0));
        assert!(!check_hcp_feasibility(13, 0, 39, 27, 70, 10, 12, 1.0));
    }

    #[test]
    fn test_hcp_feasibility_widening_sd_accepts_more() {
        // A marginal case rejected at 1 SD should pass with a huge window.
        let tight = check_hcp_feasibility(0, 7, 46, 40, 120, 20, 22, 1.0);
        let loose = check_hcp_feasibility(0, 7, 46, 40, 120, 20, 22, 10.0);
        assert!(!tight);
        assert!(loose);
    }

    #[test]
    fn test_deal_with_help_deals_everything() {
        let mut tight_sub = open_sub();
        tight_sub.standard.spades.min_cards = 6;
        let open1 = open_sub();
        let open2 = open_sub();
        let open3 = open_sub();
        let chosen = [&tight_sub, &open1, &open2, &open3];
        let order = [Seat::North, Seat::East, Seat::South, Seat::West];
        let cfg = GenConfig::default();
        let mut rng = StdRng::seed_from_u64(15);

        let mut dealt = 0;
        for _ in 0..50 {
            let mut deck = deck::shuffled(&mut rng);
            let tight = tight_seats(&chosen, &Default::default(), cfg.dispersion_threshold);
            assert!(tight[Seat::North.idx()]);
            match deal_with_help(
                &mut rng,
                &mut deck,
                &chosen,
                &tight,
                &order,
                &Default::default(),
                &cfg,
            ) {
                Ok(hands) => {
                    dealt += 1;
                    let total: usize = hands.iter().map(|h| h.len()).sum();
                    assert_eq!(total, 52);
                    assert!(deck.is_empty());
                    // Pre-allocation hands North ceil(0.75 * 6) = 5 spades.
                    let spades = hands[Seat::North.idx()]
                        .iter()
                        .filter(|c| c.suit == Suit::Spades)
                        .count();
                    assert!(spades >= 5);
                }
                Err(seat) => assert_eq!(seat, Seat::North),
            }
        }
        assert!(dealt > 0);
    }

    #[test]
    fn test_effective_maxima_replacement() {
        let mut sub = rs_sub(vec![Suit::Spades], 1, SuitRange::cards(6, 7));
        sub.standard.spades.max_cards = 4;
        sub.standard.clubs.max_cards = 2;
        let maxima = effective_suit_maxima(&sub, &[Suit::Spades]);
        assert_eq!(maxima[Suit::Spades.idx()], 7);
        assert_eq!(maxima[Suit::Clubs.idx()], 2);
        assert_eq!(maxima[Suit::Hearts.idx()], 13);
    }
}
