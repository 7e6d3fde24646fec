//! Dealing-order planning.
//!
//! The most constrained seats are dealt first, from the fullest deck; the
//! least constrained seat is dealt last and simply receives the remainder,
//! which is always a legal 13 cards.

use crate::profile::{ConstraintKind, SubProfile};
use dealer_core::Seat;

/// Constraint risk, highest first: random-suit seats drive everything
/// else, contingent seats depend on them, standard-only seats are cheap.
fn risk(sub: &SubProfile) -> u8 {
    match sub.kind() {
        ConstraintKind::RandomSuit => 2,
        ConstraintKind::PartnerContingent | ConstraintKind::OpponentContingent => 1,
        ConstraintKind::Standard => 0,
    }
}

/// Seats sorted by descending risk; ties break toward the narrower
/// total-HCP window, then clockwise distance from the dealer. The last
/// seat is the least constrained and takes the remainder of the deck.
pub fn dealing_order(chosen: [&SubProfile; 4], dealer: Seat) -> [Seat; 4] {
    let mut order = Seat::ALL;
    order.sort_by_key(|&seat| {
        let sub = chosen[seat.idx()];
        let hcp_range = sub.standard.total_hcp_max.saturating_sub(sub.standard.total_hcp_min);
        (
            std::cmp::Reverse(risk(sub)),
            hcp_range,
            seat.clockwise_distance(dealer),
        )
    });
    order
}

/// Matching order: random-suit seats first so partner/opponent choices are
/// visible to contingent seats, preserving dealing order within each group.
pub fn processing_order(order: [Seat; 4], chosen: [&SubProfile; 4]) -> [Seat; 4] {
    let mut out = [Seat::North; 4];
    let mut i = 0;
    for &seat in order
        .iter()
        .filter(|&&s| chosen[s.idx()].kind() == ConstraintKind::RandomSuit)
    {
        out[i] = seat;
        i += 1;
    }
    for &seat in order
        .iter()
        .filter(|&&s| chosen[s.idx()].kind() != ConstraintKind::RandomSuit)
    {
        out[i] = seat;
        i += 1;
    }
    out
}
