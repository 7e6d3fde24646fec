use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use rand::seq::SliceRandom;
use rand::Rng;

/// Sum of HCP across all 52 cards: 4 suits x (A=4 + K=3 + Q=2 + J=1).
pub const FULL_HCP_SUM: u32 = 40;

/// Sum of squared HCP values across the deck: 4 suits x (16 + 9 + 4 + 1).
pub const FULL_HCP_SUM_SQ: u32 = 120;

/// Maximum HCP a single 13-card hand can hold (AKQJ in every suit minus
/// three spot cards).
pub const MAX_HAND_HCP: u8 = 37;

/// Maximum HCP a single suit holding can contribute (A+K+Q+J).
pub const SUIT_HCP_MAX: u8 = 10;

/// Return a fresh 52-card deck in the master order: suits S, H, D, C,
/// ranks A down to 2 within each suit.
pub fn standard() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::DESCENDING {
        for rank in Rank::DESCENDING {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Return a freshly shuffled 52-card deck.
pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = standard();
    deck.shuffle(rng);
    deck
}
