//! BBO-style LIN rendering for generated deals.

use crate::deal::Deal;
use crate::hand::Hand;
use crate::seat::{Seat, Vulnerability};
use crate::suit::Suit;

/// Encode one deal as a single LIN line:
///
/// `qx|o<board>|md|<dealer><S-hand>,<W-hand>,<N-hand>,<E-hand>|ah|Board <board>|sv|<vul>|pg||`
///
/// LIN lists the hands in fixed South, West, North, East order regardless
/// of the dealer; the numeric dealer code carries who deals.
pub fn encode_deal(deal: &Deal) -> String {
    let dealer_code = match deal.dealer {
        Seat::South => '1',
        Seat::West => '2',
        Seat::North => '3',
        Seat::East => '4',
    };

    let vul_code = match deal.vulnerability {
        Vulnerability::None => '0',
        Vulnerability::NS => 'n',
        Vulnerability::EW => 'e',
        Vulnerability::Both => 'b',
    };

    let hands = [Seat::South, Seat::West, Seat::North, Seat::East]
        .map(|seat| encode_hand(deal.hand(seat)))
        .join(",");

    format!(
        "qx|o{board}|md|{dealer_code}{hands}|ah|Board {board}|sv|{vul_code}|pg||",
        board = deal.board_number,
    )
}

/// Encode every deal, one LIN line each, with a trailing newline.
pub fn encode_deals(deals: &[Deal]) -> String {
    let mut out = String::new();
    for deal in deals {
        out.push_str(&encode_deal(deal));
        out.push('\n');
    }
    out
}

/// Compact per-suit string "S..H..D..C.." with ranks high-to-low.
fn encode_hand(hand: &Hand) -> String {
    let mut sorted = hand.clone();
    sorted.sort();
    let mut s = String::with_capacity(17);
    for suit in Suit::DESCENDING {
        s.push(suit.to_char());
        for card in sorted.cards.iter().filter(|c| c.suit == suit) {
            s.push(card.rank.to_char());
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deal() -> Deal {
        Deal {
            board_number: 3,
            dealer: Seat::South,
            vulnerability: Vulnerability::EW,
            hands: [
                Hand::parse("AKQJ.T98.765.432"),  // N
                Hand::parse("T98.765.432.AKQJ"),  // E
                Hand::parse("765.432.AKQJ.T98"),  // S
                Hand::parse("432.AKQJ.T98.765"),  // W
            ],
            attempts: 1,
            retries: 0,
        }
    }

    #[test]
    fn test_encode_deal_layout() {
        let line = encode_deal(&sample_deal());
        assert!(line.starts_with("qx|o3|md|1"));
        assert!(line.contains("|ah|Board 3|sv|e|pg||"));
        // South's hand leads the md block.
        assert!(line.contains("md|1S765H432DAKQJCT98,"));
    }

    #[test]
    fn test_encode_hand_orders_ranks_high_to_low() {
        let hand = Hand::parse("2AK.J3..Q");
        let mut deal = sample_deal();
        deal.hands[Seat::South.idx()] = hand;
        let line = encode_deal(&deal);
        assert!(line.contains("md|1SAK2HJ3DCQ,"));
    }

    #[test]
    fn test_encode_deals_one_line_per_deal() {
        let text = encode_deals(&[sample_deal(), sample_deal()]);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }
}
