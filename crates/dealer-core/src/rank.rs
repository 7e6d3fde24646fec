use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Card rank, ordered low to high so comparisons follow trick-taking
/// strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two = 2,
    #[serde(rename = "3")]
    Three = 3,
    #[serde(rename = "4")]
    Four = 4,
    #[serde(rename = "5")]
    Five = 5,
    #[serde(rename = "6")]
    Six = 6,
    #[serde(rename = "7")]
    Seven = 7,
    #[serde(rename = "8")]
    Eight = 8,
    #[serde(rename = "9")]
    Nine = 9,
    #[serde(rename = "T")]
    Ten = 10,
    #[serde(rename = "J")]
    Jack = 11,
    #[serde(rename = "Q")]
    Queen = 12,
    #[serde(rename = "K")]
    King = 13,
    #[serde(rename = "A")]
    Ace = 14,
}

impl Rank {
    /// Ranks in the dealer's canonical order, A down to 2. The master deck
    /// and all rendered suit holdings follow this order.
    pub const DESCENDING: [Rank; 13] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ];

    /// High-card points: A=4, K=3, Q=2, J=1, spot cards 0.
    pub fn hcp(self) -> u8 {
        match self {
            Rank::Ace => 4,
            Rank::King => 3,
            Rank::Queen => 2,
            Rank::Jack => 1,
            _ => 0,
        }
    }

    /// Single-character form used in profiles, hand diagrams and LIN.
    /// Spot cards render as their numeric value, T for ten.
    pub fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::King => 'K',
            Rank::Queen => 'Q',
            Rank::Jack => 'J',
            Rank::Ten => 'T',
            spot => char::from(b'0' + spot as u8),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        Self::DESCENDING.into_iter().find(|r| r.to_char() == c)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.to_char())
    }
}
