use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// One of the four suits. Profiles persist suits as their single letters,
/// so the serde form is the letter, not the full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "C")]
    Clubs,
    #[serde(rename = "D")]
    Diamonds,
    #[serde(rename = "H")]
    Hearts,
    #[serde(rename = "S")]
    Spades,
}

/// Suit letters aligned with `Suit::idx`.
const LETTERS: [u8; 4] = *b"CDHS";

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Display order for hand diagrams, shape strings and LIN: S, H, D, C.
    pub const DESCENDING: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Stable index for suit-keyed arrays (counts, HCP caps, pools).
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        char::from(LETTERS[self.idx()])
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.to_char())
    }
}
