use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// A table position. Persisted as its compass letter; clockwise table
/// order is N, E, S, W.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Seat {
    #[default]
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

/// A partnership: the two seats facing each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pair {
    NS,
    EW,
}

impl Pair {
    pub const ALL: [Pair; 2] = [Pair::NS, Pair::EW];

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Pair::NS => [Seat::North, Seat::South],
            Pair::EW => [Seat::East, Seat::West],
        }
    }

    pub fn contains(self, seat: Seat) -> bool {
        self.seats().contains(&seat)
    }

    pub fn opponent(self) -> Self {
        match self {
            Pair::NS => Pair::EW,
            Pair::EW => Pair::NS,
        }
    }
}

impl Seat {
    /// Clockwise around the table.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Stable index for seat-keyed arrays (hands, counters, selections).
    pub fn idx(self) -> usize {
        self as usize
    }

    /// The seat one position clockwise.
    pub fn next(self) -> Self {
        Seat::ALL[(self.idx() + 1) % 4]
    }

    /// Partners sit across the table, two positions around.
    pub fn partner(self) -> Self {
        Seat::ALL[(self.idx() + 2) % 4]
    }

    pub fn pair(self) -> Pair {
        match self {
            Seat::North | Seat::South => Pair::NS,
            Seat::East | Seat::West => Pair::EW,
        }
    }

    /// How many clockwise steps from `from` to `self` (0..=3).
    pub fn clockwise_distance(self, from: Seat) -> usize {
        (self.idx() + 4 - from.idx()) % 4
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(b"NESW"[self.idx()] as char)
    }
}

/// Which side is vulnerable on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    /// The duplicate-bridge vulnerability schedule. Within each four-board
    /// round the cycle None, NS, EW, Both advances one step per board, and
    /// every round starts one step further along than the last; the whole
    /// pattern repeats after 16 boards.
    pub fn from_board_number(board_number: u32) -> Self {
        const CYCLE: [Vulnerability; 4] = [
            Vulnerability::None,
            Vulnerability::NS,
            Vulnerability::EW,
            Vulnerability::Both,
        ];
        let b = board_number.saturating_sub(1);
        CYCLE[((b + b / 4) % 4) as usize]
    }

    pub fn is_vulnerable(self, seat: Seat) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::Both => true,
            Vulnerability::NS => seat.pair() == Pair::NS,
            Vulnerability::EW => seat.pair() == Pair::EW,
        }
    }
}
