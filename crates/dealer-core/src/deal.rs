use crate::hand::Hand;
use crate::seat::{Seat, Vulnerability};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One generated board: four 13-card hands plus table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub board_number: u32,
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    /// Hands indexed by `Seat::idx`.
    pub hands: [Hand; 4],
    /// Attempts consumed across every retry of this board (the successful
    /// attempt counts as one).
    pub attempts: u32,
    /// Board-level retries consumed before this board succeeded.
    pub retries: u32,
}

impl Deal {
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.idx()]
    }

    pub fn hand_mut(&mut self, seat: Seat) -> &mut Hand {
        &mut self.hands[seat.idx()]
    }
}

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DealSet {
    pub deals: Vec<Deal>,
    /// Wall-clock time spent on each board, index-aligned with `deals`.
    pub board_times: Vec<Duration>,
    /// Number of mid-run entropy re-seeds.
    pub reseed_count: u32,
}
