//! Per-board failure attribution.
//!
//! Every failed attempt is credited to the first seat that failed it,
//! with an HCP/shape breakdown; seats that passed earlier in the same
//! attempt and seats never reached are tracked separately. The builder
//! consumes these counters for its adaptive behaviour and exposes them to
//! callers on exhaustion.

use crate::matcher::MatchFailure;
use dealer_core::Seat;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribution {
    /// Seat was the first to fail the attempt.
    pub fail_as_seat: [u32; 4],
    /// Seat passed, but a later seat failed the attempt.
    pub fail_global_other: [u32; 4],
    /// Seat was never reached before the attempt broke off.
    pub fail_global_unchecked: [u32; 4],
    /// First-failure breakdown: HCP-classified failures.
    pub fail_hcp: [u32; 4],
    /// First-failure breakdown: shape-classified failures.
    pub fail_shape: [u32; 4],
    /// Times each seat's hand was actually matched (pass or fail).
    pub checked: [u32; 4],
    /// Attempts across every retry of the board, the successful one included.
    pub total_attempts: u32,
}

impl Attribution {
    /// Credit the first failure of an attempt to `seat`.
    pub(crate) fn record_first_failure(&mut self, seat: Seat, kind: MatchFailure) {
        self.fail_as_seat[seat.idx()] += 1;
        match kind {
            MatchFailure::Hcp => self.fail_hcp[seat.idx()] += 1,
            MatchFailure::Shape => self.fail_shape[seat.idx()] += 1,
        }
    }

    pub(crate) fn record_passed_before_failure(&mut self, seat: Seat) {
        self.fail_global_other[seat.idx()] += 1;
    }

    pub(crate) fn record_unchecked(&mut self, seat: Seat) {
        self.fail_global_unchecked[seat.idx()] += 1;
    }

    pub(crate) fn record_checked(&mut self, seat: Seat) {
        self.checked[seat.idx()] += 1;
    }
}

/// Payload for the per-attempt failure hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub board_number: u32,
    pub attempt: u32,
    /// First failing seat; `None` when the attempt died before any seat was
    /// matched (selection exhausted or random suits unfixable without a
    /// responsible seat).
    pub seat: Option<Seat>,
    pub kind: Option<MatchFailure>,
}

/// Empirical viability classification for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Viability {
    Unknown,
    Unviable,
    Unlikely,
    Likely,
}

/// Classify from match statistics. Nothing is called unviable before ten
/// observations.
pub fn classify_viability(successes: u32, attempts: u32) -> Viability {
    if attempts == 0 {
        return Viability::Unknown;
    }
    if successes == 0 {
        if attempts < 10 {
            return Viability::Unknown;
        }
        return Viability::Unviable;
    }
    let rate = successes as f64 / attempts as f64;
    if rate < 0.1 {
        Viability::Unlikely
    } else {
        Viability::Likely
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatViability {
    pub attempts: u32,
    pub successes: u32,
    pub failures: u32,
    pub viability: Viability,
}

/// Per-seat viability summary derived from an attribution snapshot,
/// indexed by `Seat::idx`. Diagnostic only; never feeds back into the
/// generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViabilitySummary {
    pub seats: [SeatViability; 4],
}

impl ViabilitySummary {
    pub fn from_attribution(attribution: &Attribution) -> Self {
        let seats = [0usize, 1, 2, 3].map(|i| {
            let attempts = attribution.checked[i];
            let failures = attribution.fail_as_seat[i];
            let successes = attempts.saturating_sub(failures);
            SeatViability {
                attempts,
                successes,
                failures,
                viability: classify_viability(successes, attempts),
            }
        });
        Self { seats }
    }
}
