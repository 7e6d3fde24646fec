use crate::attribution::{AttemptFailure, Attribution, ViabilitySummary};
use std::fmt;
use std::time::Duration;

/// Tunables for the deal builder. `Default` gives the production values;
/// tests override individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    /// Inner-loop cap per board retry.
    pub max_board_attempts: u32,
    /// Outer board retries in `generate_deals`.
    pub max_board_retries: u32,
    /// Starting sub-profile re-roll interval, in attempts.
    pub sub_reroll_initial: u32,
    /// Floor for the decaying sub-profile re-roll interval.
    pub sub_reroll_min: u32,
    /// Multiplier applied to the sub-profile interval each time it fires.
    pub sub_reroll_decay: f64,
    /// Random-suit re-roll interval as a fraction of the sub interval.
    pub rs_reroll_ratio: f64,
    /// Cutoff on P(hand has >= n cards of a suit) below which a seat
    /// counts as tight and receives pre-allocation help.
    pub dispersion_threshold: f64,
    /// Fraction of a standard suit minimum to pre-allocate for tight seats.
    pub pre_alloc_std_fraction: f64,
    /// Fraction of a random-suit minimum to pre-allocate.
    pub rs_pre_alloc_fraction: f64,
    /// HCP-targeted rejection resamples during random-suit pre-allocation.
    pub rs_hcp_retries: u32,
    /// Width of the HCP feasibility gate, in standard deviations.
    pub hcp_feasibility_num_sd: f64,
    /// Disable to skip the phase-2 HCP feasibility gate entirely.
    pub hcp_feasibility_enabled: bool,
    /// Wall-clock budget per board before the RNG is replaced from system
    /// entropy. `None` disables re-seeding for reproducible runs.
    pub reseed_threshold: Option<Duration>,
    /// Cross-seat feasibility retries per sub-profile selection.
    pub max_selection_retries: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_board_attempts: 10_000,
            max_board_retries: 50,
            sub_reroll_initial: 150,
            sub_reroll_min: 50,
            sub_reroll_decay: 0.7,
            rs_reroll_ratio: 0.7,
            dispersion_threshold: 0.19,
            pre_alloc_std_fraction: 0.75,
            rs_pre_alloc_fraction: 1.0,
            rs_hcp_retries: 10,
            hcp_feasibility_num_sd: 1.0,
            hcp_feasibility_enabled: true,
            reseed_threshold: Some(Duration::from_millis(1750)),
            max_selection_retries: 100,
        }
    }
}

impl GenConfig {
    /// Production defaults with wall-clock re-seeding disabled, for
    /// byte-for-byte reproducible runs.
    pub fn deterministic() -> Self {
        Self {
            reseed_threshold: None,
            ..Self::default()
        }
    }
}

/// Debug hook points on the builder. Both default to no-ops; tests and the
/// failure-report tool register closures.
#[derive(Default)]
pub struct GenHooks {
    /// Fired after every failed attempt with its classification.
    pub on_attempt_failure: Option<Box<dyn FnMut(&AttemptFailure)>>,
    /// Fired when a board retry exhausts its attempt budget.
    pub on_max_attempts: Option<Box<dyn FnMut(&Attribution, &ViabilitySummary)>>,
}

impl GenHooks {
    pub(crate) fn attempt_failure(&mut self, failure: &AttemptFailure) {
        if let Some(hook) = self.on_attempt_failure.as_mut() {
            hook(failure);
        }
    }

    pub(crate) fn max_attempts(&mut self, attribution: &Attribution, summary: &ViabilitySummary) {
        if let Some(hook) = self.on_max_attempts.as_mut() {
            hook(attribution, summary);
        }
    }
}

impl fmt::Debug for GenHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenHooks")
            .field("on_attempt_failure", &self.on_attempt_failure.is_some())
            .field("on_max_attempts", &self.on_max_attempts.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_match_spec() {
        let cfg = GenConfig::default();
        assert_eq!(cfg.max_board_attempts, 10_000);
        assert_eq!(cfg.max_board_retries, 50);
        assert_eq!(cfg.sub_reroll_initial, 150);
        assert_eq!(cfg.sub_reroll_min, 50);
        assert_eq!(cfg.sub_reroll_decay, 0.7);
        assert_eq!(cfg.rs_reroll_ratio, 0.7);
        assert_eq!(cfg.dispersion_threshold, 0.19);
        assert_eq!(cfg.pre_alloc_std_fraction, 0.75);
        assert_eq!(cfg.rs_pre_alloc_fraction, 1.0);
        assert_eq!(cfg.rs_hcp_retries, 10);
        assert_eq!(cfg.hcp_feasibility_num_sd, 1.0);
        assert_eq!(cfg.reseed_threshold, Some(Duration::from_millis(1750)));
        assert_eq!(cfg.max_selection_retries, 100);
    }

    #[test]
    fn test_deterministic_disables_reseed() {
        assert_eq!(GenConfig::deterministic().reseed_threshold, None);
    }

    #[test]
    fn test_hooks_default_noop() {
        let mut hooks = GenHooks::default();
        hooks.attempt_failure(&AttemptFailure {
            board_number: 1,
            attempt: 1,
            seat: None,
            kind: None,
        });
        hooks.max_attempts(
            &Attribution::default(),
            &ViabilitySummary::from_attribution(&Attribution::default()),
        );
    }
}
