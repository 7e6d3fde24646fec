use crate::attribution::Attribution;
use thiserror::Error;

/// Profile validation failures. Fatal to the run; the caller fixes the
/// profile and retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("invalid profile: {detail}")]
    Structural { detail: String },
    #[error("infeasible profile: {detail}")]
    Infeasible { detail: String },
}

impl ProfileError {
    pub fn structural(detail: impl Into<String>) -> Self {
        ProfileError::Structural {
            detail: detail.into(),
        }
    }

    pub fn infeasible(detail: impl Into<String>) -> Self {
        ProfileError::Infeasible {
            detail: detail.into(),
        }
    }
}

/// Deal generation failures.
#[derive(Debug, Error)]
pub enum DealGenerationError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    /// Cross-seat feasibility retries exhausted during sub-profile
    /// selection. Caught inside the builder; surfaces only through hooks.
    #[error("sub-profile selection exhausted after {retries} retries")]
    SelectionExhausted { retries: u32 },
    /// Every attempt of every board retry failed. The attribution snapshot
    /// identifies the blocking seat and whether HCP or shape dominated.
    #[error(
        "board {board} exhausted after {attempts} attempts",
        attempts = attribution.total_attempts
    )]
    BoardExhausted { board: u32, attribution: Attribution },
    #[error("internal invariant breached: {detail}")]
    Internal { detail: String },
}
