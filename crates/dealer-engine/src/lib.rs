//! Constrained bridge deal generation.
//!
//! The engine builds deals that satisfy a [`HandProfile`]: per-seat shape
//! and HCP constraints, including random-suit constraints whose suits are
//! chosen per board and contingent constraints that depend on them.
//! Naive rejection sampling is intractable for tight profiles, so the
//! builder biases the search: it fixes sub-profiles and random suits up
//! front, pre-allocates cards for statistically tight seats, gates
//! attempts on HCP feasibility, and adapts its re-roll cadence to the
//! observed difficulty. The resulting distribution is deliberately not
//! uniform over all satisfying deals.

mod attribution;
mod builder;
mod config;
mod error;
mod generate;
mod matcher;
mod plan;
mod prealloc;
mod profile;
mod select;
mod store;
mod validate;

pub use attribution::{
    classify_viability, AttemptFailure, Attribution, SeatViability, Viability, ViabilitySummary,
};
pub use config::{GenConfig, GenHooks};
pub use error::{DealGenerationError, ProfileError};
pub use generate::{apply_vulnerability_and_rotation, generate_deals, generate_deals_with};
pub use matcher::{match_hand, HandAnalysis, MatchContext, MatchFailure, RsChoice};
pub use profile::{
    ContingentConstraint, HandProfile, RandomSuitConstraint, RoleMode, RoleUsage, SeatProfile,
    ShapePattern, SortOrder, StandardConstraints, SubProfile, SuitRange, TargetSource,
};
pub use store::{discover_profiles, load_profile, save_profile, StoreError};
pub use validate::{
    validate_profile, validate_profile_feasibility, DeadSubProfile, FeasibilityReport,
};
