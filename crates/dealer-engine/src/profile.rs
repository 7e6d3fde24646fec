//! The constraint data model.
//!
//! A [`HandProfile`] maps each seat to an ordered list of [`SubProfile`]s;
//! one sub-profile per seat is selected per board and held fixed for that
//! board. All model types are plain immutable data — structural and
//! cross-seat validation live in [`crate::validate`], so tests can build
//! deliberately broken profiles and validate them explicitly.

use dealer_core::{Pair, Seat, Suit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use dealer_core::deck::SUIT_HCP_MAX;

/// Closed card-count and HCP interval for one suit holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitRange {
    #[serde(default)]
    pub min_cards: u8,
    #[serde(default = "default_max_cards")]
    pub max_cards: u8,
    #[serde(default)]
    pub min_hcp: u8,
    #[serde(default = "default_suit_max_hcp")]
    pub max_hcp: u8,
}

fn default_max_cards() -> u8 {
    13
}

fn default_suit_max_hcp() -> u8 {
    SUIT_HCP_MAX
}

fn default_total_max_hcp() -> u8 {
    dealer_core::deck::MAX_HAND_HCP
}

impl Default for SuitRange {
    fn default() -> Self {
        Self::full()
    }
}

impl SuitRange {
    /// The fully open range: any count, any HCP.
    pub fn full() -> Self {
        Self {
            min_cards: 0,
            max_cards: 13,
            min_hcp: 0,
            max_hcp: SUIT_HCP_MAX,
        }
    }

    /// Range constraining card count only.
    pub fn cards(min_cards: u8, max_cards: u8) -> Self {
        Self {
            min_cards,
            max_cards,
            ..Self::full()
        }
    }

    pub fn admits_count(&self, count: u8) -> bool {
        self.min_cards <= count && count <= self.max_cards
    }

    pub fn admits_hcp(&self, hcp: u8) -> bool {
        self.min_hcp <= hcp && hcp <= self.max_hcp
    }
}

/// Per-suit ranges plus a total-HCP window, independent of other seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardConstraints {
    #[serde(default, rename = "S")]
    pub spades: SuitRange,
    #[serde(default, rename = "H")]
    pub hearts: SuitRange,
    #[serde(default, rename = "D")]
    pub diamonds: SuitRange,
    #[serde(default, rename = "C")]
    pub clubs: SuitRange,
    #[serde(default)]
    pub total_hcp_min: u8,
    #[serde(default = "default_total_max_hcp")]
    pub total_hcp_max: u8,
}

impl Default for StandardConstraints {
    fn default() -> Self {
        Self::open()
    }
}

impl StandardConstraints {
    /// No restrictions: full ranges everywhere.
    pub fn open() -> Self {
        Self {
            spades: SuitRange::full(),
            hearts: SuitRange::full(),
            diamonds: SuitRange::full(),
            clubs: SuitRange::full(),
            total_hcp_min: 0,
            total_hcp_max: dealer_core::deck::MAX_HAND_HCP,
        }
    }

    pub fn suit(&self, suit: Suit) -> &SuitRange {
        match suit {
            Suit::Spades => &self.spades,
            Suit::Hearts => &self.hearts,
            Suit::Diamonds => &self.diamonds,
            Suit::Clubs => &self.clubs,
        }
    }

    pub fn suit_mut(&mut self, suit: Suit) -> &mut SuitRange {
        match suit {
            Suit::Spades => &mut self.spades,
            Suit::Hearts => &mut self.hearts,
            Suit::Diamonds => &mut self.diamonds,
            Suit::Clubs => &mut self.clubs,
        }
    }
}

/// Random-suit constraint: `required_suits_count` suits are chosen per
/// board from `allowed_suits`, and each chosen suit must satisfy its
/// range. The chosen suits' ranges *replace* the standard per-suit ranges
/// for the same hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSuitConstraint {
    pub allowed_suits: Vec<Suit>,
    pub required_suits_count: usize,
    #[serde(default)]
    pub per_suit_range: SuitRange,
    /// Per-suit replacements for `per_suit_range`.
    #[serde(default)]
    pub pair_overrides: BTreeMap<Suit, SuitRange>,
}

impl RandomSuitConstraint {
    /// The effective range for a chosen suit, honouring overrides.
    pub fn range_for(&self, suit: Suit) -> &SuitRange {
        self.pair_overrides.get(&suit).unwrap_or(&self.per_suit_range)
    }
}

/// Which counterparty's random-suit choice a contingent constraint follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    Partner,
    Opponents,
}

/// Contingent constraint: the holder's count/HCP in a suit determined by a
/// partner's or opponent's random-suit choice must fall in `suit_range`.
/// The target is the counterparty's chosen suit, or with
/// `use_non_chosen_suit` the unique suit of their allowed set they did
/// not choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingentConstraint {
    #[serde(default)]
    pub use_non_chosen_suit: bool,
    #[serde(default)]
    pub suit_range: SuitRange,
}

/// Which roles within a coupled pair a sub-profile may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleUsage {
    #[default]
    Any,
    DriverOnly,
    FollowerOnly,
}

impl RoleUsage {
    pub fn allows_driver(self) -> bool {
        matches!(self, RoleUsage::Any | RoleUsage::DriverOnly)
    }

    pub fn allows_follower(self) -> bool {
        matches!(self, RoleUsage::Any | RoleUsage::FollowerOnly)
    }
}

/// Constraint kind carried by a sub-profile beyond its standard ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Standard,
    RandomSuit,
    PartnerContingent,
    OpponentContingent,
}

/// One bundle of constraints a seat may take on a given board.
///
/// At most one of the random-suit / partner-contingent /
/// opponent-contingent variants may be present; the validator enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub standard: StandardConstraints,
    #[serde(default, rename = "random_suit_constraint")]
    pub random_suit: Option<RandomSuitConstraint>,
    #[serde(default, rename = "partner_contingent_constraint")]
    pub partner_contingent: Option<ContingentConstraint>,
    #[serde(default, rename = "opponents_contingent_suit_constraint")]
    pub opponent_contingent: Option<ContingentConstraint>,
    /// Relative selection weight; normalised per seat, all-zero means
    /// uniform.
    #[serde(default, rename = "weight_percent")]
    pub weight: f64,
    #[serde(default)]
    pub ns_role_usage: RoleUsage,
    #[serde(default)]
    pub ew_role_usage: RoleUsage,
}

impl SubProfile {
    /// Standard-only sub-profile, the common base for tests and builders.
    pub fn standard_only(standard: StandardConstraints) -> Self {
        Self {
            name: None,
            standard,
            random_suit: None,
            partner_contingent: None,
            opponent_contingent: None,
            weight: 0.0,
            ns_role_usage: RoleUsage::Any,
            ew_role_usage: RoleUsage::Any,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        if self.random_suit.is_some() {
            ConstraintKind::RandomSuit
        } else if self.partner_contingent.is_some() {
            ConstraintKind::PartnerContingent
        } else if self.opponent_contingent.is_some() {
            ConstraintKind::OpponentContingent
        } else {
            ConstraintKind::Standard
        }
    }

    /// The contingent constraint with its source, if present.
    pub fn contingent(&self) -> Option<(TargetSource, &ContingentConstraint)> {
        if let Some(cc) = &self.partner_contingent {
            Some((TargetSource::Partner, cc))
        } else {
            self.opponent_contingent
                .as_ref()
                .map(|cc| (TargetSource::Opponents, cc))
        }
    }

    pub fn role_usage(&self, pair: Pair) -> RoleUsage {
        match pair {
            Pair::NS => self.ns_role_usage,
            Pair::EW => self.ew_role_usage,
        }
    }
}

/// Forbidden shape in S-H-D-C order with optional `x` wildcards, e.g.
/// `"4432"` or `"5xx1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapePattern(pub String);

impl ShapePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// True when every non-wildcard digit equals the corresponding suit
    /// length. `counts` is in S-H-D-C order.
    pub fn matches(&self, counts: [u8; 4]) -> bool {
        if self.0.len() != 4 {
            return false;
        }
        self.0.chars().zip(counts).all(|(c, count)| match c {
            'x' | 'X' => true,
            _ => c.to_digit(10) == Some(count as u32),
        })
    }

    /// Structural well-formedness: 4 characters, digits or `x`, digit sum
    /// at most 13, and exactly 13 when fully specified.
    pub fn is_well_formed(&self) -> bool {
        if self.0.len() != 4 {
            return false;
        }
        let mut digit_sum = 0u32;
        let mut wildcards = 0;
        for c in self.0.chars() {
            match c {
                'x' | 'X' => wildcards += 1,
                _ => match c.to_digit(10) {
                    Some(d) => digit_sum += d,
                    None => return false,
                },
            }
        }
        if wildcards == 0 {
            digit_sum == 13
        } else {
            digit_sum <= 13
        }
    }
}

impl fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All constraints for a single seat: the sub-profile list plus any
/// seat-level shape exclusions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatProfile {
    pub subprofiles: Vec<SubProfile>,
    #[serde(default, rename = "exclusion_clauses")]
    pub exclusions: Vec<ShapePattern>,
}

impl SeatProfile {
    pub fn new(subprofiles: Vec<SubProfile>) -> Self {
        Self {
            subprofiles,
            exclusions: Vec::new(),
        }
    }
}

/// How a partnership's sub-profile indices couple across a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleMode {
    /// Seats pick independently; no driver semantics.
    #[default]
    NoDriverNoIndex,
    NorthDrives,
    SouthDrives,
    EastDrives,
    WestDrives,
    /// One of N/S is designated driver per board, uniformly.
    NsRandomDriver,
    /// One of E/W is designated driver per board, uniformly.
    EwRandomDriver,
}

impl RoleMode {
    /// Whether this mode couples the pair's indices.
    pub fn is_coupled(self) -> bool {
        !matches!(self, RoleMode::NoDriverNoIndex)
    }

    /// The statically-known driver seat, if the mode fixes one.
    pub fn fixed_driver(self) -> Option<Seat> {
        match self {
            RoleMode::NorthDrives => Some(Seat::North),
            RoleMode::SouthDrives => Some(Seat::South),
            RoleMode::EastDrives => Some(Seat::East),
            RoleMode::WestDrives => Some(Seat::West),
            _ => None,
        }
    }

    /// Whether this mode is legal for the given pair's role-mode field.
    pub fn valid_for(self, pair: Pair) -> bool {
        match self {
            RoleMode::NoDriverNoIndex => true,
            RoleMode::NorthDrives | RoleMode::SouthDrives | RoleMode::NsRandomDriver => {
                pair == Pair::NS
            }
            RoleMode::EastDrives | RoleMode::WestDrives | RoleMode::EwRandomDriver => {
                pair == Pair::EW
            }
        }
    }

    /// Seats this mode may ever designate as driver.
    pub fn possible_drivers(self, pair: Pair) -> Vec<Seat> {
        match self {
            RoleMode::NoDriverNoIndex => Vec::new(),
            RoleMode::NsRandomDriver | RoleMode::EwRandomDriver => pair.seats().to_vec(),
            mode => mode.fixed_driver().into_iter().collect(),
        }
    }
}

/// Deal rendering order carried on the profile for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Suits S-H-D-C, ranks descending.
    #[default]
    Descending,
    /// Leave hands in dealt order.
    AsDealt,
}

/// The complete profile: one `SeatProfile` per seat plus pair coupling
/// policy. Immutable once loaded; editing flows produce a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandProfile {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub dealer: Seat,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub ns_role_mode: RoleMode,
    #[serde(default)]
    pub ew_role_mode: RoleMode,
    /// Driver-index to follower-index map for NS (0-based indices).
    #[serde(default)]
    pub ns_bespoke_map: Option<BTreeMap<usize, usize>>,
    /// Driver-index to follower-index map for EW (0-based indices).
    #[serde(default)]
    pub ew_bespoke_map: Option<BTreeMap<usize, usize>>,
    pub seat_profiles: BTreeMap<Seat, SeatProfile>,
}

impl HandProfile {
    /// Minimal profile skeleton used by tests and the wizard flow: every
    /// seat fully open, independent selection.
    pub fn open(name: impl Into<String>, dealer: Seat) -> Self {
        let seat_profiles = Seat::ALL
            .into_iter()
            .map(|seat| {
                (
                    seat,
                    SeatProfile::new(vec![SubProfile::standard_only(StandardConstraints::open())]),
                )
            })
            .collect();
        Self {
            name: name.into(),
            version: String::new(),
            author: String::new(),
            description: String::new(),
            dealer,
            sort_order: SortOrder::default(),
            ns_role_mode: RoleMode::default(),
            ew_role_mode: RoleMode::default(),
            ns_bespoke_map: None,
            ew_bespoke_map: None,
            seat_profiles,
        }
    }

    pub fn seat_profile(&self, seat: Seat) -> Option<&SeatProfile> {
        self.seat_profiles.get(&seat)
    }

    pub fn seat_profile_mut(&mut self, seat: Seat) -> Option<&mut SeatProfile> {
        self.seat_profiles.get_mut(&seat)
    }

    pub fn role_mode(&self, pair: Pair) -> RoleMode {
        match pair {
            Pair::NS => self.ns_role_mode,
            Pair::EW => self.ew_role_mode,
        }
    }

    pub fn bespoke_map(&self, pair: Pair) -> Option<&BTreeMap<usize, usize>> {
        match pair {
            Pair::NS => self.ns_bespoke_map.as_ref(),
            Pair::EW => self.ew_bespoke_map.as_ref(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
