//! Runic blight corruption threshold state machine
//!
//! Corruption is the slow-burn counterpart to psychic stress: the same
//! clamped [0, 100] arithmetic and stage derivation, but near-permanent -
//! recovery is rare and quest-gated, so the strategic stakes are long-term
//! rather than tactical. The one-time 25/50/75 narrative thresholds are
//! remembered per character by [`CorruptionTracker`]; this module only
//! detects the crossing for a given before/after pair.
//!
//! [`CorruptionTracker`]: crate::entities::CorruptionTracker

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// The minimum valid corruption value (inclusive)
pub const MIN_CORRUPTION: i32 = 0;

/// The maximum valid corruption value (inclusive); reaching it triggers a
/// mutation check
pub const MAX_CORRUPTION: i32 = 100;

/// Corruption value at which the Tainted stage begins
pub const TAINTED_THRESHOLD: i32 = 20;

/// Corruption value at which the Infected stage begins
pub const INFECTED_THRESHOLD: i32 = 40;

/// Corruption value at which the Blighted stage begins
pub const BLIGHTED_THRESHOLD: i32 = 60;

/// Corruption value at which the Corrupted stage begins (mutation risk)
pub const CORRUPTED_THRESHOLD: i32 = 80;

/// Corruption value of the terminal Consumed stage
pub const CONSUMED_THRESHOLD: i32 = 100;

/// Corruption stages in 20-point bands, ordered from clean to consumed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionStage {
    /// 0-19 - no visible signs
    #[default]
    Uncorrupted,
    /// 20-39 - minor cosmetic signs
    Tainted,
    /// 40-59 - visible corruption marks
    Infected,
    /// 60-79 - the blight runs deep
    Blighted,
    /// 80-99 - mutation risk
    Corrupted,
    /// 100 - terminal
    Consumed,
}

impl CorruptionStage {
    /// Derive the stage from a corruption value (clamped first)
    pub fn from_corruption(corruption: i32) -> Self {
        match corruption.clamp(MIN_CORRUPTION, MAX_CORRUPTION) {
            100 => CorruptionStage::Consumed,
            80..=99 => CorruptionStage::Corrupted,
            60..=79 => CorruptionStage::Blighted,
            40..=59 => CorruptionStage::Infected,
            20..=39 => CorruptionStage::Tainted,
            _ => CorruptionStage::Uncorrupted,
        }
    }

    /// Get all stages in ascending severity
    pub fn all() -> &'static [CorruptionStage] {
        &[
            CorruptionStage::Uncorrupted,
            CorruptionStage::Tainted,
            CorruptionStage::Infected,
            CorruptionStage::Blighted,
            CorruptionStage::Corrupted,
            CorruptionStage::Consumed,
        ]
    }

    /// Get a display name for the stage
    pub fn display_name(&self) -> &'static str {
        match self {
            CorruptionStage::Uncorrupted => "Uncorrupted",
            CorruptionStage::Tainted => "Tainted",
            CorruptionStage::Infected => "Infected",
            CorruptionStage::Blighted => "Blighted",
            CorruptionStage::Corrupted => "Corrupted",
            CorruptionStage::Consumed => "Consumed",
        }
    }
}

impl fmt::Display for CorruptionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a corruption gain came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionSource {
    Environmental,
    Artifact,
    Consumable,
    Ritual,
    HereticalAbility,
    MysticMagic,
    BlightTransfer,
    ForlornContact,
}

impl fmt::Display for CorruptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CorruptionSource::Environmental => "Environmental",
            CorruptionSource::Artifact => "Artifact",
            CorruptionSource::Consumable => "Consumable",
            CorruptionSource::Ritual => "Ritual",
            CorruptionSource::HereticalAbility => "Heretical Ability",
            CorruptionSource::MysticMagic => "Mystic Magic",
            CorruptionSource::BlightTransfer => "Blight Transfer",
            CorruptionSource::ForlornContact => "Forlorn Contact",
        };
        write!(f, "{}", name)
    }
}

/// A character's current corruption as an immutable value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionState {
    current_corruption: i32,
}

impl CorruptionState {
    /// Create a state with the given corruption value, clamped to [0, 100]
    pub fn create(corruption: i32) -> Self {
        Self {
            current_corruption: corruption.clamp(MIN_CORRUPTION, MAX_CORRUPTION),
        }
    }

    /// A state with zero corruption
    pub fn uncorrupted() -> Self {
        Self::create(MIN_CORRUPTION)
    }

    /// The current corruption value in [0, 100]
    pub fn current_corruption(&self) -> i32 {
        self.current_corruption
    }

    /// The stage for the current value
    pub fn stage(&self) -> CorruptionStage {
        CorruptionStage::from_corruption(self.current_corruption)
    }

    /// Progress toward being Consumed, in [0.0, 1.0]
    pub fn fraction_to_consumption(&self) -> f64 {
        f64::from(self.current_corruption) / f64::from(MAX_CORRUPTION)
    }

    /// Whether a mutation check is required (corruption at maximum)
    pub fn requires_mutation_check(&self) -> bool {
        self.current_corruption >= MAX_CORRUPTION
    }

    /// Whether the character risks mutation (Corrupted stage or higher)
    pub fn has_mutation_risk(&self) -> bool {
        self.current_corruption >= CORRUPTED_THRESHOLD
    }

    /// Whether the character shows no corruption
    pub fn is_uncorrupted(&self) -> bool {
        self.stage() == CorruptionStage::Uncorrupted
    }

    /// Whether the character has reached the terminal stage
    pub fn is_consumed(&self) -> bool {
        self.stage() == CorruptionStage::Consumed
    }

    /// A new state with corruption increased by `amount`, clamped to the
    /// maximum. Negative amounts are a caller bug.
    pub fn with_corruption_added(&self, amount: i32) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "Corruption amount to add cannot be negative",
            ));
        }
        Ok(Self::create(self.current_corruption.saturating_add(amount)))
    }

    /// A new state with corruption decreased by `amount`, clamped to zero.
    /// Negative amounts are rejected. Reduction is rare in play (rituals,
    /// quest rewards) but follows the same contract as stress.
    pub fn with_corruption_reduced(&self, amount: i32) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "Corruption amount to reduce cannot be negative",
            ));
        }
        Ok(Self::create(self.current_corruption.saturating_sub(amount)))
    }
}

impl fmt::Display for CorruptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Corruption: {}/{} [{}]",
            self.current_corruption,
            MAX_CORRUPTION,
            self.stage()
        )
    }
}

/// Transition descriptor for one corruption gain
///
/// `threshold_crossed` fires only when the before/after pair straddles one
/// of the 25/50/75 narrative thresholds AND the owning tracker has not
/// already fired it earlier in the character's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionAddResult {
    /// Corruption value before the event (clamped)
    pub previous_corruption: i32,
    /// Corruption value after the event (clamped)
    pub new_corruption: i32,
    /// The amount that actually landed after clamping
    pub amount_applied: i32,
    /// Where the corruption came from
    pub source: CorruptionSource,
    /// Stage before the event
    pub previous_stage: CorruptionStage,
    /// Stage after the event
    pub new_stage: CorruptionStage,
    /// Whether the stage changed; always equivalent to
    /// `previous_stage != new_stage`
    pub stage_changed: bool,
    /// The one-time narrative threshold crossed by this event, if any
    pub threshold_crossed: Option<i32>,
    /// Whether this event reached the terminal Consumed stage
    pub is_terminal: bool,
}

impl CorruptionAddResult {
    /// Build the descriptor for one before/after pair
    pub fn create(
        previous_corruption: i32,
        new_corruption: i32,
        source: CorruptionSource,
        threshold_crossed: Option<i32>,
    ) -> Self {
        let previous_corruption = previous_corruption.clamp(MIN_CORRUPTION, MAX_CORRUPTION);
        let new_corruption = new_corruption.clamp(MIN_CORRUPTION, MAX_CORRUPTION);
        let previous_stage = CorruptionStage::from_corruption(previous_corruption);
        let new_stage = CorruptionStage::from_corruption(new_corruption);

        Self {
            previous_corruption,
            new_corruption,
            amount_applied: new_corruption - previous_corruption,
            source,
            previous_stage,
            new_stage,
            stage_changed: previous_stage != new_stage,
            threshold_crossed,
            is_terminal: new_corruption >= MAX_CORRUPTION,
        }
    }
}
