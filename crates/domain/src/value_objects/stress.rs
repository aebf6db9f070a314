//! Psychic stress threshold state machine
//!
//! A character's stress is a single clamped [0, 100] value; the threshold
//! tier, defense penalty and skill disadvantage are always derived from it,
//! never stored separately, so the two can never desynchronize. All
//! mutation returns a new state - the previous instance is untouched.
//!
//! The stress system intentionally forms a feedback loop: higher stress
//! reduces Defense, which invites more of the attacks that cause stress.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// The minimum valid stress value (inclusive)
pub const MIN_STRESS: i32 = 0;

/// The maximum valid stress value (inclusive); reaching it triggers a
/// trauma check
pub const MAX_STRESS: i32 = 100;

/// Stress threshold tiers in 20-point bands, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum StressThreshold {
    /// 0-19 - no accumulated pressure
    #[default]
    Calm,
    /// 20-39
    Uneasy,
    /// 40-59
    Anxious,
    /// 60-79
    Panicked,
    /// 80-99 - disadvantage on skill checks
    Breaking,
    /// 100 - trauma check required
    Trauma,
}

impl StressThreshold {
    /// Derive the tier from a stress value (clamped first)
    pub fn from_stress(stress: i32) -> Self {
        match stress.clamp(MIN_STRESS, MAX_STRESS) {
            100 => StressThreshold::Trauma,
            80..=99 => StressThreshold::Breaking,
            60..=79 => StressThreshold::Panicked,
            40..=59 => StressThreshold::Anxious,
            20..=39 => StressThreshold::Uneasy,
            _ => StressThreshold::Calm,
        }
    }

    /// Get all tiers in ascending severity
    pub fn all() -> &'static [StressThreshold] {
        &[
            StressThreshold::Calm,
            StressThreshold::Uneasy,
            StressThreshold::Anxious,
            StressThreshold::Panicked,
            StressThreshold::Breaking,
            StressThreshold::Trauma,
        ]
    }

    /// Defense stat reduction for this tier (0 at Calm up to 5 at Trauma)
    pub fn defense_penalty(&self) -> i32 {
        *self as i32
    }

    /// Whether this tier imposes disadvantage on skill checks
    pub fn has_skill_disadvantage(&self) -> bool {
        *self >= StressThreshold::Breaking
    }

    /// Get a display name for the tier
    pub fn display_name(&self) -> &'static str {
        match self {
            StressThreshold::Calm => "Calm",
            StressThreshold::Uneasy => "Uneasy",
            StressThreshold::Anxious => "Anxious",
            StressThreshold::Panicked => "Panicked",
            StressThreshold::Breaking => "Breaking",
            StressThreshold::Trauma => "Trauma",
        }
    }
}

impl fmt::Display for StressThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a stress hit came from, carried on transition descriptors for the
/// logging and presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressSource {
    Combat,
    Environmental,
    Exploration,
    Heretical,
    Corruption,
    Narrative,
    /// Liar's Burden - the flat cost of maintaining a deception
    Deception,
}

impl fmt::Display for StressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StressSource::Combat => "Combat",
            StressSource::Environmental => "Environmental",
            StressSource::Exploration => "Exploration",
            StressSource::Heretical => "Heretical",
            StressSource::Corruption => "Corruption",
            StressSource::Narrative => "Narrative",
            StressSource::Deception => "Deception",
        };
        write!(f, "{}", name)
    }
}

/// Rest categories for stress recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestType {
    /// Recovers 2 x WILL
    Short,
    /// Recovers 5 x WILL
    Long,
    /// Full reset to zero
    Sanctuary,
    /// Flat 25-point recovery at story milestones
    Milestone,
}

/// A character's current psychic stress as an immutable value object
///
/// The stored value is the single source of truth; every other property is
/// a pure function of it. Out-of-range input is a normal occurrence (damage
/// overflow) and is silently clamped, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StressState {
    current_stress: i32,
}

impl StressState {
    /// Create a state with the given stress value, clamped to [0, 100]
    pub fn create(stress: i32) -> Self {
        Self {
            current_stress: stress.clamp(MIN_STRESS, MAX_STRESS),
        }
    }

    /// A state with zero stress (Calm)
    pub fn calm() -> Self {
        Self::create(MIN_STRESS)
    }

    /// The current stress value in [0, 100]
    pub fn current_stress(&self) -> i32 {
        self.current_stress
    }

    /// The threshold tier for the current value
    pub fn threshold(&self) -> StressThreshold {
        StressThreshold::from_stress(self.current_stress)
    }

    /// Defense penalty imposed by the current tier (0-5)
    pub fn defense_penalty(&self) -> i32 {
        self.threshold().defense_penalty()
    }

    /// Whether the current tier imposes disadvantage on skill checks
    pub fn has_skill_disadvantage(&self) -> bool {
        self.threshold().has_skill_disadvantage()
    }

    /// Whether a trauma check is required (stress at maximum)
    pub fn requires_trauma_check(&self) -> bool {
        self.current_stress >= MAX_STRESS
    }

    /// Whether the character sits in the Calm tier
    pub fn is_calm(&self) -> bool {
        self.threshold() == StressThreshold::Calm
    }

    /// Whether the character is at Breaking or worse
    pub fn is_breaking(&self) -> bool {
        self.threshold() >= StressThreshold::Breaking
    }

    /// Stress as a fill fraction in [0.0, 1.0] for bar rendering
    pub fn stress_fraction(&self) -> f64 {
        f64::from(self.current_stress) / f64::from(MAX_STRESS)
    }

    /// A new state with the given absolute stress value (clamped)
    pub fn with_stress(&self, new_stress: i32) -> Self {
        Self::create(new_stress)
    }

    /// A new state with stress increased by `amount`, clamped to the
    /// maximum. Direction is expressed by the method, not the sign:
    /// negative amounts are a caller bug.
    pub fn with_stress_added(&self, amount: i32) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "Stress amount to add cannot be negative",
            ));
        }
        Ok(Self::create(self.current_stress.saturating_add(amount)))
    }

    /// A new state with stress decreased by `amount`, clamped to zero.
    /// Negative amounts are rejected.
    pub fn with_stress_reduced(&self, amount: i32) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::validation(
                "Stress amount to reduce cannot be negative",
            ));
        }
        Ok(Self::create(self.current_stress.saturating_sub(amount)))
    }
}

impl fmt::Display for StressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stress: {}/{} [{}] (Def: -{})",
            self.current_stress,
            MAX_STRESS,
            self.threshold(),
            self.defense_penalty()
        )
    }
}

/// Result of a WILL resistance roll against incoming stress
///
/// Net successes map to a fixed reduction ladder: 0 -> no reduction,
/// 1 -> 50%, 2-3 -> 75%, 4+ -> full negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressCheckResult {
    /// Net successes on the resistance roll (floored at 0)
    pub successes: i32,
    /// The stress amount before reduction
    pub base_stress: i32,
    /// Percent of the base amount resisted (0, 50, 75 or 100)
    pub reduction_percent: i32,
    /// The stress amount that actually lands
    pub final_stress: i32,
}

impl StressCheckResult {
    /// Map net successes to the reduction ladder
    pub fn create(successes: i32, base_stress: i32) -> Self {
        let successes = successes.max(0);
        let reduction_percent = match successes {
            0 => 0,
            1 => 50,
            2..=3 => 75,
            _ => 100,
        };
        let final_stress = base_stress - (base_stress * reduction_percent / 100);
        Self {
            successes,
            base_stress,
            reduction_percent,
            final_stress,
        }
    }
}

/// Transition descriptor for one stress application
///
/// Records the true before/after pair for a single event, which is what
/// threshold-crossing detection depends on; batching multiple deltas into
/// one application can mask an intermediate crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressApplicationResult {
    /// Stress value before the event (clamped)
    pub previous_stress: i32,
    /// Stress value after the event (clamped)
    pub new_stress: i32,
    /// The amount that actually landed after clamping
    pub stress_gained: i32,
    /// Where the stress came from
    pub source: StressSource,
    /// Tier before the event
    pub previous_threshold: StressThreshold,
    /// Tier after the event
    pub new_threshold: StressThreshold,
    /// Whether the tier changed; always equivalent to
    /// `previous_threshold != new_threshold`
    pub threshold_crossed: bool,
    /// Whether this event pushed stress to the maximum
    pub trauma_check_triggered: bool,
    /// The resistance roll that reduced the incoming amount, if one was made
    pub resistance: Option<StressCheckResult>,
}

impl StressApplicationResult {
    /// Build the descriptor for one before/after pair. Both ends are
    /// clamped so overflow from combat math is normalized here.
    pub fn create(
        previous_stress: i32,
        new_stress: i32,
        source: StressSource,
        resistance: Option<StressCheckResult>,
    ) -> Self {
        let previous_stress = previous_stress.clamp(MIN_STRESS, MAX_STRESS);
        let new_stress = new_stress.clamp(MIN_STRESS, MAX_STRESS);
        let previous_threshold = StressThreshold::from_stress(previous_stress);
        let new_threshold = StressThreshold::from_stress(new_stress);

        Self {
            previous_stress,
            new_stress,
            stress_gained: new_stress - previous_stress,
            source,
            previous_threshold,
            new_threshold,
            threshold_crossed: previous_threshold != new_threshold,
            trauma_check_triggered: new_stress >= MAX_STRESS,
            resistance,
        }
    }
}

/// Transition descriptor for one stress recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressRecoveryResult {
    /// Stress value before the rest (clamped)
    pub previous_stress: i32,
    /// Stress value after the rest (clamped)
    pub new_stress: i32,
    /// The amount actually recovered after clamping
    pub amount_recovered: i32,
    /// What kind of rest produced the recovery
    pub rest_type: RestType,
    /// Tier before the rest
    pub previous_threshold: StressThreshold,
    /// Tier after the rest
    pub new_threshold: StressThreshold,
    /// Whether the tier improved
    pub threshold_dropped: bool,
}

impl StressRecoveryResult {
    /// Build the descriptor for one recovery event
    pub fn create(previous_stress: i32, new_stress: i32, rest_type: RestType) -> Self {
        let previous_stress = previous_stress.clamp(MIN_STRESS, MAX_STRESS);
        let new_stress = new_stress.clamp(MIN_STRESS, MAX_STRESS);
        let previous_threshold = StressThreshold::from_stress(previous_stress);
        let new_threshold = StressThreshold::from_stress(new_stress);

        Self {
            previous_stress,
            new_stress,
            amount_recovered: previous_stress - new_stress,
            rest_type,
            previous_threshold,
            new_threshold,
            threshold_dropped: new_threshold < previous_threshold,
        }
    }
}
