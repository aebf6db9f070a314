//! Skill check resolution and six-tier outcome classification
//!
//! This is the single resolution primitive reused by every gameplay system:
//! a rolled dice pool plus a difficulty class classifies into one of six
//! ordered outcome tiers. Callers compare tiers with `>=` ("was this at
//! least a success?"), so the enum ordering is intentional and tested.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::DiceRollResult;

/// Six-tier outcome of a skill check, totally ordered from worst to best
///
/// Fumble takes absolute priority: a roll with zero successes and at least
/// one botch is a `CriticalFailure` no matter what the margin would say,
/// even against a DC of 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillOutcome {
    /// Fumble - zero successes with at least one botch
    CriticalFailure,
    /// Net successes fell short of the difficulty class
    #[default]
    Failure,
    /// Exactly met the difficulty class (margin 0)
    MarginalSuccess,
    /// Beat the difficulty class by 1-2
    FullSuccess,
    /// Beat the difficulty class by 3-4
    ExceptionalSuccess,
    /// Beat the difficulty class by 5 or more
    CriticalSuccess,
}

impl SkillOutcome {
    /// Classify a check. Pure and total: every `(net, dc, fumble)` triple
    /// maps to exactly one tier, and the fumble check runs first,
    /// unconditionally.
    pub fn classify(net_successes: i32, difficulty_class: i32, is_fumble: bool) -> Self {
        if is_fumble {
            return SkillOutcome::CriticalFailure;
        }
        let margin = net_successes - difficulty_class;
        match margin {
            m if m < 0 => SkillOutcome::Failure,
            0 => SkillOutcome::MarginalSuccess,
            1..=2 => SkillOutcome::FullSuccess,
            3..=4 => SkillOutcome::ExceptionalSuccess,
            _ => SkillOutcome::CriticalSuccess,
        }
    }

    /// Get all outcome tiers in ascending order
    pub fn all() -> &'static [SkillOutcome] {
        &[
            SkillOutcome::CriticalFailure,
            SkillOutcome::Failure,
            SkillOutcome::MarginalSuccess,
            SkillOutcome::FullSuccess,
            SkillOutcome::ExceptionalSuccess,
            SkillOutcome::CriticalSuccess,
        ]
    }

    /// Get a display name for the outcome tier
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillOutcome::CriticalFailure => "Critical Failure",
            SkillOutcome::Failure => "Failure",
            SkillOutcome::MarginalSuccess => "Marginal Success",
            SkillOutcome::FullSuccess => "Full Success",
            SkillOutcome::ExceptionalSuccess => "Exceptional Success",
            SkillOutcome::CriticalSuccess => "Critical Success",
        }
    }

    /// Whether this tier counts as a success of any grade
    pub fn is_success(&self) -> bool {
        *self >= SkillOutcome::MarginalSuccess
    }
}

impl fmt::Display for SkillOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SkillOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "critical_failure" => Ok(SkillOutcome::CriticalFailure),
            "failure" => Ok(SkillOutcome::Failure),
            "marginal_success" => Ok(SkillOutcome::MarginalSuccess),
            "full_success" => Ok(SkillOutcome::FullSuccess),
            "exceptional_success" => Ok(SkillOutcome::ExceptionalSuccess),
            "critical_success" => Ok(SkillOutcome::CriticalSuccess),
            _ => Err(DomainError::parse(format!("Unknown skill outcome: {}", s))),
        }
    }
}

/// Named difficulty ladder baked into the core
///
/// Content that references difficulties by name resolves through this
/// table; the margin-to-outcome mapping itself is fixed and not
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// DC 1 - routine under pressure
    Trivial,
    /// DC 2
    Easy,
    /// DC 3
    Standard,
    /// DC 4
    Hard,
    /// DC 5 - the edge of mortal skill
    Extreme,
}

impl Difficulty {
    /// The difficulty class (net successes required)
    pub fn dc(&self) -> i32 {
        match self {
            Difficulty::Trivial => 1,
            Difficulty::Easy => 2,
            Difficulty::Standard => 3,
            Difficulty::Hard => 4,
            Difficulty::Extreme => 5,
        }
    }

    /// Get a display name for the difficulty
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Trivial => "Trivial",
            Difficulty::Easy => "Easy",
            Difficulty::Standard => "Standard",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Look up a difficulty by its content-facing name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "trivial" => Some(Difficulty::Trivial),
            "easy" => Some(Difficulty::Easy),
            "standard" => Some(Difficulty::Standard),
            "hard" => Some(Difficulty::Hard),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (DC {})", self.display_name(), self.dc())
    }
}

/// Complete record of one resolved skill check
///
/// Outcome, margin and fumble status are derived once at construction from
/// the roll and the difficulty class - `outcome` is never set independently,
/// so a stored result cannot drift from its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheckResult {
    /// Content identifier of the skill that was checked
    pub skill_id: String,
    /// Display name of the skill
    pub skill_name: String,
    /// The underlying dice roll
    pub dice_result: DiceRollResult,
    /// Bonus successes from the governing attribute
    pub attribute_bonus: i32,
    /// Situational/equipment bonus successes
    pub other_bonus: i32,
    /// Net successes required to fully succeed
    pub difficulty_class: i32,
    /// Content-facing name of the difficulty ("Standard", "Contested", ...)
    pub difficulty_name: String,
    /// Net successes including bonuses
    pub net_successes: i32,
    /// Net successes minus difficulty class
    pub margin: i32,
    /// Six-tier classification of this check
    pub outcome: SkillOutcome,
    /// Whether the roll was a fumble
    pub is_fumble: bool,
}

impl SkillCheckResult {
    /// Resolve a check from a rolled pool and a difficulty class.
    ///
    /// Fails with a validation error when the skill id or name is empty -
    /// that is a caller bug, not a game state.
    pub fn new(
        skill_id: impl Into<String>,
        skill_name: impl Into<String>,
        dice_result: DiceRollResult,
        attribute_bonus: i32,
        other_bonus: i32,
        difficulty_class: i32,
        difficulty_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let skill_id = skill_id.into();
        let skill_name = skill_name.into();
        if skill_id.trim().is_empty() {
            return Err(DomainError::validation("Skill id cannot be empty"));
        }
        if skill_name.trim().is_empty() {
            return Err(DomainError::validation("Skill name cannot be empty"));
        }

        let net_successes = dice_result.net_successes + attribute_bonus + other_bonus;
        let margin = net_successes - difficulty_class;
        let is_fumble = dice_result.is_fumble;
        let outcome = SkillOutcome::classify(net_successes, difficulty_class, is_fumble);

        Ok(Self {
            skill_id,
            skill_name,
            dice_result,
            attribute_bonus,
            other_bonus,
            difficulty_class,
            difficulty_name: difficulty_name.into(),
            net_successes,
            margin,
            outcome,
            is_fumble,
        })
    }

    /// Whether this check succeeded at any grade
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Whether this check was a critical success
    pub fn is_critical_success(&self) -> bool {
        self.outcome == SkillOutcome::CriticalSuccess
    }
}

impl fmt::Display for SkillCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} net vs DC {} [{}] -> {}",
            self.skill_name, self.net_successes, self.difficulty_class, self.difficulty_name,
            self.outcome
        )
    }
}
