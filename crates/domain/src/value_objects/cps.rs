//! Cognitive Paradox Syndrome stage derivation
//!
//! CPS is not a separate meter: its stage is derived from the same 0-100
//! stress value that drives [`StressThreshold`], but on its own breakpoints
//! and with its own consequences. The panic table becomes active in
//! Ruin-Madness, and Hollow Shell is terminal - the character is lost.
//!
//! [`StressThreshold`]: crate::value_objects::StressThreshold

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::stress::{MAX_STRESS, MIN_STRESS};

/// Stress value at which the Weight of Knowing begins
pub const WEIGHT_OF_KNOWING_THRESHOLD: i32 = 20;

/// Stress value at which Glimmer-Madness begins
pub const GLIMMER_MADNESS_THRESHOLD: i32 = 40;

/// Stress value at which Ruin-Madness begins (panic table active)
pub const RUIN_MADNESS_THRESHOLD: i32 = 60;

/// Stress value at which the terminal Hollow Shell stage begins
pub const HOLLOW_SHELL_THRESHOLD: i32 = 80;

/// CPS stages, ordered from untouched to terminal
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CpsStage {
    /// 0-19 - no symptoms
    #[default]
    None,
    /// 20-39 - intrusive awareness, sleep suffers
    WeightOfKnowing,
    /// 40-59 - hallucinated glimmers at the edge of vision
    GlimmerMadness,
    /// 60-79 - the mind fractures; panic table active
    RuinMadness,
    /// 80-100 - terminal; the character is gone
    HollowShell,
}

impl CpsStage {
    /// Derive the stage from a stress value (clamped first)
    pub fn from_stress(stress: i32) -> Self {
        match stress.clamp(MIN_STRESS, MAX_STRESS) {
            80..=100 => CpsStage::HollowShell,
            60..=79 => CpsStage::RuinMadness,
            40..=59 => CpsStage::GlimmerMadness,
            20..=39 => CpsStage::WeightOfKnowing,
            _ => CpsStage::None,
        }
    }

    /// Get all stages in ascending severity
    pub fn all() -> &'static [CpsStage] {
        &[
            CpsStage::None,
            CpsStage::WeightOfKnowing,
            CpsStage::GlimmerMadness,
            CpsStage::RuinMadness,
            CpsStage::HollowShell,
        ]
    }

    /// Get a display name for the stage
    pub fn display_name(&self) -> &'static str {
        match self {
            CpsStage::None => "None",
            CpsStage::WeightOfKnowing => "Weight of Knowing",
            CpsStage::GlimmerMadness => "Glimmer-Madness",
            CpsStage::RuinMadness => "Ruin-Madness",
            CpsStage::HollowShell => "Hollow Shell",
        }
    }

    /// Whether the panic table must be rolled on stress triggers at this
    /// stage. Only Ruin-Madness panics; Hollow Shell is already beyond
    /// panicking.
    pub fn requires_panic_check(&self) -> bool {
        *self == CpsStage::RuinMadness
    }

    /// Whether this stage is terminal
    pub fn is_terminal(&self) -> bool {
        *self == CpsStage::HollowShell
    }

    /// Whether natural recovery is still possible (below Ruin-Madness)
    pub fn is_recoverable(&self) -> bool {
        *self < CpsStage::RuinMadness
    }
}

impl fmt::Display for CpsStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A character's CPS view over a stress value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CpsState {
    current_stress: i32,
}

impl CpsState {
    /// Create a CPS view for the given stress value, clamped to [0, 100]
    pub fn create(stress: i32) -> Self {
        Self {
            current_stress: stress.clamp(MIN_STRESS, MAX_STRESS),
        }
    }

    /// The stress value this view derives from
    pub fn current_stress(&self) -> i32 {
        self.current_stress
    }

    /// The CPS stage for the current stress
    pub fn stage(&self) -> CpsStage {
        CpsStage::from_stress(self.current_stress)
    }

    /// Whether a panic table roll is required on stress triggers
    pub fn requires_panic_check(&self) -> bool {
        self.stage().requires_panic_check()
    }

    /// Whether the character has reached Hollow Shell
    pub fn is_terminal(&self) -> bool {
        self.stage().is_terminal()
    }
}

impl fmt::Display for CpsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPS: {} (stress {})", self.stage(), self.current_stress)
    }
}

/// Transition descriptor for a CPS stage change driven by a stress change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpsStageChangeResult {
    /// Stress value before the change (clamped)
    pub previous_stress: i32,
    /// Stress value after the change (clamped)
    pub new_stress: i32,
    /// Stage before the change
    pub previous_stage: CpsStage,
    /// Stage after the change
    pub new_stage: CpsStage,
    /// Whether the stage changed at all
    pub stage_changed: bool,
    /// Whether this change crossed into Ruin-Madness (panic table activates)
    pub panic_table_activated: bool,
    /// Whether this change crossed into Hollow Shell
    pub entered_terminal: bool,
}

impl CpsStageChangeResult {
    /// Build the descriptor for one stress transition
    pub fn from_stress_change(previous_stress: i32, new_stress: i32) -> Self {
        let previous_stress = previous_stress.clamp(MIN_STRESS, MAX_STRESS);
        let new_stress = new_stress.clamp(MIN_STRESS, MAX_STRESS);
        let previous_stage = CpsStage::from_stress(previous_stress);
        let new_stage = CpsStage::from_stress(new_stress);

        Self {
            previous_stress,
            new_stress,
            previous_stage,
            new_stage,
            stage_changed: previous_stage != new_stage,
            panic_table_activated: previous_stage < CpsStage::RuinMadness
                && new_stage == CpsStage::RuinMadness,
            entered_terminal: previous_stage != CpsStage::HollowShell
                && new_stage == CpsStage::HollowShell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_bands() {
        assert_eq!(CpsStage::from_stress(0), CpsStage::None);
        assert_eq!(CpsStage::from_stress(19), CpsStage::None);
        assert_eq!(CpsStage::from_stress(20), CpsStage::WeightOfKnowing);
        assert_eq!(CpsStage::from_stress(40), CpsStage::GlimmerMadness);
        assert_eq!(CpsStage::from_stress(60), CpsStage::RuinMadness);
        assert_eq!(CpsStage::from_stress(79), CpsStage::RuinMadness);
        assert_eq!(CpsStage::from_stress(80), CpsStage::HollowShell);
        assert_eq!(CpsStage::from_stress(100), CpsStage::HollowShell);
    }

    #[test]
    fn test_panic_check_only_in_ruin_madness() {
        assert!(!CpsState::create(59).requires_panic_check());
        assert!(CpsState::create(60).requires_panic_check());
        assert!(CpsState::create(79).requires_panic_check());
        assert!(!CpsState::create(80).requires_panic_check());
    }

    #[test]
    fn test_terminal_only_at_hollow_shell() {
        assert!(!CpsState::create(79).is_terminal());
        assert!(CpsState::create(80).is_terminal());
    }

    #[test]
    fn test_recoverable_below_ruin_madness() {
        assert!(CpsStage::GlimmerMadness.is_recoverable());
        assert!(!CpsStage::RuinMadness.is_recoverable());
        assert!(!CpsStage::HollowShell.is_recoverable());
    }

    #[test]
    fn test_stage_change_descriptor() {
        let result = CpsStageChangeResult::from_stress_change(55, 65);
        assert!(result.stage_changed);
        assert!(result.panic_table_activated);
        assert!(!result.entered_terminal);
        assert_eq!(result.previous_stage, CpsStage::GlimmerMadness);
        assert_eq!(result.new_stage, CpsStage::RuinMadness);
    }

    #[test]
    fn test_no_change_within_band() {
        let result = CpsStageChangeResult::from_stress_change(42, 58);
        assert!(!result.stage_changed);
        assert!(!result.panic_table_activated);
    }

    #[test]
    fn test_jump_straight_to_terminal_skips_panic_activation() {
        // Skipping over Ruin-Madness entirely lands in a stage that no
        // longer panics
        let result = CpsStageChangeResult::from_stress_change(30, 85);
        assert!(result.stage_changed);
        assert!(result.entered_terminal);
        assert!(!result.panic_table_activated);
        assert_eq!(result.new_stage, CpsStage::HollowShell);
    }

    #[test]
    fn test_recovery_deactivates_terminal_flag() {
        let result = CpsStageChangeResult::from_stress_change(85, 70);
        assert!(result.stage_changed);
        assert!(!result.entered_terminal);
        assert_eq!(result.new_stage, CpsStage::RuinMadness);
    }
}
