//! The d10 panic table
//!
//! A stateless face-to-effect lookup, rolled whenever a character in
//! Ruin-Madness takes a stress trigger. The table itself knows nothing
//! about who panicked or why; callers roll the d10 and hand the face here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// The ten panic effects, one per d10 face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PanicEffect {
    /// 1 - Logic Lock: stunned for a turn
    Frozen,
    /// 2 - Involuntary Scream: alerts everything nearby
    Scream,
    /// 3 - Evacuation Protocol: must flee from the source
    Flee,
    /// 4 - Fetal Position: drops prone
    Fetal,
    /// 5 - System Blackout: unconscious
    Blackout,
    /// 6 - Reality Denial: cannot perceive the trigger
    Denial,
    /// 7 - Paradox Fury: attacks the nearest creature
    Violence,
    /// 8 - System Crash: prone and stunned until damaged
    Catatonia,
    /// 9 - Reality Drift: acts at random
    Dissociation,
    /// 10 - Lucky Break: holds together
    None,
}

/// Actions a panic effect can force on its victim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ForcedAction {
    /// Move away from the stress source by the fastest route
    FleeFromSource,
    /// Attack the nearest creature, friend or foe
    AttackNearest,
    /// The victim's next action is chosen at random
    RandomAction,
}

impl fmt::Display for ForcedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForcedAction::FleeFromSource => "Flee From Source",
            ForcedAction::AttackNearest => "Attack Nearest",
            ForcedAction::RandomAction => "Random Action",
        };
        write!(f, "{}", name)
    }
}

/// One resolved panic table roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicResult {
    /// The d10 face rolled, in [1, 10]
    pub roll: u32,
    /// The effect the face maps to
    pub effect: PanicEffect,
    /// In-world name for the effect
    pub effect_name: String,
    /// Narrative description shown to the player
    pub description: String,
    /// How many turns the effect lasts, if it is timed
    pub duration_turns: Option<u32>,
    /// The action the effect forces, if any
    pub forced_action: Option<ForcedAction>,
    /// Status effects applied by the effect
    pub status_effects: Vec<String>,
}

impl PanicResult {
    /// Whether the character got away with nothing
    pub fn is_lucky_break(&self) -> bool {
        self.effect == PanicEffect::None
    }
}

impl fmt::Display for PanicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d10={} -> {}", self.roll, self.effect_name)
    }
}

/// Look up the panic effect for a d10 face
///
/// Faces outside [1, 10] are a caller bug (a mis-sized die reached the
/// table) and are rejected rather than mapped to anything.
pub fn panic_result_for_roll(roll: u32) -> Result<PanicResult, DomainError> {
    let (effect, effect_name, description, duration_turns, forced_action, status_effects): (
        PanicEffect,
        &str,
        &str,
        Option<u32>,
        Option<ForcedAction>,
        &[&str],
    ) = match roll {
        1 => (
            PanicEffect::Frozen,
            "Logic Lock",
            "Your mind freezes, unable to process the paradox before you.",
            Some(1),
            None,
            &["Stunned"],
        ),
        2 => (
            PanicEffect::Scream,
            "Involuntary Scream",
            "A scream tears from your throat before you can stop it.",
            None,
            None,
            &[],
        ),
        3 => (
            PanicEffect::Flee,
            "Evacuation Protocol",
            "Your survival instincts override all else. You MUST flee.",
            None,
            Some(ForcedAction::FleeFromSource),
            &[],
        ),
        4 => (
            PanicEffect::Fetal,
            "Fetal Position",
            "You curl into a ball, trying to make yourself as small as possible.",
            None,
            None,
            &["Prone"],
        ),
        5 => (
            PanicEffect::Blackout,
            "System Blackout",
            "Your mind shuts down to protect itself. Darkness takes you.",
            Some(2),
            None,
            &["Unconscious"],
        ),
        6 => (
            PanicEffect::Denial,
            "Reality Denial",
            "Your mind refuses to acknowledge the threat. It simply... isn't there.",
            Some(2),
            None,
            &[],
        ),
        7 => (
            PanicEffect::Violence,
            "Paradox Fury",
            "Rage fills the void where reason should be. ATTACK!",
            Some(1),
            Some(ForcedAction::AttackNearest),
            &[],
        ),
        8 => (
            PanicEffect::Catatonia,
            "System Crash",
            "Your mind shuts down completely. Only pain can reboot you.",
            None,
            None,
            &["Prone", "Stunned"],
        ),
        9 => (
            PanicEffect::Dissociation,
            "Reality Drift",
            "Your mind and body disconnect. You act without intent.",
            Some(1),
            Some(ForcedAction::RandomAction),
            &[],
        ),
        10 => (
            PanicEffect::None,
            "Lucky Break",
            "Your mind holds together... for now.",
            None,
            None,
            &[],
        ),
        other => {
            return Err(DomainError::validation(format!(
                "Panic table roll must be 1-10, got {}",
                other
            )))
        }
    };

    Ok(PanicResult {
        roll,
        effect,
        effect_name: effect_name.to_string(),
        description: description.to_string(),
        duration_turns,
        forced_action,
        status_effects: status_effects.iter().map(|s| s.to_string()).collect(),
    })
}
