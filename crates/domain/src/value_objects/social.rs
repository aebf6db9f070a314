//! Social interaction result aggregators
//!
//! Persuasion, deception, and intimidation all resolve through the same
//! dice machinery but carry different fixed consequences per outcome tier.
//! Each aggregator is an immutable record built through a named factory
//! per tier; the factory hard-codes that tier's consequences so a stored
//! result can never claim a combination the rules do not produce.
//!
//! Timestamps on fumble consequences are injected by the caller - the
//! domain never reads a clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{CharacterId, ConsequenceId, FactionId};
use crate::value_objects::skill_check::SkillOutcome;

/// Psychic stress cost of a sustained lie (Liar's Burden) on a success
pub const LIARS_BURDEN_SUCCESS: i32 = 2;

/// Psychic stress cost when the lie fails
pub const LIARS_BURDEN_FAILURE: i32 = 4;

/// Psychic stress cost when the lie is exposed by a fumble
pub const LIARS_BURDEN_FUMBLE: i32 = 6;

/// Reputation cost of a successful intimidation (Cost of Fear)
pub const COST_OF_FEAR_SUCCESS: i32 = -1;

/// Reputation cost of a failed intimidation
pub const COST_OF_FEAR_FAILURE: i32 = -2;

/// Reputation cost when the target accepts the challenge
pub const COST_OF_FEAR_FUMBLE: i32 = -5;

/// Initiative bonus granted to a target that answers intimidation with
/// violence
pub const CHALLENGE_ACCEPTED_INITIATIVE_BONUS: i32 = 2;

/// Lingering fumble consequence categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FumbleType {
    /// Persuasion fumble: the target no longer listens
    TrustShattered,
    /// Deception fumble: the lie is out
    LieExposed,
    /// Intimidation fumble: the target turns hostile
    ChallengeAccepted,
}

impl fmt::Display for FumbleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FumbleType::TrustShattered => "Trust Shattered",
            FumbleType::LieExposed => "Lie Exposed",
            FumbleType::ChallengeAccepted => "Challenge Accepted",
        };
        write!(f, "{}", name)
    }
}

/// How deeply a persuaded target believes the argument
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ConvictionDepth {
    /// Not convinced at all
    #[default]
    None,
    /// Agrees with reservations; may renege under pressure
    Shallow,
    /// Genuinely agrees
    Moderate,
    /// Fully convinced; will act on the belief
    Deep,
}

impl fmt::Display for ConvictionDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConvictionDepth::None => "None",
            ConvictionDepth::Shallow => "Shallow",
            ConvictionDepth::Moderate => "Moderate",
            ConvictionDepth::Deep => "Deep",
        };
        write!(f, "{}", name)
    }
}

/// A persistent consequence created by a social fumble
///
/// Lives until its recovery condition is met (or it expires, for the rare
/// timed ones). `applied_at` comes from the caller so replays and tests
/// stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FumbleConsequence {
    pub id: ConsequenceId,
    /// The character who fumbled
    pub character_id: CharacterId,
    /// The skill that fumbled (e.g. "persuasion")
    pub skill_id: String,
    pub fumble_type: FumbleType,
    /// The NPC the consequence attaches to
    pub target_id: CharacterId,
    pub applied_at: DateTime<Utc>,
    /// Most consequences never expire on their own
    pub expires_at: Option<DateTime<Utc>>,
    pub description: String,
    /// What the character must do to clear the consequence
    pub recovery_condition: String,
}

impl FumbleConsequence {
    pub fn new(
        character_id: CharacterId,
        skill_id: impl Into<String>,
        fumble_type: FumbleType,
        target_id: CharacterId,
        applied_at: DateTime<Utc>,
        description: impl Into<String>,
        recovery_condition: impl Into<String>,
    ) -> Self {
        Self {
            id: ConsequenceId::new(),
            character_id,
            skill_id: skill_id.into(),
            fumble_type,
            target_id,
            applied_at,
            expires_at: None,
            description: description.into(),
            recovery_condition: recovery_condition.into(),
        }
    }

    /// Whether the consequence has lapsed at the given time
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| now >= expiry)
    }
}

/// Result of one persuasion attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersuasionResult {
    pub target_id: CharacterId,
    /// What was asked for (e.g. "request_favor")
    pub request_type: String,
    pub outcome: SkillOutcome,
    pub request_granted: bool,
    pub conviction_depth: ConvictionDepth,
    /// Disposition delta toward the persuader
    pub disposition_change: i32,
    /// Dialogue options this result unlocks
    pub unlocked_options: Vec<String>,
    /// Dialogue options this result locks out
    pub blocked_options: Vec<String>,
    /// Present only on a fumble
    pub fumble_consequence: Option<FumbleConsequence>,
    /// True when the attempt never rolled because trust is shattered
    pub was_blocked: bool,
    pub narrative: String,
}

impl PersuasionResult {
    /// The target agrees. Conviction depth and disposition scale with the
    /// outcome tier.
    pub fn success(
        target_id: CharacterId,
        request_type: impl Into<String>,
        outcome: SkillOutcome,
        conviction_depth: ConvictionDepth,
        disposition_change: i32,
        unlocked_options: Vec<String>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            request_type: request_type.into(),
            outcome,
            request_granted: true,
            conviction_depth,
            disposition_change,
            unlocked_options,
            blocked_options: Vec::new(),
            fumble_consequence: None,
            was_blocked: false,
            narrative: narrative.into(),
        }
    }

    /// The target declines; the current argument is spent
    pub fn failure(
        target_id: CharacterId,
        request_type: impl Into<String>,
        outcome: SkillOutcome,
        disposition_change: i32,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            request_type: request_type.into(),
            outcome,
            request_granted: false,
            conviction_depth: ConvictionDepth::None,
            disposition_change,
            unlocked_options: Vec::new(),
            blocked_options: vec!["current_argument".to_string()],
            fumble_consequence: None,
            was_blocked: false,
            narrative: narrative.into(),
        }
    }

    /// Fumble: the target stops listening entirely until trust is rebuilt
    pub fn trust_shattered(
        target_id: CharacterId,
        request_type: impl Into<String>,
        disposition_change: i32,
        consequence: FumbleConsequence,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            request_type: request_type.into(),
            outcome: SkillOutcome::CriticalFailure,
            request_granted: false,
            conviction_depth: ConvictionDepth::None,
            disposition_change,
            unlocked_options: Vec::new(),
            blocked_options: vec!["persuasion".to_string()],
            fumble_consequence: Some(consequence),
            was_blocked: false,
            narrative: narrative.into(),
        }
    }

    /// The attempt never rolled: an active Trust Shattered consequence
    /// blocks persuasion against this target
    pub fn blocked(
        target_id: CharacterId,
        request_type: impl Into<String>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            request_type: request_type.into(),
            outcome: SkillOutcome::Failure,
            request_granted: false,
            conviction_depth: ConvictionDepth::None,
            disposition_change: 0,
            unlocked_options: Vec::new(),
            blocked_options: vec!["persuasion".to_string()],
            fumble_consequence: None,
            was_blocked: true,
            narrative: narrative.into(),
        }
    }

    pub fn is_fumble(&self) -> bool {
        self.fumble_consequence.is_some()
    }
}

/// Result of one contested deception attempt
///
/// Every lie costs stress (Liar's Burden), win or lose; only the amount
/// varies by tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeceptionResult {
    pub target_id: CharacterId,
    pub outcome: SkillOutcome,
    pub believed: bool,
    /// Deceiver's net successes in the contested roll
    pub player_successes: i32,
    /// Target's net successes in the contested roll
    pub target_successes: i32,
    /// Liar's Burden psychic stress cost (always positive)
    pub stress_cost: i32,
    pub unlocked_options: Vec<String>,
    /// The target did not buy it and is now watching
    pub suspicion_raised: bool,
    /// Present only on a fumble
    pub fumble_consequence: Option<FumbleConsequence>,
    pub narrative: String,
}

impl DeceptionResult {
    /// Liar's Burden stress for an outcome tier
    pub fn liars_burden(outcome: SkillOutcome, is_fumble: bool) -> i32 {
        if is_fumble {
            LIARS_BURDEN_FUMBLE
        } else if outcome.is_success() {
            LIARS_BURDEN_SUCCESS
        } else {
            LIARS_BURDEN_FAILURE
        }
    }

    /// The lie lands
    pub fn success(
        target_id: CharacterId,
        outcome: SkillOutcome,
        player_successes: i32,
        target_successes: i32,
        unlocked_options: Vec<String>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            outcome,
            believed: true,
            player_successes,
            target_successes,
            stress_cost: Self::liars_burden(outcome, false),
            unlocked_options,
            suspicion_raised: false,
            fumble_consequence: None,
            narrative: narrative.into(),
        }
    }

    /// The target does not believe the lie
    pub fn failure(
        target_id: CharacterId,
        outcome: SkillOutcome,
        player_successes: i32,
        target_successes: i32,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            outcome,
            believed: false,
            player_successes,
            target_successes,
            stress_cost: Self::liars_burden(outcome, false),
            unlocked_options: Vec::new(),
            suspicion_raised: true,
            fumble_consequence: None,
            narrative: narrative.into(),
        }
    }

    /// Fumble: the lie is exposed outright
    pub fn lie_exposed(
        target_id: CharacterId,
        player_successes: i32,
        target_successes: i32,
        consequence: FumbleConsequence,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            outcome: SkillOutcome::CriticalFailure,
            believed: false,
            player_successes,
            target_successes,
            stress_cost: Self::liars_burden(SkillOutcome::CriticalFailure, true),
            unlocked_options: Vec::new(),
            suspicion_raised: true,
            fumble_consequence: Some(consequence),
            narrative: narrative.into(),
        }
    }

    pub fn is_fumble(&self) -> bool {
        self.fumble_consequence.is_some()
    }
}

/// Result of one intimidation attempt
///
/// The Cost of Fear reputation delta applies on every attempt, including
/// successes - fear is never free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntimidationResult {
    pub target_id: CharacterId,
    /// Faction whose reputation absorbs the Cost of Fear
    pub faction_id: FactionId,
    pub outcome: SkillOutcome,
    pub target_cowed: bool,
    /// Cost of Fear reputation delta (always negative or zero)
    pub reputation_cost: i32,
    pub unlocked_options: Vec<String>,
    /// The target answers with violence
    pub combat_initiated: bool,
    /// Initiative bonus the target gets when combat starts this way
    pub target_initiative_bonus: i32,
    /// Present only on a fumble
    pub fumble_consequence: Option<FumbleConsequence>,
    pub narrative: String,
}

impl IntimidationResult {
    /// Cost of Fear reputation delta for an outcome tier
    pub fn cost_of_fear(outcome: SkillOutcome, is_fumble: bool) -> i32 {
        if is_fumble {
            COST_OF_FEAR_FUMBLE
        } else if outcome.is_success() {
            COST_OF_FEAR_SUCCESS
        } else {
            COST_OF_FEAR_FAILURE
        }
    }

    /// The target backs down
    pub fn success(
        target_id: CharacterId,
        faction_id: FactionId,
        outcome: SkillOutcome,
        unlocked_options: Vec<String>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            faction_id,
            outcome,
            target_cowed: true,
            reputation_cost: Self::cost_of_fear(outcome, false),
            unlocked_options,
            combat_initiated: false,
            target_initiative_bonus: 0,
            fumble_consequence: None,
            narrative: narrative.into(),
        }
    }

    /// The target is unimpressed
    pub fn failure(
        target_id: CharacterId,
        faction_id: FactionId,
        outcome: SkillOutcome,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            faction_id,
            outcome,
            target_cowed: false,
            reputation_cost: Self::cost_of_fear(outcome, false),
            unlocked_options: Vec::new(),
            combat_initiated: false,
            target_initiative_bonus: 0,
            fumble_consequence: None,
            narrative: narrative.into(),
        }
    }

    /// Fumble: the target refuses to be cowed and attacks with a Furious
    /// edge
    pub fn challenge_accepted(
        target_id: CharacterId,
        faction_id: FactionId,
        consequence: FumbleConsequence,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            faction_id,
            outcome: SkillOutcome::CriticalFailure,
            target_cowed: false,
            reputation_cost: Self::cost_of_fear(SkillOutcome::CriticalFailure, true),
            unlocked_options: Vec::new(),
            combat_initiated: true,
            target_initiative_bonus: CHALLENGE_ACCEPTED_INITIATIVE_BONUS,
            fumble_consequence: Some(consequence),
            narrative: narrative.into(),
        }
    }

    pub fn is_fumble(&self) -> bool {
        self.fumble_consequence.is_some()
    }
}
