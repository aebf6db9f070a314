//! Value objects - Immutable objects defined by their attributes

mod corruption;
mod cps;
mod damage;
mod dice;
mod panic;
mod skill_check;
mod social;
mod stress;

// Dice pools and roll classification
pub use dice::{
    DicePool, DicePoolParseError, DiceRollResult, BOTCH_FACE, CRITICAL_NET_SUCCESSES,
    SUCCESS_THRESHOLD,
};

// Skill check outcome classification
pub use skill_check::{Difficulty, SkillCheckResult, SkillOutcome};

// Psychic stress threshold machine
pub use stress::{
    RestType, StressApplicationResult, StressCheckResult, StressRecoveryResult, StressSource,
    StressState, StressThreshold, MAX_STRESS, MIN_STRESS,
};

// Corruption threshold machine
pub use corruption::{
    CorruptionAddResult, CorruptionSource, CorruptionStage, CorruptionState, BLIGHTED_THRESHOLD,
    CONSUMED_THRESHOLD, CORRUPTED_THRESHOLD, INFECTED_THRESHOLD, MAX_CORRUPTION, MIN_CORRUPTION,
    TAINTED_THRESHOLD,
};

// Cognitive Paradox Syndrome stages
pub use cps::{
    CpsStage, CpsStageChangeResult, CpsState, GLIMMER_MADNESS_THRESHOLD, HOLLOW_SHELL_THRESHOLD,
    RUIN_MADNESS_THRESHOLD, WEIGHT_OF_KNOWING_THRESHOLD,
};

// Panic table
pub use panic::{panic_result_for_roll, ForcedAction, PanicEffect, PanicResult};

// Social interaction aggregators
pub use social::{
    ConvictionDepth, DeceptionResult, FumbleConsequence, FumbleType, IntimidationResult,
    PersuasionResult, CHALLENGE_ACCEPTED_INITIATIVE_BONUS, COST_OF_FEAR_FAILURE,
    COST_OF_FEAR_FUMBLE, COST_OF_FEAR_SUCCESS, LIARS_BURDEN_FAILURE, LIARS_BURDEN_FUMBLE,
    LIARS_BURDEN_SUCCESS,
};

// Damage integration
pub use damage::DamageIntegrationResult;
