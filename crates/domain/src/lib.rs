//! Duskmire domain core - dice resolution and threshold state machines
//!
//! Everything here is synchronous, allocation-light, and free of I/O. The
//! only external dependency is the random source for dice rolls, which
//! callers supply explicitly, so every check is deterministic given a seed.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{CorruptionTracker, THRESHOLD_25, THRESHOLD_50, THRESHOLD_75};

pub use error::DomainError;

pub use ids::{CharacterId, ConsequenceId, FactionId, SkillId};

pub use value_objects::{
    panic_result_for_roll, ConvictionDepth, CorruptionAddResult, CorruptionSource,
    CorruptionStage, CorruptionState, CpsStage, CpsStageChangeResult, CpsState,
    DamageIntegrationResult, DeceptionResult, DicePool, DicePoolParseError, DiceRollResult,
    Difficulty, ForcedAction, FumbleConsequence, FumbleType, IntimidationResult, PanicEffect,
    PanicResult, PersuasionResult, RestType, SkillCheckResult, SkillOutcome,
    StressApplicationResult, StressCheckResult, StressRecoveryResult, StressSource, StressState,
    StressThreshold, BOTCH_FACE, CHALLENGE_ACCEPTED_INITIATIVE_BONUS, COST_OF_FEAR_FAILURE,
    COST_OF_FEAR_FUMBLE, COST_OF_FEAR_SUCCESS, CRITICAL_NET_SUCCESSES, LIARS_BURDEN_FAILURE,
    LIARS_BURDEN_FUMBLE, LIARS_BURDEN_SUCCESS, MAX_CORRUPTION, MAX_STRESS, MIN_CORRUPTION,
    MIN_STRESS, SUCCESS_THRESHOLD,
};
