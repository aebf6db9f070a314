//! Duskmire engine - resolution services over the domain core
//!
//! The engine owns orchestration and observability: it holds the random
//! source, registers skill profiles, routes outcome tiers to the domain's
//! aggregator factories and logs every transition through `tracing`. All
//! game arithmetic stays in `duskmire-domain`.

pub mod corruption;
pub mod dice_roller;
pub mod error;
pub mod skill_check;
pub mod social;
pub mod stress;

pub use corruption::CorruptionService;
pub use dice_roller::{AdvantageType, DiceRoller};
pub use error::EngineError;
pub use skill_check::{ContestedCheckResult, SkillCheckRunner, SkillProfile};
pub use social::SocialService;
pub use stress::{
    StressService, MILESTONE_RECOVERY, TRAUMA_FAIL_STRESS, TRAUMA_PASS_STRESS,
};
