//! Social interaction services
//!
//! Persuasion, deception and intimidation attempts: each builds the skill
//! check, classifies it, and maps the outcome tier onto the matching
//! aggregator factory. Side-channel costs (Liar's Burden stress, Cost of
//! Fear reputation) travel on the returned records - the character layer
//! routes them into the stress and reputation systems.
//!
//! Fumble consequence timestamps are injected through `now`, never read
//! from a clock here, so replays and tests stay deterministic.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

use duskmire_domain::{
    CharacterId, ConvictionDepth, DeceptionResult, FactionId, FumbleConsequence, FumbleType,
    IntimidationResult, PersuasionResult, SkillOutcome,
};

use crate::dice_roller::{AdvantageType, DiceRoller};
use crate::error::EngineError;
use crate::skill_check::SkillCheckRunner;

/// Disposition deltas per persuasion outcome tier
const DISPOSITION_CRITICAL: i32 = 10;
const DISPOSITION_SUCCESS: i32 = 5;
const DISPOSITION_MARGINAL: i32 = 2;
const DISPOSITION_FAILURE: i32 = -2;
const DISPOSITION_FUMBLE: i32 = -10;

/// Resolves social interaction attempts
#[derive(Debug, Default)]
pub struct SocialService;

impl SocialService {
    pub fn new() -> Self {
        Self
    }

    /// Attempt to persuade a target.
    ///
    /// `trust_shattered` is the caller's lookup of an active Trust
    /// Shattered consequence against this target; when present the attempt
    /// never rolls.
    pub fn attempt_persuasion<R: Rng>(
        &self,
        runner: &SkillCheckRunner,
        roller: &mut DiceRoller<R>,
        character_id: CharacterId,
        target_id: CharacterId,
        request_type: &str,
        difficulty_name: &str,
        other_bonus: i32,
        trust_shattered: bool,
        now: DateTime<Utc>,
    ) -> Result<PersuasionResult, EngineError> {
        if trust_shattered {
            warn!(%target_id, "Persuasion blocked by an active Trust Shattered consequence");
            return Ok(PersuasionResult::blocked(
                target_id,
                request_type,
                "They refuse to hear another word from you.",
            ));
        }

        let check = runner.perform_check(
            roller,
            "persuasion",
            difficulty_name,
            other_bonus,
            AdvantageType::Normal,
        )?;
        info!(outcome = %check.outcome, %target_id, "Persuasion attempt resolved");

        let result = match check.outcome {
            SkillOutcome::CriticalSuccess => PersuasionResult::success(
                target_id,
                request_type,
                check.outcome,
                ConvictionDepth::Deep,
                DISPOSITION_CRITICAL,
                vec![
                    "request_favor".to_string(),
                    "request_information".to_string(),
                    "request_alliance".to_string(),
                ],
                "Your words resonate deeply. They are fully convinced.",
            ),
            SkillOutcome::ExceptionalSuccess | SkillOutcome::FullSuccess => {
                PersuasionResult::success(
                    target_id,
                    request_type,
                    check.outcome,
                    ConvictionDepth::Moderate,
                    DISPOSITION_SUCCESS,
                    vec!["request_favor".to_string()],
                    "Your argument finds purchase. They agree.",
                )
            }
            SkillOutcome::MarginalSuccess => PersuasionResult::success(
                target_id,
                request_type,
                check.outcome,
                ConvictionDepth::Shallow,
                DISPOSITION_MARGINAL,
                Vec::new(),
                "Barely convinced, they agree with reservations.",
            ),
            SkillOutcome::Failure => PersuasionResult::failure(
                target_id,
                request_type,
                check.outcome,
                DISPOSITION_FAILURE,
                "Your words fall flat. They shake their head.",
            ),
            SkillOutcome::CriticalFailure => {
                let consequence = FumbleConsequence::new(
                    character_id,
                    "persuasion",
                    FumbleType::TrustShattered,
                    target_id,
                    now,
                    "The persuasion attempt backfired catastrophically; they will no longer listen.",
                    "complete_quest_for_target",
                );
                warn!(%target_id, "Persuasion fumble - Trust Shattered");
                PersuasionResult::trust_shattered(
                    target_id,
                    request_type,
                    DISPOSITION_FUMBLE,
                    consequence,
                    "Your words come out completely wrong. Their expression hardens.",
                )
            }
        };
        Ok(result)
    }

    /// Attempt to deceive a target: the deceiver's skill contests the
    /// target's. The Liar's Burden stress cost on the returned record must
    /// be routed into the stress system by the caller - every lie costs.
    pub fn attempt_deception<R: Rng>(
        &self,
        runner: &SkillCheckRunner,
        roller: &mut DiceRoller<R>,
        character_id: CharacterId,
        target_id: CharacterId,
        deception_slug: &str,
        insight_slug: &str,
        now: DateTime<Utc>,
    ) -> Result<DeceptionResult, EngineError> {
        let contest = runner.contested_check(roller, deception_slug, insight_slug)?;
        let player_net = contest.active.net_successes;
        let target_net = contest.passive.net_successes;

        if contest.active.is_fumble {
            warn!(%target_id, "Deception fumble - Lie Exposed");
            let consequence = FumbleConsequence::new(
                character_id,
                deception_slug,
                FumbleType::LieExposed,
                target_id,
                now,
                "The lie collapsed in the telling; they know, and they remember.",
                "regain_trust_through_honesty",
            );
            return Ok(DeceptionResult::lie_exposed(
                target_id,
                player_net,
                target_net,
                consequence,
                "Your story unravels mid-sentence. Their eyes narrow.",
            ));
        }

        let outcome = SkillOutcome::classify(player_net, target_net, false);
        info!(
            %target_id,
            player_net,
            target_net,
            outcome = %outcome,
            "Deception contest resolved"
        );

        if contest.active_wins {
            let unlocked = match outcome {
                SkillOutcome::CriticalSuccess => vec![
                    "full_access".to_string(),
                    "additional_info".to_string(),
                    "npc_vouches".to_string(),
                ],
                SkillOutcome::ExceptionalSuccess => {
                    vec!["full_access".to_string(), "additional_info".to_string()]
                }
                _ => vec!["access_granted".to_string()],
            };
            Ok(DeceptionResult::success(
                target_id,
                outcome,
                player_net,
                target_net,
                unlocked,
                "They nod along. The lie holds.",
            ))
        } else {
            Ok(DeceptionResult::failure(
                target_id,
                outcome,
                player_net,
                target_net,
                "They don't buy it, and now they're watching you.",
            ))
        }
    }

    /// Attempt to intimidate a target. The Cost of Fear reputation delta
    /// on the returned record applies on every attempt, success included.
    pub fn attempt_intimidation<R: Rng>(
        &self,
        runner: &SkillCheckRunner,
        roller: &mut DiceRoller<R>,
        character_id: CharacterId,
        target_id: CharacterId,
        faction_id: FactionId,
        difficulty_name: &str,
        other_bonus: i32,
        now: DateTime<Utc>,
    ) -> Result<IntimidationResult, EngineError> {
        let check = runner.perform_check(
            roller,
            "intimidation",
            difficulty_name,
            other_bonus,
            AdvantageType::Normal,
        )?;
        info!(outcome = %check.outcome, %target_id, "Intimidation attempt resolved");

        if check.outcome == SkillOutcome::CriticalFailure {
            warn!(%target_id, "Intimidation fumble - Challenge Accepted");
            let consequence = FumbleConsequence::new(
                character_id,
                "intimidation",
                FumbleType::ChallengeAccepted,
                target_id,
                now,
                "The target refuses to be cowed and answers the threat with steel.",
                "survive_the_fight",
            );
            return Ok(IntimidationResult::challenge_accepted(
                target_id,
                faction_id,
                consequence,
                "They snarl and draw their weapon. You asked for this.",
            ));
        }

        if check.outcome.is_success() {
            let unlocked = match check.outcome {
                SkillOutcome::CriticalSuccess => vec![
                    "demand_compliance".to_string(),
                    "extract_information".to_string(),
                    "force_retreat".to_string(),
                    "spread_fear".to_string(),
                ],
                SkillOutcome::ExceptionalSuccess => vec![
                    "demand_compliance".to_string(),
                    "extract_information".to_string(),
                ],
                SkillOutcome::FullSuccess => vec!["demand_compliance".to_string()],
                _ => Vec::new(),
            };
            Ok(IntimidationResult::success(
                target_id,
                faction_id,
                check.outcome,
                unlocked,
                "They shrink back. Word of this will spread.",
            ))
        } else {
            Ok(IntimidationResult::failure(
                target_id,
                faction_id,
                check.outcome,
                "They stare you down, unimpressed. Word of this will spread too.",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use duskmire_domain::{DicePool, LIARS_BURDEN_FUMBLE};

    use crate::skill_check::SkillProfile;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).single().expect("valid timestamp")
    }

    fn runner() -> SkillCheckRunner {
        let mut r = SkillCheckRunner::new();
        let pool = DicePool::d10(6).expect("valid pool");
        r.register(SkillProfile::new("persuasion", "Persuasion", pool, 1));
        r.register(SkillProfile::new("intimidation", "Intimidation", pool, 1));
        r.register(SkillProfile::new("deception", "Deception", pool, 1));
        r.register(SkillProfile::new("insight", "Insight", pool, 0));
        r
    }

    fn find_seed(predicate: impl Fn(u64) -> bool) -> u64 {
        (0..5000).find(|&seed| predicate(seed)).expect("seed found in range")
    }

    #[test]
    fn test_blocked_persuasion_skips_the_roll() {
        let svc = SocialService::new();
        let runner = runner();
        let mut roller = DiceRoller::seeded(1);
        let result = svc
            .attempt_persuasion(
                &runner,
                &mut roller,
                CharacterId::new(),
                CharacterId::new(),
                "request_favor",
                "standard",
                0,
                true,
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.was_blocked);
        assert!(!result.request_granted);
    }

    #[test]
    fn test_persuasion_fumble_creates_trust_shattered() {
        let svc = SocialService::new();
        let r = runner();
        let seed = find_seed(|s| {
            let mut roller = DiceRoller::seeded(s);
            r.perform_check(&mut roller, "persuasion", "standard", 0, AdvantageType::Normal)
                .map(|c| c.outcome == SkillOutcome::CriticalFailure)
                .unwrap_or(false)
        });

        let result = svc
            .attempt_persuasion(
                &r,
                &mut DiceRoller::seeded(seed),
                CharacterId::new(),
                CharacterId::new(),
                "request_favor",
                "standard",
                0,
                false,
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.is_fumble());
        let consequence = result.fumble_consequence.expect("present");
        assert_eq!(consequence.fumble_type, FumbleType::TrustShattered);
        assert_eq!(consequence.applied_at, fixed_now());
    }

    #[test]
    fn test_persuasion_success_grants_and_unlocks() {
        let svc = SocialService::new();
        let r = runner();
        let seed = find_seed(|s| {
            let mut roller = DiceRoller::seeded(s);
            r.perform_check(&mut roller, "persuasion", "trivial", 0, AdvantageType::Normal)
                .map(|c| c.outcome == SkillOutcome::CriticalSuccess)
                .unwrap_or(false)
        });

        let result = svc
            .attempt_persuasion(
                &r,
                &mut DiceRoller::seeded(seed),
                CharacterId::new(),
                CharacterId::new(),
                "request_alliance",
                "trivial",
                0,
                false,
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.request_granted);
        assert_eq!(result.conviction_depth, ConvictionDepth::Deep);
        assert!(result
            .unlocked_options
            .contains(&"request_alliance".to_string()));
    }

    #[test]
    fn test_deception_always_costs_stress() {
        let svc = SocialService::new();
        let r = runner();
        let result = svc
            .attempt_deception(
                &r,
                &mut DiceRoller::seeded(17),
                CharacterId::new(),
                CharacterId::new(),
                "deception",
                "insight",
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.stress_cost > 0, "every lie costs stress");
    }

    #[test]
    fn test_deception_fumble_exposes_the_lie() {
        let svc = SocialService::new();
        let r = runner();
        let seed = find_seed(|s| {
            let mut roller = DiceRoller::seeded(s);
            r.contested_check(&mut roller, "deception", "insight")
                .map(|c| c.active.is_fumble)
                .unwrap_or(false)
        });

        let result = svc
            .attempt_deception(
                &r,
                &mut DiceRoller::seeded(seed),
                CharacterId::new(),
                CharacterId::new(),
                "deception",
                "insight",
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.is_fumble());
        assert!(!result.believed);
        assert_eq!(result.stress_cost, LIARS_BURDEN_FUMBLE);
    }

    #[test]
    fn test_intimidation_reputation_cost_is_mandatory() {
        let svc = SocialService::new();
        let r = runner();
        // Whatever the outcome, reputation takes a hit
        for seed in [2, 9, 23, 41] {
            let result = svc
                .attempt_intimidation(
                    &r,
                    &mut DiceRoller::seeded(seed),
                    CharacterId::new(),
                    CharacterId::new(),
                    FactionId::new(),
                    "standard",
                    0,
                    fixed_now(),
                )
                .expect("resolves");
            assert!(result.reputation_cost < 0, "seed {}", seed);
        }
    }

    #[test]
    fn test_intimidation_fumble_starts_combat() {
        let svc = SocialService::new();
        let r = runner();
        let seed = find_seed(|s| {
            let mut roller = DiceRoller::seeded(s);
            r.perform_check(&mut roller, "intimidation", "standard", 0, AdvantageType::Normal)
                .map(|c| c.outcome == SkillOutcome::CriticalFailure)
                .unwrap_or(false)
        });

        let result = svc
            .attempt_intimidation(
                &r,
                &mut DiceRoller::seeded(seed),
                CharacterId::new(),
                CharacterId::new(),
                FactionId::new(),
                "standard",
                0,
                fixed_now(),
            )
            .expect("resolves");
        assert!(result.combat_initiated);
        assert!(result.target_initiative_bonus > 0);
        assert_eq!(
            result.fumble_consequence.expect("present").fumble_type,
            FumbleType::ChallengeAccepted
        );
    }
}
