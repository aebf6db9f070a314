//! Skill check runner
//!
//! Holds the registry of skill profiles and turns "roll Lore against
//! Standard" requests into fully classified [`SkillCheckResult`]s. The
//! runner owns no dice: every call borrows a [`DiceRoller`], so the one
//! RNG stream stays with the session that seeded it.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, info};

use duskmire_domain::{DicePool, Difficulty, SkillCheckResult, SkillId};

use crate::dice_roller::{AdvantageType, DiceRoller};
use crate::error::EngineError;

/// A registered skill: its pool and flat attribute bonus
#[derive(Debug, Clone)]
pub struct SkillProfile {
    pub id: SkillId,
    /// Content slug used to request checks (e.g. "lore")
    pub slug: String,
    /// Display name (e.g. "Lore")
    pub name: String,
    /// The dice pool this skill rolls
    pub pool: DicePool,
    /// Bonus successes from the governing attribute
    pub attribute_bonus: i32,
}

impl SkillProfile {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        pool: DicePool,
        attribute_bonus: i32,
    ) -> Self {
        Self {
            id: SkillId::new(),
            slug: slug.into(),
            name: name.into(),
            pool,
            attribute_bonus,
        }
    }
}

/// Outcome of a contested check between two skills
#[derive(Debug, Clone)]
pub struct ContestedCheckResult {
    pub active: SkillCheckResult,
    pub passive: SkillCheckResult,
    /// True when the active side wins; ties go to the active side
    pub active_wins: bool,
}

/// Resolves skill checks against registered profiles
#[derive(Debug, Default)]
pub struct SkillCheckRunner {
    skills: HashMap<String, SkillProfile>,
}

impl SkillCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill profile, replacing any previous one for the slug
    pub fn register(&mut self, profile: SkillProfile) {
        debug!(skill = %profile.slug, pool = %profile.pool, "Registered skill profile");
        self.skills.insert(profile.slug.clone(), profile);
    }

    /// Look up a registered profile
    pub fn profile(&self, slug: &str) -> Option<&SkillProfile> {
        self.skills.get(slug)
    }

    /// Perform a check against a named difficulty from the ladder
    pub fn perform_check<R: Rng>(
        &self,
        roller: &mut DiceRoller<R>,
        skill_slug: &str,
        difficulty_name: &str,
        other_bonus: i32,
        advantage: AdvantageType,
    ) -> Result<SkillCheckResult, EngineError> {
        let difficulty = Difficulty::by_name(difficulty_name)
            .ok_or_else(|| EngineError::UnknownDifficulty(difficulty_name.to_string()))?;
        self.perform_check_with_dc(
            roller,
            skill_slug,
            difficulty.dc(),
            difficulty.display_name(),
            other_bonus,
            advantage,
        )
    }

    /// Perform a check against an explicit difficulty class
    pub fn perform_check_with_dc<R: Rng>(
        &self,
        roller: &mut DiceRoller<R>,
        skill_slug: &str,
        difficulty_class: i32,
        difficulty_name: &str,
        other_bonus: i32,
        advantage: AdvantageType,
    ) -> Result<SkillCheckResult, EngineError> {
        let profile = self
            .skills
            .get(skill_slug)
            .ok_or_else(|| EngineError::UnknownSkill(skill_slug.to_string()))?;

        let dice_result = roller.roll_with_advantage(profile.pool, advantage);
        let result = SkillCheckResult::new(
            profile.slug.clone(),
            profile.name.clone(),
            dice_result,
            profile.attribute_bonus,
            other_bonus,
            difficulty_class,
            difficulty_name,
        )?;

        info!(
            skill = %result.skill_name,
            outcome = %result.outcome,
            net = result.net_successes,
            dc = result.difficulty_class,
            "Skill check resolved"
        );
        Ok(result)
    }

    /// Resolve a contested check: both sides roll, net successes compare,
    /// the active side wins ties (the acting character keeps initiative).
    pub fn contested_check<R: Rng>(
        &self,
        roller: &mut DiceRoller<R>,
        active_slug: &str,
        passive_slug: &str,
    ) -> Result<ContestedCheckResult, EngineError> {
        // DC 0 so each side's record classifies on raw net successes;
        // the contest itself is decided by the comparison below.
        let active = self.perform_check_with_dc(
            roller,
            active_slug,
            0,
            "Contested",
            0,
            AdvantageType::Normal,
        )?;
        let passive = self.perform_check_with_dc(
            roller,
            passive_slug,
            0,
            "Contested",
            0,
            AdvantageType::Normal,
        )?;

        let active_wins = active.net_successes >= passive.net_successes;
        info!(
            active = %active.skill_name,
            passive = %passive.skill_name,
            active_net = active.net_successes,
            passive_net = passive.net_successes,
            active_wins,
            "Contested check resolved"
        );

        Ok(ContestedCheckResult {
            active,
            passive,
            active_wins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskmire_domain::SkillOutcome;

    fn runner() -> SkillCheckRunner {
        let mut r = SkillCheckRunner::new();
        let pool = DicePool::d10(6).expect("valid pool");
        r.register(SkillProfile::new("lore", "Lore", pool, 1));
        r.register(SkillProfile::new("deception", "Deception", pool, 0));
        r
    }

    #[test]
    fn test_unknown_skill_is_an_error() {
        let runner = runner();
        let mut roller = DiceRoller::seeded(1);
        let err = runner
            .perform_check(&mut roller, "basket_weaving", "standard", 0, AdvantageType::Normal)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownSkill(_)));
    }

    #[test]
    fn test_unknown_difficulty_is_an_error() {
        let runner = runner();
        let mut roller = DiceRoller::seeded(1);
        let err = runner
            .perform_check(&mut roller, "lore", "impossible", 0, AdvantageType::Normal)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownDifficulty(_)));
    }

    #[test]
    fn test_check_applies_bonuses() {
        let runner = runner();
        let mut roller = DiceRoller::seeded(5);
        let result = runner
            .perform_check(&mut roller, "lore", "standard", 2, AdvantageType::Normal)
            .expect("resolves");
        assert_eq!(
            result.net_successes,
            result.dice_result.net_successes + 1 + 2
        );
        assert_eq!(result.difficulty_class, 3);
        assert_eq!(result.difficulty_name, "Standard");
    }

    #[test]
    fn test_check_is_deterministic_for_seed() {
        let runner = runner();
        let a = runner
            .perform_check(&mut DiceRoller::seeded(11), "lore", "hard", 0, AdvantageType::Normal)
            .expect("resolves");
        let b = runner
            .perform_check(&mut DiceRoller::seeded(11), "lore", "hard", 0, AdvantageType::Normal)
            .expect("resolves");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fumble_overrides_bonuses() {
        // Hunt for a seed whose roll fumbles, then confirm that even large
        // bonuses cannot rescue the outcome
        let mut r = SkillCheckRunner::new();
        r.register(SkillProfile::new(
            "doom",
            "Doom",
            DicePool::d10(2).expect("valid pool"),
            0,
        ));
        let fumble_seed = (0..2000).find(|&seed| {
            let mut roller = DiceRoller::seeded(seed);
            let roll = roller.roll(DicePool::d10(2).expect("valid pool"));
            roll.is_fumble
        });
        let seed = fumble_seed.expect("some seed in range fumbles a 2d10 pool");

        let result = r
            .perform_check_with_dc(
                &mut DiceRoller::seeded(seed),
                "doom",
                1,
                "Trivial",
                10,
                AdvantageType::Normal,
            )
            .expect("resolves");
        assert!(result.is_fumble);
        assert_eq!(result.outcome, SkillOutcome::CriticalFailure);
    }

    #[test]
    fn test_contested_active_wins_ties() {
        let runner = runner();
        // Scan for a seed where both sides land equal net successes
        for seed in 0..2000 {
            let result = runner
                .contested_check(&mut DiceRoller::seeded(seed), "lore", "deception")
                .expect("resolves");
            if result.active.net_successes == result.passive.net_successes {
                assert!(result.active_wins, "ties must go to the active side");
                return;
            }
        }
        panic!("no tie found in seed range");
    }
}
