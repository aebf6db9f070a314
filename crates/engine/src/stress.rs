//! Stress service
//!
//! Stateless transforms over [`StressState`]: every call takes the current
//! state and returns the replacement state plus a transition descriptor.
//! Callers must store the returned state and apply events one at a time,
//! in order - batching deltas can mask an intermediate threshold crossing.

use rand::Rng;
use tracing::{debug, info, warn};

use duskmire_domain::{
    panic_result_for_roll, CpsState, DicePool, PanicResult, RestType, StressApplicationResult,
    StressCheckResult, StressRecoveryResult, StressSource, StressState,
};

use crate::dice_roller::DiceRoller;
use crate::error::EngineError;

/// Stress value a character drops to after passing a trauma check
pub const TRAUMA_PASS_STRESS: i32 = 75;

/// Stress value a character drops to after failing a trauma check (the
/// failure also inflicts a permanent trauma, handled by the character layer)
pub const TRAUMA_FAIL_STRESS: i32 = 50;

/// Flat stress recovered at a story milestone
pub const MILESTONE_RECOVERY: i32 = 25;

/// Stateless stress transforms
#[derive(Debug, Default)]
pub struct StressService;

impl StressService {
    pub fn new() -> Self {
        Self
    }

    /// Apply incoming stress, optionally resisted by a WILL roll.
    ///
    /// With `will_dice` present, the character rolls that many d10 and net
    /// successes feed the reduction ladder (0/50/75/100%). The descriptor
    /// carries the resistance roll so the presentation layer can narrate it.
    pub fn apply_stress<R: Rng>(
        &self,
        roller: &mut DiceRoller<R>,
        state: StressState,
        amount: i32,
        source: StressSource,
        will_dice: Option<u32>,
    ) -> Result<(StressState, StressApplicationResult), EngineError> {
        if amount < 0 {
            return Err(duskmire_domain::DomainError::validation(
                "Stress amount to apply cannot be negative",
            )
            .into());
        }

        let resistance = match will_dice {
            Some(dice) if dice > 0 => {
                let pool = DicePool::d10(dice).map_err(duskmire_domain::DomainError::from)?;
                let roll = roller.roll(pool);
                let check = StressCheckResult::create(roll.net_successes, amount);
                debug!(
                    roll = %roll.breakdown(),
                    reduction = check.reduction_percent,
                    "WILL resistance roll"
                );
                Some(check)
            }
            _ => None,
        };

        let applied = resistance.map_or(amount, |check| check.final_stress);
        let new_state = state.with_stress_added(applied)?;
        let result = StressApplicationResult::create(
            state.current_stress(),
            new_state.current_stress(),
            source,
            resistance,
        );

        if result.trauma_check_triggered {
            warn!(source = %source, "Stress hit maximum - trauma check owed");
        } else if result.threshold_crossed {
            info!(
                from = %result.previous_threshold,
                to = %result.new_threshold,
                source = %source,
                "Stress threshold crossed"
            );
        }
        Ok((new_state, result))
    }

    /// Recover stress through rest. Short and Long rests scale with WILL;
    /// Sanctuary resets to zero; Milestone recovers a flat amount.
    pub fn recover_stress(
        &self,
        state: StressState,
        rest_type: RestType,
        will: i32,
    ) -> Result<(StressState, StressRecoveryResult), EngineError> {
        if will < 0 {
            return Err(
                duskmire_domain::DomainError::validation("WILL cannot be negative").into(),
            );
        }

        let new_state = match rest_type {
            RestType::Short => state.with_stress_reduced(2 * will)?,
            RestType::Long => state.with_stress_reduced(5 * will)?,
            RestType::Sanctuary => StressState::calm(),
            RestType::Milestone => state.with_stress_reduced(MILESTONE_RECOVERY)?,
        };

        let result = StressRecoveryResult::create(
            state.current_stress(),
            new_state.current_stress(),
            rest_type,
        );
        info!(
            rest = ?rest_type,
            recovered = result.amount_recovered,
            "Stress recovery applied"
        );
        Ok((new_state, result))
    }

    /// Resolve a pending trauma check. Passing steadies the character at
    /// 75 stress; failing drops to 50 but costs a permanent trauma (the
    /// character layer records it).
    pub fn resolve_trauma_check(
        &self,
        state: StressState,
        passed: bool,
    ) -> Result<(StressState, StressRecoveryResult), EngineError> {
        if !state.requires_trauma_check() {
            return Err(duskmire_domain::DomainError::validation(
                "No trauma check is pending: stress is below maximum",
            )
            .into());
        }

        let target = if passed {
            TRAUMA_PASS_STRESS
        } else {
            TRAUMA_FAIL_STRESS
        };
        let new_state = state.with_stress(target);
        let result = StressRecoveryResult::create(
            state.current_stress(),
            new_state.current_stress(),
            RestType::Short,
        );
        info!(passed, new_stress = target, "Trauma check resolved");
        Ok((new_state, result))
    }

    /// Roll the panic table if the character's CPS stage demands it.
    /// Returns `None` when no panic check is due.
    pub fn check_panic<R: Rng>(
        &self,
        roller: &mut DiceRoller<R>,
        cps: CpsState,
    ) -> Result<Option<PanicResult>, EngineError> {
        if !cps.requires_panic_check() {
            return Ok(None);
        }

        let face = roller.roll_d10();
        let result = panic_result_for_roll(face)?;
        if result.is_lucky_break() {
            info!(face, "Panic table: lucky break");
        } else {
            warn!(face, effect = %result.effect_name, "Panic table effect triggered");
        }
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskmire_domain::StressThreshold;

    fn service() -> StressService {
        StressService::new()
    }

    #[test]
    fn test_unresisted_stress_lands_in_full() {
        let mut roller = DiceRoller::seeded(1);
        let (state, result) = service()
            .apply_stress(&mut roller, StressState::create(10), 25, StressSource::Combat, None)
            .expect("applies");
        assert_eq!(state.current_stress(), 35);
        assert_eq!(result.stress_gained, 25);
        assert!(result.resistance.is_none());
        assert!(result.threshold_crossed);
    }

    #[test]
    fn test_resisted_stress_uses_the_ladder() {
        let mut roller = DiceRoller::seeded(4);
        let (state, result) = service()
            .apply_stress(
                &mut roller,
                StressState::calm(),
                20,
                StressSource::Heretical,
                Some(5),
            )
            .expect("applies");
        let check = result.resistance.expect("resisted");
        assert_eq!(check.base_stress, 20);
        assert_eq!(
            state.current_stress(),
            check.final_stress,
            "only the post-reduction amount lands"
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut roller = DiceRoller::seeded(1);
        let err = service()
            .apply_stress(&mut roller, StressState::calm(), -5, StressSource::Combat, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }

    #[test]
    fn test_recovery_formulas() {
        let svc = service();
        let start = StressState::create(80);

        let (short, _) = svc.recover_stress(start, RestType::Short, 3).expect("recovers");
        assert_eq!(short.current_stress(), 74);

        let (long, _) = svc.recover_stress(start, RestType::Long, 3).expect("recovers");
        assert_eq!(long.current_stress(), 65);

        let (sanctuary, result) = svc
            .recover_stress(start, RestType::Sanctuary, 0)
            .expect("recovers");
        assert_eq!(sanctuary.current_stress(), 0);
        assert_eq!(result.amount_recovered, 80);

        let (milestone, _) = svc
            .recover_stress(start, RestType::Milestone, 0)
            .expect("recovers");
        assert_eq!(milestone.current_stress(), 55);
    }

    #[test]
    fn test_trauma_check_requires_max_stress() {
        let err = service()
            .resolve_trauma_check(StressState::create(99), true)
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }

    #[test]
    fn test_trauma_check_outcomes() {
        let svc = service();
        let maxed = StressState::create(100);

        let (passed, _) = svc.resolve_trauma_check(maxed, true).expect("resolves");
        assert_eq!(passed.current_stress(), TRAUMA_PASS_STRESS);
        assert_eq!(passed.threshold(), StressThreshold::Panicked);

        let (failed, result) = svc.resolve_trauma_check(maxed, false).expect("resolves");
        assert_eq!(failed.current_stress(), TRAUMA_FAIL_STRESS);
        assert!(result.threshold_dropped);
    }

    #[test]
    fn test_panic_check_gated_on_cps_stage() {
        let svc = service();
        let mut roller = DiceRoller::seeded(8);

        let calm = svc
            .check_panic(&mut roller, CpsState::create(40))
            .expect("no roll needed");
        assert!(calm.is_none(), "Glimmer-Madness does not panic");

        let panicking = svc
            .check_panic(&mut roller, CpsState::create(65))
            .expect("rolls");
        let result = panicking.expect("Ruin-Madness panics");
        assert!((1..=10).contains(&result.roll));

        let hollow = svc
            .check_panic(&mut roller, CpsState::create(90))
            .expect("no roll needed");
        assert!(hollow.is_none(), "Hollow Shell is beyond panicking");
    }
}
