//! Damage integration record
//!
//! One damaging event can ripple through several threshold machines at
//! once: hit points, psychic stress, corruption, CPS stage, and possibly
//! the panic table. This record composes whatever actually happened into a
//! single immutable result the combat layer can act on in one pass.

use serde::{Deserialize, Serialize};

use crate::value_objects::corruption::CorruptionAddResult;
use crate::value_objects::cps::CpsStageChangeResult;
use crate::value_objects::panic::PanicResult;
use crate::value_objects::stress::StressApplicationResult;

/// Everything a single damaging event did to a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DamageIntegrationResult {
    /// Hit point damage dealt
    pub damage_dealt: i32,
    /// Stress applied alongside the damage, if any
    pub stress_application: Option<StressApplicationResult>,
    /// Corruption gained alongside the damage, if any
    pub corruption_add: Option<CorruptionAddResult>,
    /// CPS stage movement caused by the stress, if any
    pub cps_stage_change: Option<CpsStageChangeResult>,
    /// Panic table roll forced by the event, if any
    pub panic_result: Option<PanicResult>,
    /// Stress hit 100 and a trauma check is now owed
    pub trauma_check_triggered: bool,
}

impl DamageIntegrationResult {
    /// A plain hit with no psychological riders
    pub fn physical_only(damage_dealt: i32) -> Self {
        Self {
            damage_dealt,
            ..Self::default()
        }
    }

    /// Attach a stress application, deriving the CPS stage movement and
    /// the trauma flag from it
    pub fn with_stress(mut self, stress: StressApplicationResult) -> Self {
        self.trauma_check_triggered = stress.trauma_check_triggered;
        self.cps_stage_change = Some(CpsStageChangeResult::from_stress_change(
            stress.previous_stress,
            stress.new_stress,
        ));
        self.stress_application = Some(stress);
        self
    }

    /// Attach a corruption gain
    pub fn with_corruption(mut self, corruption: CorruptionAddResult) -> Self {
        self.corruption_add = Some(corruption);
        self
    }

    /// Attach a panic table roll
    pub fn with_panic(mut self, panic: PanicResult) -> Self {
        self.panic_result = Some(panic);
        self
    }

    /// Whether the event touched anything beyond hit points
    pub fn has_psychological_effects(&self) -> bool {
        self.stress_application.is_some()
            || self.corruption_add.is_some()
            || self.panic_result.is_some()
            || self.trauma_check_triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::corruption::CorruptionSource;
    use crate::value_objects::cps::CpsStage;
    use crate::value_objects::stress::{StressApplicationResult, StressSource};

    #[test]
    fn test_physical_only() {
        let result = DamageIntegrationResult::physical_only(7);
        assert_eq!(result.damage_dealt, 7);
        assert!(!result.has_psychological_effects());
        assert!(result.cps_stage_change.is_none());
    }

    #[test]
    fn test_stress_rider_derives_cps_change() {
        let stress = StressApplicationResult::create(55, 65, StressSource::Combat, None);
        let result = DamageIntegrationResult::physical_only(4).with_stress(stress);

        assert!(result.has_psychological_effects());
        let cps = result.cps_stage_change.expect("derived");
        assert!(cps.stage_changed);
        assert_eq!(cps.new_stage, CpsStage::RuinMadness);
        assert!(!result.trauma_check_triggered);
    }

    #[test]
    fn test_trauma_flag_propagates() {
        let stress = StressApplicationResult::create(90, 100, StressSource::Heretical, None);
        let result = DamageIntegrationResult::physical_only(2).with_stress(stress);
        assert!(result.trauma_check_triggered);
    }

    #[test]
    fn test_corruption_rider() {
        let corruption = crate::value_objects::corruption::CorruptionAddResult::create(
            10,
            25,
            CorruptionSource::Environmental,
            Some(25),
        );
        let result = DamageIntegrationResult::physical_only(3).with_corruption(corruption);
        assert!(result.has_psychological_effects());
        assert_eq!(result.corruption_add.expect("set").threshold_crossed, Some(25));
    }
}
