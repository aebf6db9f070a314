//! Corruption tracker entity
//!
//! The one stateful piece of the corruption system: it owns a character's
//! corruption value plus the lifetime memory of which one-time narrative
//! thresholds (25/50/75) have already fired. The value objects detect a
//! crossing for a single before/after pair; the tracker suppresses repeats
//! across the character's whole life, even if corruption later drops back
//! below a threshold.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{
    CorruptionAddResult, CorruptionSource, CorruptionStage, CorruptionState, MAX_CORRUPTION,
};

/// One-time threshold: first taste of the Blight (UI warning)
pub const THRESHOLD_25: i32 = 25;

/// One-time threshold: faction reputation lock begins
pub const THRESHOLD_50: i32 = 50;

/// One-time threshold: Machine Affinity trauma acquired
pub const THRESHOLD_75: i32 = 75;

/// Tracks a character's corruption and its lifetime threshold memory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionTracker {
    character_id: CharacterId,
    state: CorruptionState,
    threshold_25_triggered: bool,
    threshold_50_triggered: bool,
    threshold_75_triggered: bool,
}

impl CorruptionTracker {
    /// Create a fresh tracker for a character at zero corruption
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            character_id,
            state: CorruptionState::uncorrupted(),
            threshold_25_triggered: false,
            threshold_50_triggered: false,
            threshold_75_triggered: false,
        }
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    /// The current corruption value in [0, 100]
    pub fn current_corruption(&self) -> i32 {
        self.state.current_corruption()
    }

    /// The current corruption state value object
    pub fn state(&self) -> CorruptionState {
        self.state
    }

    /// The stage for the current value
    pub fn stage(&self) -> CorruptionStage {
        self.state.stage()
    }

    /// Whether the 25 threshold has fired at any point in this character's
    /// life
    pub fn threshold_25_triggered(&self) -> bool {
        self.threshold_25_triggered
    }

    pub fn threshold_50_triggered(&self) -> bool {
        self.threshold_50_triggered
    }

    pub fn threshold_75_triggered(&self) -> bool {
        self.threshold_75_triggered
    }

    /// Max HP penalty as a percentage: floor(corruption / 10) x 5, so 0%
    /// clean up to 50% at full corruption
    pub fn max_hp_penalty_percent(&self) -> i32 {
        (self.current_corruption() / 10) * 5
    }

    /// Max AP penalty, same curve as HP
    pub fn max_ap_penalty_percent(&self) -> i32 {
        (self.current_corruption() / 10) * 5
    }

    /// Dice removed from resolve pools: floor(corruption / 20)
    pub fn resolve_dice_penalty(&self) -> i32 {
        self.current_corruption() / 20
    }

    /// Bonus to tech skill checks from resonance with corrupted runework.
    /// Caps at +2; Consumed characters get nothing, they are already gone.
    pub fn tech_bonus(&self) -> i32 {
        match self.stage() {
            CorruptionStage::Uncorrupted => 0,
            CorruptionStage::Tainted => 1,
            CorruptionStage::Infected
            | CorruptionStage::Blighted
            | CorruptionStage::Corrupted => 2,
            CorruptionStage::Consumed => 0,
        }
    }

    /// Penalty to social checks with uncorrupted entities. Caps at -2; at
    /// higher corruption NPCs refuse to interact rather than haggle harder.
    pub fn social_penalty(&self) -> i32 {
        match self.stage() {
            CorruptionStage::Uncorrupted => 0,
            CorruptionStage::Tainted => -1,
            CorruptionStage::Infected
            | CorruptionStage::Blighted
            | CorruptionStage::Corrupted => -2,
            CorruptionStage::Consumed => 0,
        }
    }

    /// Whether faction reputation gains are locked (current value, not the
    /// one-time memory)
    pub fn is_faction_locked(&self) -> bool {
        self.current_corruption() >= THRESHOLD_50
    }

    /// Whether the character has hit the terminal error at 100
    pub fn is_terminal_error(&self) -> bool {
        self.current_corruption() >= MAX_CORRUPTION
    }

    /// Apply a corruption gain and report the transition.
    ///
    /// A single large gain can straddle several one-time thresholds; all of
    /// them are marked triggered, and the highest newly crossed one is
    /// reported so callers announce the most significant event.
    pub fn add_corruption(
        &mut self,
        amount: i32,
        source: CorruptionSource,
    ) -> Result<CorruptionAddResult, DomainError> {
        let previous = self.state;
        let new_state = previous.with_corruption_added(amount)?;
        self.state = new_state;

        let mut threshold_crossed = None;
        for (threshold, triggered) in [
            (THRESHOLD_25, &mut self.threshold_25_triggered),
            (THRESHOLD_50, &mut self.threshold_50_triggered),
            (THRESHOLD_75, &mut self.threshold_75_triggered),
        ] {
            if !*triggered
                && previous.current_corruption() < threshold
                && new_state.current_corruption() >= threshold
            {
                *triggered = true;
                threshold_crossed = Some(threshold);
            }
        }

        Ok(CorruptionAddResult::create(
            previous.current_corruption(),
            new_state.current_corruption(),
            source,
            threshold_crossed,
        ))
    }

    /// Reduce corruption (rituals, quest rewards). Threshold memory is
    /// untouched: a threshold that fired stays fired.
    pub fn reduce_corruption(&mut self, amount: i32) -> Result<CorruptionAddResult, DomainError> {
        let previous = self.state;
        self.state = previous.with_corruption_reduced(amount)?;

        Ok(CorruptionAddResult::create(
            previous.current_corruption(),
            self.state.current_corruption(),
            CorruptionSource::Ritual,
            None,
        ))
    }

    /// Restore a tracker from persisted fields, bypassing threshold logic
    pub fn from_parts(
        character_id: CharacterId,
        corruption: i32,
        threshold_25_triggered: bool,
        threshold_50_triggered: bool,
        threshold_75_triggered: bool,
    ) -> Self {
        Self {
            character_id,
            state: CorruptionState::create(corruption),
            threshold_25_triggered,
            threshold_50_triggered,
            threshold_75_triggered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> CorruptionTracker {
        CorruptionTracker::new(CharacterId::new())
    }

    #[test]
    fn test_new_tracker_is_clean() {
        let t = tracker();
        assert_eq!(t.current_corruption(), 0);
        assert_eq!(t.stage(), CorruptionStage::Uncorrupted);
        assert!(!t.threshold_25_triggered());
        assert!(!t.is_faction_locked());
    }

    #[test]
    fn test_threshold_fires_once() {
        let mut t = tracker();
        let first = t
            .add_corruption(30, CorruptionSource::Environmental)
            .expect("non-negative");
        assert_eq!(first.threshold_crossed, Some(25));
        assert!(t.threshold_25_triggered());

        // Drop below and climb back over: no second firing
        t.reduce_corruption(20).expect("non-negative");
        let again = t
            .add_corruption(20, CorruptionSource::Environmental)
            .expect("non-negative");
        assert_eq!(again.threshold_crossed, None);
    }

    #[test]
    fn test_jump_over_multiple_thresholds_marks_all() {
        let mut t = tracker();
        let result = t
            .add_corruption(60, CorruptionSource::Ritual)
            .expect("non-negative");
        // Highest newly crossed threshold is reported
        assert_eq!(result.threshold_crossed, Some(50));
        assert!(t.threshold_25_triggered());
        assert!(t.threshold_50_triggered());
        assert!(!t.threshold_75_triggered());

        // Both straddled thresholds are spent; only 75 remains
        let next = t
            .add_corruption(20, CorruptionSource::Ritual)
            .expect("non-negative");
        assert_eq!(next.threshold_crossed, Some(75));
    }

    #[test]
    fn test_exact_landing_counts_as_crossing() {
        let mut t = tracker();
        let result = t
            .add_corruption(25, CorruptionSource::Artifact)
            .expect("non-negative");
        assert_eq!(result.threshold_crossed, Some(25));
    }

    #[test]
    fn test_penalty_curves() {
        let mut t = tracker();
        t.add_corruption(47, CorruptionSource::Consumable)
            .expect("non-negative");
        assert_eq!(t.max_hp_penalty_percent(), 20);
        assert_eq!(t.max_ap_penalty_percent(), 20);
        assert_eq!(t.resolve_dice_penalty(), 2);

        t.add_corruption(53, CorruptionSource::Consumable)
            .expect("non-negative");
        assert_eq!(t.max_hp_penalty_percent(), 50);
        assert_eq!(t.resolve_dice_penalty(), 5);
    }

    #[test]
    fn test_tech_bonus_and_social_penalty_tables() {
        let cases = [
            (0, 0, 0),
            (20, 1, -1),
            (40, 2, -2),
            (60, 2, -2),
            (80, 2, -2),
            (100, 0, 0),
        ];
        for (corruption, tech, social) in cases {
            let t = CorruptionTracker::from_parts(CharacterId::new(), corruption, true, true, true);
            assert_eq!(t.tech_bonus(), tech, "tech at {}", corruption);
            assert_eq!(t.social_penalty(), social, "social at {}", corruption);
        }
    }

    #[test]
    fn test_faction_lock_follows_current_value() {
        let mut t = tracker();
        t.add_corruption(50, CorruptionSource::BlightTransfer)
            .expect("non-negative");
        assert!(t.is_faction_locked());
        t.reduce_corruption(10).expect("non-negative");
        assert!(!t.is_faction_locked(), "lock tracks value, not memory");
        assert!(t.threshold_50_triggered(), "memory persists");
    }

    #[test]
    fn test_terminal_error() {
        let mut t = tracker();
        let result = t
            .add_corruption(150, CorruptionSource::ForlornContact)
            .expect("non-negative");
        assert_eq!(t.current_corruption(), 100);
        assert!(t.is_terminal_error());
        assert!(result.is_terminal);
        assert_eq!(result.new_stage, CorruptionStage::Consumed);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut t = tracker();
        assert!(t.add_corruption(-5, CorruptionSource::Artifact).is_err());
        assert!(t.reduce_corruption(-5).is_err());
    }
}
