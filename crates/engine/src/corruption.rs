//! Corruption service
//!
//! Thin orchestration over [`CorruptionTracker`]: applies gains and
//! reductions, and narrates stage changes, one-time threshold firings and
//! the terminal error through structured logging. All rule arithmetic
//! lives in the domain.

use tracing::{debug, info, warn};

use duskmire_domain::{CorruptionAddResult, CorruptionSource, CorruptionTracker};

use crate::error::EngineError;

/// Applies corruption events to trackers
#[derive(Debug, Default)]
pub struct CorruptionService;

impl CorruptionService {
    pub fn new() -> Self {
        Self
    }

    /// Apply a corruption gain and log what it did
    pub fn add_corruption(
        &self,
        tracker: &mut CorruptionTracker,
        amount: i32,
        source: CorruptionSource,
    ) -> Result<CorruptionAddResult, EngineError> {
        let result = tracker.add_corruption(amount, source)?;

        if result.is_terminal {
            warn!(
                character = %tracker.character_id(),
                "Corruption reached 100 - terminal error, the character is consumed"
            );
        } else if let Some(threshold) = result.threshold_crossed {
            warn!(
                character = %tracker.character_id(),
                threshold,
                stage = %result.new_stage,
                "One-time corruption threshold crossed"
            );
        } else if result.stage_changed {
            info!(
                character = %tracker.character_id(),
                from = %result.previous_stage,
                to = %result.new_stage,
                "Corruption stage changed"
            );
        } else {
            debug!(
                character = %tracker.character_id(),
                corruption = result.new_corruption,
                "Corruption applied within stage"
            );
        }
        Ok(result)
    }

    /// Apply a rare corruption reduction (ritual or quest reward)
    pub fn reduce_corruption(
        &self,
        tracker: &mut CorruptionTracker,
        amount: i32,
    ) -> Result<CorruptionAddResult, EngineError> {
        let result = tracker.reduce_corruption(amount)?;
        info!(
            character = %tracker.character_id(),
            reduced = -result.amount_applied,
            corruption = result.new_corruption,
            "Corruption reduced"
        );
        Ok(result)
    }
}
