//! Dice pool value objects and success-counting roll classification
//!
//! Duskmire uses success-counting pools of same-sided dice (d10 in all
//! shipped content): every die showing [`SUCCESS_THRESHOLD`] or higher is a
//! success, every die showing [`BOTCH_FACE`] is a botch, and the comparand
//! against a difficulty class is net successes (successes minus botches).
//! Supports pool notation like "4d10" for content tables.
//!
//! Rolling takes the random source as an explicit parameter - a single
//! deterministic pass over the RNG stream, no retries or rerolls - so every
//! check is reproducible from a seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::error::DomainError;

/// Die face that counts as a success (8+ on a d10).
pub const SUCCESS_THRESHOLD: u32 = 8;

/// Die face that counts as a botch.
pub const BOTCH_FACE: u32 = 1;

/// Net successes on the raw roll at or above which the roll itself is
/// considered a critical (used for roll-level logging, not outcome tiers).
pub const CRITICAL_NET_SUCCESSES: i32 = 5;

/// Error when parsing dice pool notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DicePoolParseError {
    /// The notation string is empty
    #[error("Empty dice pool notation")]
    Empty,
    /// Invalid format - expected XdY
    #[error("Invalid dice pool format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// A pool of N same-sided dice, created once per check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    /// Number of dice in the pool (X in XdY)
    pub count: u32,
    /// Number of faces per die (Y in XdY)
    pub sides: u32,
}

impl DicePool {
    /// Create a new dice pool
    pub fn new(count: u32, sides: u32) -> Result<Self, DicePoolParseError> {
        if count == 0 {
            return Err(DicePoolParseError::InvalidDiceCount);
        }
        if sides < 2 {
            return Err(DicePoolParseError::InvalidDieSize);
        }
        Ok(Self { count, sides })
    }

    /// Convenience constructor for the standard d10 pools used throughout
    /// the system
    pub fn d10(count: u32) -> Result<Self, DicePoolParseError> {
        Self::new(count, 10)
    }

    /// Parse pool notation like "4d10" or "d10" (shorthand for one die)
    pub fn parse(input: &str) -> Result<Self, DicePoolParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DicePoolParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DicePoolParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let count_str = &input[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1 // "d10" means "1d10"
        } else {
            count_str.parse().map_err(|_| {
                DicePoolParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        };

        let sides_str = &input[d_pos + 1..];
        let sides: u32 = sides_str.parse().map_err(|_| {
            DicePoolParseError::InvalidFormat(format!("Invalid die size: '{}'", sides_str))
        })?;

        Self::new(count, sides)
    }

    /// Roll the pool: exactly `count` independent uniform draws in
    /// `[1, sides]`, in a single pass over the supplied random source.
    pub fn roll(&self, rng: &mut impl Rng) -> DiceRollResult {
        let rolls = (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect();
        DiceRollResult::new(*self, rolls)
    }

    /// Format as notation (e.g., "4d10")
    pub fn notation(&self) -> String {
        format!("{}d{}", self.count, self.sides)
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl std::str::FromStr for DicePool {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s)?)
    }
}

/// Result of rolling a dice pool, immutable once created
///
/// All classification is derived at construction from the roll array, so a
/// stored result can never disagree with its own successes/botches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// The pool that was rolled
    pub pool: DicePool,
    /// Individual die faces, each in `[1, pool.sides]`
    pub rolls: Vec<u32>,
    /// Count of dice showing the success threshold or higher
    pub total_successes: u32,
    /// Count of dice showing the botch face
    pub total_botches: u32,
    /// Successes minus botches (may be negative)
    pub net_successes: i32,
    /// Zero successes with at least one botch
    pub is_fumble: bool,
    /// Sum of all faces - used only for legacy damage-style sums, never for
    /// outcome classification
    pub total: u32,
}

impl DiceRollResult {
    /// Classify a roll array. The success threshold (8+) and botch face (1)
    /// are constants of the system, not pool parameters, so the same rules
    /// apply uniformly to every check.
    pub fn new(pool: DicePool, rolls: Vec<u32>) -> Self {
        let total_successes = rolls.iter().filter(|&&r| r >= SUCCESS_THRESHOLD).count() as u32;
        let total_botches = rolls.iter().filter(|&&r| r == BOTCH_FACE).count() as u32;
        let net_successes = total_successes as i32 - total_botches as i32;
        let is_fumble = total_successes == 0 && total_botches >= 1;
        let total = rolls.iter().sum();

        Self {
            pool,
            rolls,
            total_successes,
            total_botches,
            net_successes,
            is_fumble,
            total,
        }
    }

    /// Whether the raw roll counts as a critical (5+ net successes)
    pub fn is_critical_success(&self) -> bool {
        self.net_successes >= CRITICAL_NET_SUCCESSES
    }

    /// Format as a breakdown string (e.g., "4d10[9, 3, 1, 8] = 1 net (2S-1B)")
    pub fn breakdown(&self) -> String {
        let rolls_str: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        format!(
            "{}[{}] = {} net ({}S-{}B)",
            self.pool.notation(),
            rolls_str.join(", "),
            self.net_successes,
            self.total_successes,
            self.total_botches
        )
    }
}

impl fmt::Display for DiceRollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.breakdown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn result(rolls: &[u32]) -> DiceRollResult {
        let pool = DicePool::d10(rolls.len() as u32).expect("valid pool");
        DiceRollResult::new(pool, rolls.to_vec())
    }

    #[test]
    fn test_parse_pool() {
        let pool = DicePool::parse("4d10").expect("parses");
        assert_eq!(pool.count, 4);
        assert_eq!(pool.sides, 10);
    }

    #[test]
    fn test_parse_shorthand() {
        let pool = DicePool::parse("d10").expect("parses");
        assert_eq!(pool.count, 1);
        assert_eq!(pool.sides, 10);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DicePool::parse(""), Err(DicePoolParseError::Empty)));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DicePool::parse("0d10"),
            Err(DicePoolParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_invalid_die_size() {
        assert!(matches!(
            DicePool::parse("1d1"),
            Err(DicePoolParseError::InvalidDieSize)
        ));
    }

    #[test]
    fn test_new_rejects_zero_count() {
        assert!(matches!(
            DicePool::new(0, 10),
            Err(DicePoolParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_roll_range_and_count() {
        let pool = DicePool::d10(6).expect("valid pool");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let result = pool.roll(&mut rng);
            assert_eq!(result.rolls.len(), 6);
            assert!(result.rolls.iter().all(|&r| (1..=10).contains(&r)));
        }
    }

    #[test]
    fn test_roll_is_deterministic_for_seed() {
        let pool = DicePool::d10(5).expect("valid pool");
        let a = pool.roll(&mut ChaCha8Rng::seed_from_u64(7));
        let b = pool.roll(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_classification() {
        let r = result(&[9, 3, 1, 8]);
        assert_eq!(r.total_successes, 2);
        assert_eq!(r.total_botches, 1);
        assert_eq!(r.net_successes, 1);
        assert!(!r.is_fumble);
        assert_eq!(r.total, 21);
    }

    #[test]
    fn test_net_successes_identity() {
        // NetSuccesses = TotalSuccesses - TotalBotches for any roll
        let r = result(&[1, 1, 1, 10, 8]);
        assert_eq!(
            r.net_successes,
            r.total_successes as i32 - r.total_botches as i32
        );
        assert_eq!(r.net_successes, -1);
    }

    #[test]
    fn test_fumble_requires_zero_successes_and_a_botch() {
        assert!(result(&[1, 3, 5]).is_fumble);
        assert!(!result(&[1, 8]).is_fumble, "a success cancels the fumble");
        assert!(!result(&[2, 3, 5]).is_fumble, "no botch, no fumble");
    }

    #[test]
    fn test_critical_success() {
        assert!(result(&[8, 8, 9, 9, 10]).is_critical_success());
        assert!(!result(&[8, 8, 9, 9]).is_critical_success());
    }

    #[test]
    fn test_breakdown() {
        let r = result(&[9, 3, 1, 8]);
        assert_eq!(r.breakdown(), "4d10[9, 3, 1, 8] = 1 net (2S-1B)");
    }

    #[test]
    fn test_serde_round_trip() {
        let r = result(&[9, 3, 1, 8]);
        let json = serde_json::to_string(&r).expect("serializes");
        let back: DiceRollResult = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, r);
    }
}
