//! Dice roller service
//!
//! Owns the injected random source and layers advantage handling on top of
//! the domain's single-pass pool roll. Advantage rolls the pool twice and
//! keeps the roll with the higher net successes; disadvantage keeps the
//! lower. Everything stays deterministic for a given seed, which is what
//! makes session replay possible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use duskmire_domain::{DicePool, DiceRollResult};

/// How a roll interacts with situational advantage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvantageType {
    /// Single roll
    #[default]
    Normal,
    /// Roll twice, keep the higher net successes
    Advantage,
    /// Roll twice, keep the lower net successes
    Disadvantage,
}

/// Rolls dice pools against an owned random source
#[derive(Debug)]
pub struct DiceRoller<R: Rng> {
    rng: R,
}

impl DiceRoller<ChaCha8Rng> {
    /// A roller with a fixed seed, for deterministic replay and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> DiceRoller<R> {
    /// Wrap an existing random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Roll a pool once
    pub fn roll(&mut self, pool: DicePool) -> DiceRollResult {
        let result = pool.roll(&mut self.rng);
        debug!(roll = %result.breakdown(), "Rolled dice pool");
        result
    }

    /// Roll a single d10, for the panic table and similar flat lookups
    pub fn roll_d10(&mut self) -> u32 {
        self.rng.gen_range(1..=10)
    }

    /// Roll a pool with advantage handling
    pub fn roll_with_advantage(
        &mut self,
        pool: DicePool,
        advantage: AdvantageType,
    ) -> DiceRollResult {
        match advantage {
            AdvantageType::Normal => self.roll(pool),
            AdvantageType::Advantage => {
                let first = self.roll(pool);
                let second = self.roll(pool);
                let kept = if second.net_successes > first.net_successes {
                    second
                } else {
                    first
                };
                debug!(kept = %kept.breakdown(), "Advantage roll kept the better result");
                kept
            }
            AdvantageType::Disadvantage => {
                let first = self.roll(pool);
                let second = self.roll(pool);
                let kept = if second.net_successes < first.net_successes {
                    second
                } else {
                    first
                };
                debug!(kept = %kept.breakdown(), "Disadvantage roll kept the worse result");
                kept
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(count: u32) -> DicePool {
        DicePool::d10(count).expect("valid pool")
    }

    #[test]
    fn test_seeded_rollers_replay_identically() {
        let mut a = DiceRoller::seeded(99);
        let mut b = DiceRoller::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.roll(pool(5)), b.roll(pool(5)));
        }
    }

    #[test]
    fn test_d10_stays_in_range() {
        let mut roller = DiceRoller::seeded(3);
        for _ in 0..200 {
            let face = roller.roll_d10();
            assert!((1..=10).contains(&face));
        }
    }

    #[test]
    fn test_advantage_never_worse_than_both() {
        // For each seed, advantage must equal the max of the two rolls a
        // twin roller produces from the same stream
        for seed in 0..30 {
            let mut twin = DiceRoller::seeded(seed);
            let first = twin.roll(pool(6));
            let second = twin.roll(pool(6));
            let best = first.net_successes.max(second.net_successes);

            let mut roller = DiceRoller::seeded(seed);
            let kept = roller.roll_with_advantage(pool(6), AdvantageType::Advantage);
            assert_eq!(kept.net_successes, best);
        }
    }

    #[test]
    fn test_disadvantage_keeps_the_worse_roll() {
        for seed in 0..30 {
            let mut twin = DiceRoller::seeded(seed);
            let first = twin.roll(pool(6));
            let second = twin.roll(pool(6));
            let worst = first.net_successes.min(second.net_successes);

            let mut roller = DiceRoller::seeded(seed);
            let kept = roller.roll_with_advantage(pool(6), AdvantageType::Disadvantage);
            assert_eq!(kept.net_successes, worst);
        }
    }

    #[test]
    fn test_normal_consumes_one_roll() {
        let mut twin = DiceRoller::seeded(7);
        let expected = twin.roll(pool(4));

        let mut roller = DiceRoller::seeded(7);
        let kept = roller.roll_with_advantage(pool(4), AdvantageType::Normal);
        assert_eq!(kept, expected);
    }
}
