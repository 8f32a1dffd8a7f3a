#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reward policy applied whenever a piñata is opened.
//!
//! The system owns the "opened since last grant" counters and decides, with
//! the help of an injected [`RewardRng`], whether an open earns a critical or
//! a bomb. It also rolls the magnitude of a critical bonus. Randomness is never
//! drawn from an ambient generator so callers can replay matches exactly.

use pinata_core::{EngineConfig, RewardKind, RewardTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(any(test, feature = "scripted_rng"))]
mod scripted;

#[cfg(any(test, feature = "scripted_rng"))]
pub use scripted::ScriptedRng;

/// Source of the random samples consumed by reward and bonus rolls.
pub trait RewardRng {
    /// Returns a uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f32;

    /// Returns a uniform integer in `[low, high]`.
    ///
    /// Implementations return `low` when `high <= low`.
    fn inclusive(&mut self, low: u32, high: u32) -> u32;
}

/// Reproducible generator backed by ChaCha8, seeded from a single `u64`.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Creates a generator whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RewardRng for SeededRng {
    fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    fn inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

/// Outcome of the reward rolls performed for a single open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardRolls {
    /// Whether a critical was granted.
    pub critical: bool,
    /// Whether a bomb was granted.
    pub bomb: bool,
}

impl RewardRolls {
    /// Granted rewards in the order they were rolled.
    pub fn granted(self) -> impl Iterator<Item = RewardKind> {
        let critical = self.critical.then_some(RewardKind::Critical);
        let bomb = self.bomb.then_some(RewardKind::Bomb);
        critical.into_iter().chain(bomb)
    }
}

/// Counters tracking how many piñatas opened since each reward was last granted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardLedger {
    opens_since_critical: u32,
    opens_since_bomb: u32,
}

impl RewardLedger {
    /// Creates a ledger with both counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens counted since the last critical grant.
    #[must_use]
    pub const fn opens_since_critical(&self) -> u32 {
        self.opens_since_critical
    }

    /// Opens counted since the last bomb grant.
    #[must_use]
    pub const fn opens_since_bomb(&self) -> u32 {
        self.opens_since_bomb
    }

    /// Counts one open and performs the critical roll followed by the bomb roll.
    ///
    /// A roll only draws a sample once its counter reaches the table's
    /// threshold, and a successful roll resets that counter.
    pub fn record_open<R>(&mut self, config: &EngineConfig, rng: &mut R) -> RewardRolls
    where
        R: RewardRng + ?Sized,
    {
        RewardRolls {
            critical: roll(&mut self.opens_since_critical, config.critical(), rng),
            bomb: roll(&mut self.opens_since_bomb, config.bomb(), rng),
        }
    }
}

fn roll<R>(counter: &mut u32, table: RewardTable, rng: &mut R) -> bool
where
    R: RewardRng + ?Sized,
{
    *counter = counter.saturating_add(1);
    if *counter < table.min_opens() {
        return false;
    }

    if rng.unit() <= table.chance() {
        *counter = 0;
        return true;
    }
    false
}

/// Rolls the extra click weight granted by spending a critical.
///
/// The bonus lies in `[1, max(1, clicks_required - 1)]`, so on its own it can
/// bring a piñata to the brink of opening without ever overshooting it.
pub fn roll_critical_bonus<R>(clicks_required: u32, rng: &mut R) -> u32
where
    R: RewardRng + ?Sized,
{
    let max = clicks_required.saturating_sub(1).max(1);
    rng.inclusive(1, max)
}
