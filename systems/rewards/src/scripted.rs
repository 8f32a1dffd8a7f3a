//! Deterministic [`RewardRng`] fed from predetermined samples.

use std::collections::VecDeque;

use crate::RewardRng;

/// Sample returned once the scripted unit samples run out.
///
/// It sits just below one, so only a chance of exactly `1.0` still grants.
const EXHAUSTED_UNIT: f32 = 1.0 - f32::EPSILON;

/// Generator that replays queued samples in order.
///
/// Integer samples are clamped into the requested range. When a queue runs
/// dry, unit rolls fail and integer rolls yield the lower bound.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    units: VecDeque<f32>,
    integers: VecDeque<u32>,
    units_drawn: usize,
}

impl ScriptedRng {
    /// Creates a generator with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unit samples to the queue.
    #[must_use]
    pub fn with_units(mut self, samples: impl IntoIterator<Item = f32>) -> Self {
        self.units.extend(samples);
        self
    }

    /// Appends integer samples to the queue.
    #[must_use]
    pub fn with_integers(mut self, samples: impl IntoIterator<Item = u32>) -> Self {
        self.integers.extend(samples);
        self
    }

    /// Queues one more unit sample.
    pub fn push_unit(&mut self, sample: f32) {
        self.units.push_back(sample);
    }

    /// Queues one more integer sample.
    pub fn push_integer(&mut self, sample: u32) {
        self.integers.push_back(sample);
    }

    /// Number of unit samples requested so far, including exhausted draws.
    #[must_use]
    pub fn units_drawn(&self) -> usize {
        self.units_drawn
    }
}

impl RewardRng for ScriptedRng {
    fn unit(&mut self) -> f32 {
        self.units_drawn += 1;
        self.units.pop_front().unwrap_or(EXHAUSTED_UNIT)
    }

    fn inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.integers
            .pop_front()
            .map_or(low, |sample| sample.clamp(low, high))
    }
}
