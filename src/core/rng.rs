use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the random draws behind customer arrivals and orders
pub trait RandomSource {
    /// Uniform draw from `lo..=hi`
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// Percent roll: true when a 1..=100 draw lands at or below `percent`
    fn chance(&mut self, percent: u32) -> bool {
        self.range_inclusive(1, 100) <= percent
    }
}

/// `StdRng` backed source, seeded for reproducible days or from entropy for live play
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of draws, clamping each into the requested range.
///
/// Once the script runs out every draw returns the upper bound, so `chance` rolls
/// fail for anything below 100 percent.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn push(&mut self, draw: u32) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        match self.draws.pop_front() {
            Some(draw) => draw.clamp(lo, hi),
            None => hi,
        }
    }
}
