//! Random implementations.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }

    fn gen_range(&self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min.min(max)..=max.max(min))
    }
}

/// Deterministic random source for reproducible simulations.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn gen_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }

    fn gen_range(&self, min: u32, max: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(min.min(max)..=max.max(min))
    }
}

/// Fixed random for testing. Indices are clamped into range.
#[cfg(test)]
pub struct FixedRandom {
    pub index: usize,
    pub turns: u32,
}

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn gen_range(&self, min: u32, max: u32) -> u32 {
        self.turns.clamp(min.min(max), max.max(min))
    }
}
