//! RNG module - deterministic randomness for the session
//!
//! A simple LCG keeps replays reproducible: one seeded generator per
//! session drives both pair-color draws and garbage column selection.

use crate::types::PuyoColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Draw a uniformly random playable color (never Garbage)
    pub fn next_color(&mut self) -> PuyoColor {
        let idx = self.next_range(PuyoColor::PLAYABLE.len() as u32) as usize;
        PuyoColor::PLAYABLE[idx]
    }

    /// Draw a full pair of colors (pivot, satellite)
    pub fn next_pair(&mut self) -> (PuyoColor, PuyoColor) {
        (self.next_color(), self.next_color())
    }

    /// Current internal state (for reseeding a reset session)
    pub fn state(&self) -> u32 {
        self.state
    }
}
