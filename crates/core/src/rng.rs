//! RNG module - uniform random piece selection
//!
//! Every spawn picks one of the seven kinds with equal probability; there is
//! no bag or history. The generator is a small seeded LCG so a game can be
//! replayed exactly from its seed in tests and benches.

use crate::types::PieceKind;

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    seed: u32,
    rng: SimpleRng,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        // Nearby small seeds share their first output; skip it.
        rng.next_u32();
        Self { seed, rng }
    }

    /// Draw the next piece kind, uniform over the catalog
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Seed this randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}
