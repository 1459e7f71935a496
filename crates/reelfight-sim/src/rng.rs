//! Deterministic per-fight random source.
//!
//! A 31-bit linear congruential generator. Same seed and same call sequence
//! give bit-identical output, which is what makes fights replayable.

use rand::{Error, RngCore, SeedableRng};

use reelfight_core::constants::{LCG_INCREMENT, LCG_MASK, LCG_MULTIPLIER, RNG_RESOLUTION};
use reelfight_core::species::seed_from_id;

/// LCG owned by exactly one fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightRng {
    state: u64,
}

impl FightRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from a species id.
    pub fn for_species(id: &str) -> Self {
        Self::new(seed_from_id(id))
    }

    /// Current state. Feeding it back into `new` resumes the sequence.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.state
    }

    /// Next value in [0, 1), quantized to 1 / 10_000.
    pub fn next_unit(&mut self) -> f64 {
        (self.step() % RNG_RESOLUTION) as f64 / RNG_RESOLUTION as f64
    }
}

impl RngCore for FightRng {
    fn next_u32(&mut self) -> u32 {
        // Low bits of an LCG are weak; take the top 16 of each of two steps.
        let hi = self.step() >> 15;
        let lo = self.step() >> 15;
        ((hi << 16) | lo) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for FightRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
