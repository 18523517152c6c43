//! Deterministic, reseedable pseudo-random source for the TWINKLE evaluator.
//!
//! A process-global reseed every 100 ms of pattern time is awkward to
//! reproduce faithfully as a pure function and would disturb any other
//! random consumer in the process, so this reseeds a private, owned
//! generator instead — same "frame-coherent for 100 ms" contract, no
//! shared state.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

/// Draws `f32` values in `[0, 1)`, reseeded per call to [`reseed_for`].
pub struct TwinkleRng {
    inner: ChaCha8Rng,
}

impl TwinkleRng {
    /// Seed deterministically from a 100 ms epoch (`pattern_time_ms / 100`),
    /// so every pixel drawn within the same 100 ms window of a given
    /// pattern sees the same sequence start.
    pub fn reseed_for(pattern_time_ms: u32) -> Self {
        let epoch = u64::from(pattern_time_ms / 100);
        Self { inner: ChaCha8Rng::seed_from_u64(epoch) }
    }

    /// Next draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        // 24 bits of mantissa is ample for a twinkle probability draw.
        (self.inner.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}
