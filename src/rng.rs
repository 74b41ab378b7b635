//! Deterministic pseudo-random scalar stream used for centroid
//! initialization and empty-cluster recovery.
//!
//! This is the classic `(state * 9301 + 49297) % 233280` linear
//! congruential generator. The constants are load-bearing: palettes are
//! reproducible across runs and hosts only because every implementation
//! draws the exact same sequence. Each clustering run owns its own
//! instance — there is no shared or global generator.

const MULTIPLIER: u32 = 9301;
const INCREMENT: u32 = 49297;
const MODULUS: u32 = 233280;

#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed. The seed is reduced modulo the
    /// generator's modulus so the state update can never overflow u32;
    /// seeds below 233280 (including the default 0) are used verbatim.
    pub fn new(seed: u32) -> Self {
        Self { state: seed % MODULUS }
    }

    /// Advance the state and return a value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Draw an index in `0..len` as `floor(next_f64() * len)`.
    pub fn pick_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(0)
    }
}
