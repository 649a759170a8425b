//! Seeded linear-congruential generator.
//!
//! The recurrence is `state = (state * 9301 + 49297) mod 233280` and each
//! draw is `state / 233280`. All arithmetic is integer, so a seed produces the
//! same stream on every platform. Piece layouts depend on these constants:
//! changing them changes every generated puzzle.

pub const LCG_MULTIPLIER: u64 = 9301;
pub const LCG_INCREMENT: u64 = 49297;
pub const LCG_MODULUS: u64 = 233280;

/// Deterministic scalar stream owned by a single generator instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Negative seeds are reduced with a Euclidean remainder, so `-1` and
    /// `233279` start from the same state.
    pub fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(LCG_MODULUS as i64) as u64,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() over an empty collection");
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}
