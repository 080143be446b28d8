//! RNG oracle for deterministic random number generation.
//!
//! Queue shuffles and fifty-fifty picks draw from this trait so that a
//! session replays identically for a given seed.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed for one random draw.
///
/// # Arguments
///
/// * `session_seed` - Base seed chosen when the session starts
/// * `nonce` - Draw sequence number within the session
/// * `question_index` - Queue position the draw belongs to
/// * `context` - Separates independent draws made for the same question
pub fn compute_seed(session_seed: u64, nonce: u64, question_index: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = session_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (question_index as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        assert_eq!(PcgRng.next_u32(42), PcgRng.next_u32(42));
    }

    #[test]
    fn range_stays_inclusive() {
        for seed in 0..500 {
            let value = PcgRng.range(compute_seed(seed, 1, 2, 3), 0, 3);
            assert!(value <= 3);
        }
        assert_eq!(PcgRng.range(9, 5, 5), 5);
    }

    #[test]
    fn context_separates_draws() {
        assert_ne!(compute_seed(1, 1, 1, 0), compute_seed(1, 1, 1, 1));
    }
}
