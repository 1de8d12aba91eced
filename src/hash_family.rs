//! Families of cheap universal hash functions used to simulate random
//! permutations for MinHash signature construction.
//!
//! Both variants are parameterized at construction time by a seeded
//! ChaCha8 RNG, so a `(variant, num_hashes, universe_size, seed)` tuple
//! always yields the same family — two [`crate::cache::LSHCache`]s built
//! from the same [`crate::config::CacheConfig`] see identical signatures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MinHashVariant;

/// A family of `n` hash functions `h_0..h_{n-1}`, each mapping `u64 -> u64`
/// modulo a fixed universe size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashFamily {
    /// `h_i(x) = ((x mod 2^32) XOR mask_i) mod universe_size`, `mask_i` a
    /// random 32-bit value. Cheapest possible near-permutation; fine when
    /// inputs already have good bit-mixing (hashed shingles).
    Xor {
        masks: Vec<u32>,
        universe_size: u64,
    },
    /// `h_i(x) = (a_i * (x >> 4) + b_i * x + c_i) mod universe_size`, with
    /// `(a_i, b_i, c_i)` drawn uniformly from `[1, universe_size]`.
    Multiply {
        coeffs: Vec<(u64, u64, u64)>,
        universe_size: u64,
    },
}

impl HashFamily {
    /// Build a family of `num_hashes` functions over `0..universe_size`,
    /// drawing parameters from `ChaCha8Rng::seed_from_u64(seed)` in index
    /// order (hash 0's parameters are drawn first, then hash 1's, ...).
    pub fn new(variant: MinHashVariant, num_hashes: usize, universe_size: u64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        match variant {
            MinHashVariant::Xor => {
                let masks = (0..num_hashes).map(|_| rng.gen::<u32>()).collect();
                HashFamily::Xor { masks, universe_size }
            }
            MinHashVariant::Multiply => {
                let coeffs = (0..num_hashes)
                    .map(|_| {
                        let a = rng.gen_range(1..=universe_size);
                        let b = rng.gen_range(1..=universe_size);
                        let c = rng.gen_range(1..=universe_size);
                        (a, b, c)
                    })
                    .collect();
                HashFamily::Multiply { coeffs, universe_size }
            }
        }
    }

    /// Number of hash functions in this family.
    pub fn len(&self) -> usize {
        match self {
            HashFamily::Xor { masks, .. } => masks.len(),
            HashFamily::Multiply { coeffs, .. } => coeffs.len(),
        }
    }

    /// True when this family has no hash functions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the `i`-th hash function to `x`.
    pub fn hash(&self, i: usize, x: u64) -> u64 {
        match self {
            HashFamily::Xor { masks, universe_size } => {
                let trimmed = x & 0xFFFF_FFFF;
                (trimmed ^ masks[i] as u64) % universe_size
            }
            HashFamily::Multiply { coeffs, universe_size } => {
                let (a, b, c) = coeffs[i];
                a.wrapping_mul(x >> 4)
                    .wrapping_add(b.wrapping_mul(x))
                    .wrapping_add(c)
                    % universe_size
            }
        }
    }

    /// Apply every hash function in the family to `x`, in index order.
    pub fn hash_all(&self, x: u64) -> Vec<u64> {
        (0..self.len()).map(|i| self.hash(i, x)).collect()
    }
}
