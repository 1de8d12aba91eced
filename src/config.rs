//! Configuration surface for the LSH–MinHash index.
//!
//! `CacheConfig` is a pure, serializable value: building it never allocates
//! bucket tables or draws randomness. [`LSHCache::new`](crate::cache::LSHCache::new)
//! validates it and resolves the band/row/signature-length triple before any
//! document is accepted.

use serde::{Deserialize, Serialize};

use crate::error::LshError;

/// Which [`crate::hash_family::HashFamily`] variant backs the MinHash
/// permutation simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MinHashVariant {
    /// Cheapest near-permutation: XOR with a random 32-bit mask per hash.
    /// Fine when inputs already have good bit-mixing (hashed shingles).
    Xor,
    /// `a*(x>>4) + b*x + c` with random `(a, b, c)` per hash. Stronger
    /// mixing for inputs that may be small or low-entropy.
    Multiply,
}

/// Which [`crate::cache::Accumulator`] strategy `insert` reports through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccumulatorKind {
    /// `insert` returns the set of candidate duplicate ids.
    DupSet,
    /// `insert` returns the id just assigned; no bucket reads are surfaced.
    DocId,
}

/// Configuration for [`crate::cache::LSHCache`].
///
/// `b`, `r`, and `n` may be partially specified; see
/// [`CacheConfig::resolve_bands`] for the solver that fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Number of LSH bands, if pinned by the caller.
    pub b: Option<usize>,
    /// Number of rows per band, if pinned by the caller.
    pub r: Option<usize>,
    /// Total MinHash signature length, if pinned by the caller.
    pub n: Option<usize>,
    /// Modulus applied to shingle fingerprints and MinHash outputs.
    pub universe_size: u64,
    /// Seed for the construction-time RNG that derives hash family
    /// parameters. Two configs with the same seed and dimensions produce
    /// bit-identical `HashFamily` tables.
    pub seed: u64,
    /// Minimum shingle length in tokens.
    pub k_min: usize,
    /// Maximum shingle length in tokens (inclusive).
    pub k_max: usize,
    /// Which hash family variant to simulate MinHash permutations with.
    pub minhash: MinHashVariant,
    /// Whether to retain each document's band-key vector so `lookup` can be
    /// driven by id alone.
    pub store_signatures: bool,
    /// Which accumulator strategy `insert` reports through.
    pub accumulator: AccumulatorKind,
    /// Compute MinHash signature slots across a `rayon` thread pool.
    pub use_parallel: bool,
}

impl CacheConfig {
    /// Create a new configuration with sensible defaults: no `(b, r, n)`
    /// pinned (resolves to `b=20, r=5, n=100`), universe size 131071,
    /// 2-shingles, multiplicative MinHash, signatures not stored, and the
    /// DupSet accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the number of bands.
    pub fn with_b(mut self, b: usize) -> Self {
        self.b = Some(b);
        self
    }

    /// Pin the number of rows per band.
    pub fn with_r(mut self, r: usize) -> Self {
        self.r = Some(r);
        self
    }

    /// Pin the total MinHash signature length.
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Set the shingle fingerprint / MinHash universe modulus.
    pub fn with_universe_size(mut self, universe_size: u64) -> Self {
        self.universe_size = universe_size;
        self
    }

    /// Set the RNG seed used to derive hash family parameters.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set a single shingle length (`k_min == k_max == k`).
    pub fn with_k(mut self, k: usize) -> Self {
        self.k_min = k;
        self.k_max = k;
        self
    }

    /// Set a shingle length range `[k_min, k_max]`.
    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    /// Select the MinHash family variant.
    pub fn with_minhash(mut self, variant: MinHashVariant) -> Self {
        self.minhash = variant;
        self
    }

    /// Enable or disable signature storage for id-driven lookups.
    pub fn with_store_signatures(mut self, store_signatures: bool) -> Self {
        self.store_signatures = store_signatures;
        self
    }

    /// Select what `insert` reports.
    pub fn with_accumulator(mut self, accumulator: AccumulatorKind) -> Self {
        self.accumulator = accumulator;
        self
    }

    /// Enable or disable parallel signature computation.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate shingle range and universe size. `(b, r, n)` consistency is
    /// checked separately by [`CacheConfig::resolve_bands`], since that
    /// check also needs to factor a lone `n`.
    pub fn validate(&self) -> Result<(), LshError> {
        if self.k_min < 1 {
            return Err(LshError::ConfigError {
                reason: format!("k_min must be >= 1 (got {})", self.k_min),
            });
        }
        if self.k_max < self.k_min {
            return Err(LshError::ConfigError {
                reason: format!(
                    "k_max ({}) must be >= k_min ({})",
                    self.k_max, self.k_min
                ),
            });
        }
        if self.universe_size == 0 {
            return Err(LshError::ConfigError {
                reason: "universe_size must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Resolve `(b, r, n)` from whatever subset was pinned.
    ///
    /// - None pinned: defaults to `(20, 5, 100)`.
    /// - Only `n`: factors `n` as `b * r` with `b` the largest divisor of
    ///   `n` that is `<= sqrt(n)`. Fails if `n` is prime.
    /// - `n` and exactly one of `b`/`r`: the other is `n` divided by the
    ///   given value; fails if not exact.
    /// - `b` and `r` only: `n = b * r`.
    /// - All three: verified for `b * r == n`.
    pub fn resolve_bands(&self) -> Result<BandConfig, LshError> {
        let resolved = match (self.b, self.r, self.n) {
            (None, None, None) => BandConfig { b: 20, r: 5, n: 100 },
            (None, None, Some(n)) => {
                let mut found = None;
                let mut b = (n as f64).sqrt() as usize;
                while b > 1 {
                    if n % b == 0 {
                        found = Some(b);
                        break;
                    }
                    b -= 1;
                }
                let b = found.ok_or_else(|| LshError::ConfigError {
                    reason: format!(
                        "cannot reasonably divide a prime number of total rows ({n}) into bands and rows per band"
                    ),
                })?;
                BandConfig { b, r: n / b, n }
            }
            (Some(b), None, Some(n)) => {
                if n % b != 0 {
                    return Err(LshError::ConfigError {
                        reason: format!("total rows {n} is not divisible by number of bands {b}"),
                    });
                }
                BandConfig { b, r: n / b, n }
            }
            (None, Some(r), Some(n)) => {
                if n % r != 0 {
                    return Err(LshError::ConfigError {
                        reason: format!(
                            "total rows {n} is not divisible by number of rows per band {r}"
                        ),
                    });
                }
                BandConfig { b: n / r, r, n }
            }
            (Some(b), Some(r), None) => BandConfig { b, r, n: b * r },
            (Some(b), Some(r), Some(n)) => {
                if b * r != n {
                    return Err(LshError::ConfigError {
                        reason: format!(
                            "inconsistent specification: b={b} * r={r} != n={n}"
                        ),
                    });
                }
                BandConfig { b, r, n }
            }
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err(LshError::ConfigError {
                    reason: "must specify both number of rows and bands, or the total".into(),
                });
            }
        };
        if resolved.b == 0 || resolved.r == 0 {
            return Err(LshError::ConfigError {
                reason: "resolved bands and rows per band must both be >= 1".into(),
            });
        }
        Ok(resolved)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            b: None,
            r: None,
            n: None,
            universe_size: 131_071,
            seed: 0,
            k_min: 2,
            k_max: 2,
            minhash: MinHashVariant::Multiply,
            store_signatures: false,
            accumulator: AccumulatorKind::DupSet,
            use_parallel: false,
        }
    }
}

/// The resolved `(b, r, n)` triple, satisfying `b * r == n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandConfig {
    /// Number of LSH bands.
    pub b: usize,
    /// Number of rows per band.
    pub r: usize,
    /// Total MinHash signature length (`b * r`).
    pub n: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_to_20_5_100() {
        let cfg = CacheConfig::default();
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands, BandConfig { b: 20, r: 5, n: 100 });
    }

    #[test]
    fn resolve_from_n_only_factors_evenly() {
        let cfg = CacheConfig::new().with_n(100);
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands.b * bands.r, 100);
        assert_eq!(bands, BandConfig { b: 10, r: 10, n: 100 });
    }

    #[test]
    fn resolve_from_prime_n_fails() {
        let cfg = CacheConfig::new().with_n(97);
        assert!(matches!(
            cfg.resolve_bands(),
            Err(LshError::ConfigError { .. })
        ));
    }

    #[test]
    fn resolve_from_n_and_b_divides_exactly() {
        let cfg = CacheConfig::new().with_n(100).with_b(25);
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands, BandConfig { b: 25, r: 4, n: 100 });
    }

    #[test]
    fn resolve_from_n_and_r_divides_exactly() {
        let cfg = CacheConfig::new().with_n(100).with_r(4);
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands, BandConfig { b: 25, r: 4, n: 100 });
    }

    #[test]
    fn resolve_from_n_and_b_inexact_fails() {
        let cfg = CacheConfig::new().with_n(100).with_b(30);
        assert!(matches!(
            cfg.resolve_bands(),
            Err(LshError::ConfigError { .. })
        ));
    }

    #[test]
    fn resolve_from_b_and_r_only() {
        let cfg = CacheConfig::new().with_b(20).with_r(5);
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands, BandConfig { b: 20, r: 5, n: 100 });
    }

    #[test]
    fn resolve_from_all_three_consistent() {
        let cfg = CacheConfig::new().with_b(20).with_r(5).with_n(100);
        let bands = cfg.resolve_bands().unwrap();
        assert_eq!(bands, BandConfig { b: 20, r: 5, n: 100 });
    }

    #[test]
    fn resolve_from_all_three_inconsistent_fails() {
        let cfg = CacheConfig::new().with_b(20).with_r(5).with_n(99);
        assert!(matches!(
            cfg.resolve_bands(),
            Err(LshError::ConfigError { .. })
        ));
    }

    #[test]
    fn resolve_from_b_only_fails() {
        let cfg = CacheConfig::new().with_b(20);
        assert!(matches!(
            cfg.resolve_bands(),
            Err(LshError::ConfigError { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_k_min() {
        let cfg = CacheConfig::new().with_k_range(0, 3);
        assert!(matches!(cfg.validate(), Err(LshError::ConfigError { .. })));
    }

    #[test]
    fn validate_rejects_inverted_k_range() {
        let cfg = CacheConfig::new().with_k_range(5, 2);
        assert!(matches!(cfg.validate(), Err(LshError::ConfigError { .. })));
    }

    #[test]
    fn validate_rejects_zero_universe() {
        let cfg = CacheConfig::new().with_universe_size(0);
        assert!(matches!(cfg.validate(), Err(LshError::ConfigError { .. })));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = CacheConfig::new()
            .with_b(25)
            .with_r(4)
            .with_universe_size(999_983)
            .with_seed(12345)
            .with_k(2)
            .with_minhash(MinHashVariant::Xor)
            .with_store_signatures(true)
            .with_accumulator(AccumulatorKind::DocId)
            .with_parallel(true);

        assert_eq!(cfg.b, Some(25));
        assert_eq!(cfg.r, Some(4));
        assert_eq!(cfg.universe_size, 999_983);
        assert_eq!(cfg.seed, 12345);
        assert_eq!(cfg.k_min, 2);
        assert_eq!(cfg.k_max, 2);
        assert_eq!(cfg.minhash, MinHashVariant::Xor);
        assert!(cfg.store_signatures);
        assert_eq!(cfg.accumulator, AccumulatorKind::DocId);
        assert!(cfg.use_parallel);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = CacheConfig::new().with_b(25).with_r(4).with_seed(7);
        let serialized = serde_json::to_string(&cfg).unwrap();
        let deserialized: CacheConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }
}
