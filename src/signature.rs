//! Reduces a shingle fingerprint set to a fixed-length MinHash signature.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::hash_family::HashFamily;

/// Compute the `n`-wide MinHash signature of `shingles` under `family`,
/// reducing every hash output modulo `universe_size`.
///
/// An empty shingle set yields the all-sentinel signature (`u64::MAX`
/// everywhere): two empty documents are therefore mutual LSH candidates,
/// which is accepted rather than special-cased away.
pub fn minhash_signature(
    shingles: &HashSet<u64>,
    family: &HashFamily,
    universe_size: u64,
    use_parallel: bool,
) -> Vec<u64> {
    let n = family.len();
    if n == 0 {
        return Vec::new();
    }
    if shingles.is_empty() {
        return vec![u64::MAX; n];
    }

    let shingles: Vec<u64> = shingles.iter().copied().collect();

    if use_parallel {
        compute_parallel(&shingles, family, universe_size, n)
    } else {
        compute_sequential(&shingles, family, universe_size, n)
    }
}

fn compute_sequential(shingles: &[u64], family: &HashFamily, universe_size: u64, n: usize) -> Vec<u64> {
    (0..n)
        .map(|slot| compute_slot(shingles, family, universe_size, slot))
        .collect()
}

fn compute_parallel(shingles: &[u64], family: &HashFamily, universe_size: u64, n: usize) -> Vec<u64> {
    (0..n)
        .into_par_iter()
        .map(|slot| compute_slot(shingles, family, universe_size, slot))
        .collect()
}

fn compute_slot(shingles: &[u64], family: &HashFamily, universe_size: u64, slot: usize) -> u64 {
    shingles
        .iter()
        .map(|&x| family.hash(slot, x) % universe_size)
        .min()
        .expect("shingles checked non-empty by caller")
}
