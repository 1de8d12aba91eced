//! Splits a MinHash signature into band keys for bucket lookup.

use xxhash_rust::xxh3::xxh3_64_with_seed;

const BAND_HASH_SEED: u64 = 0x4C53_4842_414E_4453; // "LSHBANDS"

/// Split `signature` into `b` bands of `r` rows each and hash every band to
/// a single `u64` key with a fixed-seed xxHash3 finalizer.
///
/// `signature.len()` must equal `b * r`; callers always pass a signature
/// produced from a [`crate::config::BandConfig`]-sized `HashFamily`, so this
/// is an invariant rather than a validated input.
pub fn band_keys(signature: &[u64], b: usize, r: usize) -> Vec<u64> {
    debug_assert_eq!(signature.len(), b * r, "signature length must equal b * r");
    signature
        .chunks(r)
        .take(b)
        .map(|band| hash_band(band))
        .collect()
}

fn hash_band(band: &[u64]) -> u64 {
    let mut bytes = Vec::with_capacity(band.len() * 8);
    for &v in band {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    xxh3_64_with_seed(&bytes, BAND_HASH_SEED)
}
