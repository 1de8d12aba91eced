//! Near-duplicate detection over streams of tokenized documents, using
//! Locality-Sensitive Hashing over MinHash signatures (Chapter 3, *Mining
//! of Massive Datasets*).
//!
//! The pipeline is: tokens → [`Shingler`](shingler::Shingler) → shingle
//! fingerprints → [`minhash_signature`](signature::minhash_signature) →
//! n-wide signature → [`band_keys`](band::band_keys) → b band keys →
//! [`LSHCache`] buckets → candidate id set.
//!
//! ```
//! use lsh::{CacheConfig, LSHCache, AccumulatorResult};
//!
//! let cfg = CacheConfig::new().with_b(20).with_r(5).with_seed(12345);
//! let mut cache = LSHCache::new(cfg).unwrap();
//!
//! let a: Vec<&str> = "you can put lipstick on a pig".split(' ').collect();
//! let b: Vec<&str> = "you may put lipstick on a pig".split(' ').collect();
//!
//! cache.insert(&a, None).unwrap();
//! let result = cache.insert(&b, None).unwrap();
//! match result {
//!     AccumulatorResult::Dups(candidates) => {
//!         // near-duplicate of document 0, most likely
//!         let _ = candidates;
//!     }
//!     AccumulatorResult::Id(_) => unreachable!("default accumulator is DupSet"),
//! }
//! ```

pub mod band;
pub mod cache;
pub mod config;
pub mod curve;
pub mod error;
pub mod hash_family;
pub mod shingler;
pub mod signature;

pub use band::band_keys;
pub use cache::{AccumulatorResult, DocId, LSHCache};
pub use config::{AccumulatorKind, BandConfig, CacheConfig, MinHashVariant};
pub use curve::theoretical_percent_found;
pub use error::LshError;
pub use hash_family::HashFamily;
pub use shingler::Shingler;
pub use signature::minhash_signature;
