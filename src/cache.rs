//! The stateful index: shingles documents, computes MinHash signatures,
//! bands them into bucket tables, and reports near-duplicate candidates.

use std::collections::{HashMap, HashSet};

use crate::band::band_keys;
use crate::config::{AccumulatorKind, CacheConfig};
use crate::curve::theoretical_percent_found as theoretical_curve;
use crate::error::LshError;
use crate::hash_family::HashFamily;
use crate::shingler::Shingler;
use crate::signature::minhash_signature;

/// Document identifier. Assigned automatically (`next_id`) unless the
/// caller pins one explicitly.
pub type DocId = u64;

/// What [`LSHCache::insert`] hands back, matching the accumulator kind the
/// cache was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorResult {
    /// Candidate duplicate ids, excluding the id just inserted.
    Dups(HashSet<DocId>),
    /// The id just assigned.
    Id(DocId),
}

/// Tagged accumulator over what `insert` collects while walking buckets.
///
/// A tagged enum rather than a trait object: the per-band loop in
/// [`LSHCache::insert`] runs once per band per document, and static
/// dispatch on a small, closed set of variants outperforms a vtable call
/// there.
#[derive(Debug, Clone)]
enum Accumulator {
    DupSet(HashSet<DocId>),
    Id,
}

impl Accumulator {
    fn new(kind: AccumulatorKind) -> Self {
        match kind {
            AccumulatorKind::DupSet => Accumulator::DupSet(HashSet::new()),
            AccumulatorKind::DocId => Accumulator::Id,
        }
    }

    fn update(&mut self, bucket: &[DocId]) {
        if let Accumulator::DupSet(set) = self {
            set.extend(bucket.iter().copied());
        }
    }

    fn finish(self, self_id: DocId) -> AccumulatorResult {
        match self {
            Accumulator::DupSet(mut set) => {
                set.remove(&self_id);
                AccumulatorResult::Dups(set)
            }
            Accumulator::Id => AccumulatorResult::Id(self_id),
        }
    }
}

/// A Jaccard near-duplicate index over token-sequence documents.
///
/// Construction resolves `(b, r, n)` from a [`CacheConfig`] and builds a
/// [`HashFamily`] seeded for reproducibility. After that, `insert` and
/// `lookup` are the only operations; there is no eviction and no implicit
/// concurrency beyond the opt-in `rayon` fan-out inside signature
/// computation.
pub struct LSHCache {
    b: usize,
    r: usize,
    n: usize,
    universe_size: u64,
    seed: u64,
    shingler: Shingler,
    hash_family: HashFamily,
    buckets: Vec<HashMap<u64, Vec<DocId>>>,
    seen: HashMap<DocId, Option<Vec<u64>>>,
    next_id: DocId,
    store_signatures: bool,
    accumulator_kind: AccumulatorKind,
    use_parallel: bool,
}

impl LSHCache {
    /// Build a cache from a validated, resolved configuration.
    pub fn new(config: CacheConfig) -> Result<Self, LshError> {
        config.validate()?;
        let bands = config.resolve_bands()?;
        log::debug!(
            "resolved lsh configuration: b={} r={} n={}",
            bands.b,
            bands.r,
            bands.n
        );
        let hash_family = HashFamily::new(config.minhash, bands.n, config.universe_size, config.seed);
        let shingler = Shingler::with_range(config.k_min, config.k_max)?;
        Ok(Self {
            b: bands.b,
            r: bands.r,
            n: bands.n,
            universe_size: config.universe_size,
            seed: config.seed,
            shingler,
            hash_family,
            buckets: (0..bands.b).map(|_| HashMap::new()).collect(),
            seen: HashMap::new(),
            next_id: 0,
            store_signatures: config.store_signatures,
            accumulator_kind: config.accumulator,
            use_parallel: config.use_parallel,
        })
    }

    /// Number of LSH bands.
    pub fn b(&self) -> usize {
        self.b
    }

    /// Number of rows per band.
    pub fn r(&self) -> usize {
        self.r
    }

    /// Total MinHash signature length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The id that will be assigned to the next unspecified `insert`.
    pub fn next_id(&self) -> DocId {
        self.next_id
    }

    fn band_keys_for<T: AsRef<str>>(&self, doc: &[T]) -> Vec<u64> {
        let fingerprints = self
            .shingler
            .shingle_fingerprints(doc, self.seed, self.universe_size);
        let shingles: HashSet<u64> = fingerprints.into_iter().collect();
        let signature =
            minhash_signature(&shingles, &self.hash_family, self.universe_size, self.use_parallel);
        band_keys(&signature, self.b, self.r)
    }

    /// Insert a document, assigning `id` if none is given.
    ///
    /// Fails with [`LshError::DuplicateInsert`] if `id` (explicit or
    /// auto-assigned) has already been inserted.
    pub fn insert<T: AsRef<str>>(
        &mut self,
        doc: &[T],
        id: Option<DocId>,
    ) -> Result<AccumulatorResult, LshError> {
        let id = id.unwrap_or(self.next_id);
        if self.seen.contains_key(&id) {
            return Err(LshError::DuplicateInsert { id });
        }

        let band_keys = self.band_keys_for(doc);
        let mut accumulator = Accumulator::new(self.accumulator_kind);
        for (band, key) in self.buckets.iter_mut().zip(band_keys.iter()) {
            let bucket = band.entry(*key).or_default();
            accumulator.update(bucket);
            bucket.push(id);
        }

        self.seen.insert(
            id,
            if self.store_signatures {
                Some(band_keys)
            } else {
                None
            },
        );
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        log::trace!("insert id={id} complete, next_id={}", self.next_id);

        Ok(accumulator.finish(id))
    }

    /// Insert a sequence of documents in order, assigning ids automatically.
    ///
    /// A failure on one element (typically an explicit duplicate id, which
    /// this method never produces on its own) does not abort the batch.
    pub fn insert_batch<T, D>(&mut self, docs: &[D]) -> Vec<Result<AccumulatorResult, LshError>>
    where
        T: AsRef<str>,
        D: AsRef<[T]>,
    {
        log::debug!("insert_batch: {} documents", docs.len());
        docs.iter().map(|doc| self.insert(doc.as_ref(), None)).collect()
    }

    /// Read-only candidate query. Does not mutate bucket state.
    ///
    /// Supply `doc` to query by content, or `id` (with `store_signatures`
    /// enabled) to query by a previously inserted document's id. If `id` is
    /// given, it is excluded from the result.
    pub fn lookup<T: AsRef<str>>(
        &self,
        doc: Option<&[T]>,
        id: Option<DocId>,
    ) -> Result<HashSet<DocId>, LshError> {
        let band_keys = match doc {
            Some(d) if !d.is_empty() => self.band_keys_for(d),
            _ => {
                let known = id.and_then(|i| self.seen.get(&i));
                match known {
                    Some(Some(keys)) => keys.clone(),
                    _ => return Err(LshError::InvalidLookup),
                }
            }
        };

        let mut result = HashSet::new();
        for (band, key) in self.buckets.iter().zip(band_keys.iter()) {
            if let Some(bucket) = band.get(key) {
                result.extend(bucket.iter().copied());
            }
        }
        if let Some(id) = id {
            result.remove(&id);
        }
        Ok(result)
    }

    /// Probability that two documents at Jaccard similarity `s` share at
    /// least one band, under this cache's own `(b, r)`.
    pub fn theoretical_percent_found(&self, s: f64) -> f64 {
        theoretical_curve(self.b, self.r, s)
    }
}
