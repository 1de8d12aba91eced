//! Runs the "lipstick on a pig" corpus through the index and prints, for
//! each document, which earlier documents it was flagged as a candidate
//! near-duplicate of.

use lsh::{AccumulatorResult, CacheConfig, LSHCache};

const CORPUS: &[&str] = &[
    "lipstick on a pig",
    "you can put lipstick on a pig",
    "you may put lipstick on a pig but it's still a pig",
    "you can put lipstick on a pig it's still a pig",
    "i think they put some lipstick on a pig but it's still a pig",
    "putting lipstick on a pig",
    "you know you can put lipstick on a pig",
    "they were going to send us binders full of women",
    "they were going to send us binders of women",
    "a b c d e f",
    "a b c d f",
];

fn main() {
    env_logger::init();

    let cfg = CacheConfig::new().with_b(50).with_r(2).with_seed(12345);
    let mut cache = LSHCache::new(cfg).expect("valid configuration");

    for (id, doc) in CORPUS.iter().enumerate() {
        let tokens: Vec<&str> = doc.split_whitespace().collect();
        let result = cache.insert(&tokens, None).expect("fresh id");
        match result {
            AccumulatorResult::Dups(candidates) => {
                let mut candidates: Vec<_> = candidates.into_iter().collect();
                candidates.sort_unstable();
                println!("doc {id} (\"{doc}\") candidates: {candidates:?}");
            }
            AccumulatorResult::Id(assigned) => {
                println!("doc {id} (\"{doc}\") inserted as id {assigned}");
            }
        }
    }

    println!(
        "theoretical recall at s=0.8: {:.4}",
        cache.theoretical_percent_found(0.8)
    );
}
