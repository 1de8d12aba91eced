//! The theoretical LSH S-curve: probability that a pair at a given Jaccard
//! similarity lands in at least one shared band.

/// `1 - (1 - s^r)^b`, the probability that two documents whose shingle sets
/// have Jaccard similarity `s` share at least one band under a `(b, r)`
/// banding scheme.
pub fn theoretical_percent_found(b: usize, r: usize, s: f64) -> f64 {
    1.0 - (1.0 - s.powi(r as i32)).powi(b as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_similarity_finds_nothing() {
        assert_eq!(theoretical_percent_found(20, 5, 0.0), 0.0);
    }

    #[test]
    fn identical_documents_always_found() {
        let p = theoretical_percent_found(20, 5, 1.0);
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn curve_is_monotonic_in_similarity() {
        let mut last = 0.0;
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            let p = theoretical_percent_found(20, 5, s);
            assert!(p >= last - 1e-12);
            last = p;
        }
    }

    #[test]
    fn matches_hand_computed_midpoint() {
        // b=20, r=5, s=0.5: 1 - (1 - 0.5^5)^20
        let expected = 1.0 - (1.0_f64 - 0.5_f64.powi(5)).powi(20);
        assert!((theoretical_percent_found(20, 5, 0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn more_bands_increases_recall_at_fixed_rows() {
        let low = theoretical_percent_found(5, 5, 0.3);
        let high = theoretical_percent_found(50, 5, 0.3);
        assert!(high > low);
    }

    #[test]
    fn more_rows_sharpens_the_threshold() {
        let below_threshold_wide = theoretical_percent_found(20, 2, 0.3);
        let below_threshold_narrow = theoretical_percent_found(20, 10, 0.3);
        assert!(below_threshold_narrow < below_threshold_wide);
    }
}
