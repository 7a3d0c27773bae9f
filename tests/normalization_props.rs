//! Property tests for distribution normalization

use proptest::prelude::*;

use realm_census::aggregate::{normalize, WeightTable};

fn weights() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[A-Za-z]{1,6}", -50.0f64..500.0), 0..24)
}

proptest! {
    #[test]
    fn test_fractions_sum_to_one(entries in weights()) {
        let mut table = WeightTable::default();
        for (key, weight) in &entries {
            table.add(key, *weight);
        }
        let normalized = normalize(&table);

        if table.is_empty() {
            prop_assert!(normalized.is_empty());
        } else {
            let sum: f64 = normalized.iter().map(|e| e.fraction).sum();
            prop_assert!((sum - 1.0).abs() < 1e-6, "sum was {}", sum);
        }
    }

    #[test]
    fn test_fractions_sorted_descending(entries in weights()) {
        let mut table = WeightTable::default();
        for (key, weight) in &entries {
            table.add(key, *weight);
        }
        let normalized = normalize(&table);

        for pair in normalized.windows(2) {
            prop_assert!(pair[0].fraction >= pair[1].fraction);
        }
        for entry in &normalized {
            prop_assert!(entry.fraction > 0.0 && entry.fraction <= 1.0);
        }
    }
}
