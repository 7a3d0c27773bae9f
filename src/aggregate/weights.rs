//! Weight tables accumulated during a census
//!
//! Keys compare case-insensitively; the first spelling seen is the one
//! reported. Entries keep insertion order so ties normalize deterministically.

use ahash::AHashMap;

/// Category key -> accumulated weight
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    /// (display key, weight) in insertion order
    entries: Vec<(String, f64)>,
    /// Lowercase key -> index into `entries`
    index: AHashMap<String, usize>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` under `key`. Blank keys and non-positive or non-finite
    /// weights are ignored. Accumulated weight saturates at `f64::MAX`.
    pub fn add(&mut self, key: &str, weight: f64) {
        let key = key.trim();
        if key.is_empty() || !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        let folded = key.to_lowercase();
        match self.index.get(&folded) {
            Some(&idx) => {
                let total = &mut self.entries[idx].1;
                *total = (*total + weight).min(f64::MAX);
            }
            None => {
                self.index.insert(folded, self.entries.len());
                self.entries.push((key.to_string(), weight));
            }
        }
    }

    /// Accumulated weight for `key`, if any
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index
            .get(&key.trim().to_lowercase())
            .map(|&idx| self.entries[idx].1)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| *w).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four independent tables of one census
#[derive(Debug, Clone, Default)]
pub struct WeightTables {
    pub race: WeightTable,
    pub culture: WeightTable,
    pub language: WeightTable,
    pub terrain: WeightTable,
}

impl WeightTables {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_sums() {
        let mut table = WeightTable::new();
        table.add("Human", 100.0);
        table.add("Elf", 50.0);
        table.add("Human", 25.0);
        assert_eq!(table.get("Human"), Some(125.0));
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 175.0);
    }

    #[test]
    fn test_keys_fold_case_and_keep_first_spelling() {
        let mut table = WeightTable::new();
        table.add("Coastal", 10.0);
        table.add("COASTAL ", 5.0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().next(), Some(("Coastal", 15.0)));
        assert_eq!(table.get("coastal"), Some(15.0));
    }

    #[test]
    fn test_rejects_blank_keys_and_bad_weights() {
        let mut table = WeightTable::new();
        table.add("", 10.0);
        table.add("   ", 10.0);
        table.add("Elf", 0.0);
        table.add("Elf", -3.0);
        table.add("Elf", f64::NAN);
        table.add("Elf", f64::INFINITY);
        assert!(table.is_empty());
        assert_eq!(table.get("Elf"), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = WeightTable::new();
        for key in ["b", "a", "c", "a"] {
            table.add(key, 1.0);
        }
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_accumulated_weight_saturates() {
        let mut table = WeightTable::new();
        table.add("Forest", 1e308);
        table.add("forest", 1e308);
        assert_eq!(table.get("Forest"), Some(f64::MAX));
    }
}
