use std::collections::{BTreeMap, HashMap};

use log::error;
use shared::Category;
use strum::IntoEnumIterator;

/// Per-category counters shown on the dashboard.
///
/// Counters only move through [`TallyStore::increment`] and
/// [`TallyStore::reset_all`]; nothing here decides *whether* an item
/// counts, that is the deduplicator's job.
#[derive(Debug)]
pub struct TallyStore {
    counts: HashMap<Category, u64>,
}

impl TallyStore {
    pub fn new() -> Self {
        Self {
            counts: Category::iter()
                .filter(Category::is_countable)
                .map(|category| (category, 0))
                .collect(),
        }
    }

    /// Adds one item to the category's counter and returns the new
    /// count.
    ///
    /// Non-countable categories reaching this point are a caller bug.
    /// Policy: log loudly and book the item under `trash` rather than
    /// lose it.
    pub fn increment(&mut self, category: Category) -> u64 {
        let bucket = if category.is_countable() {
            category
        } else {
            error!("tally increment for non-countable category {category}, booking under trash");
            Category::Trash
        };
        let count = self.counts.entry(bucket).or_insert(0);
        *count += 1;
        *count
    }

    pub fn reset_all(&mut self) {
        for count in self.counts.values_mut() {
            *count = 0;
        }
    }

    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Current counters in stable display order.
    pub fn snapshot(&self) -> BTreeMap<Category, u64> {
        self.counts.iter().map(|(c, n)| (*c, *n)).collect()
    }
}

impl Default for TallyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_countable_categories_start_at_zero() {
        let tally = TallyStore::new();
        let snapshot = tally.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert!(snapshot.values().all(|&count| count == 0));
    }

    #[test]
    fn increment_returns_the_new_count() {
        let mut tally = TallyStore::new();
        assert_eq!(tally.increment(Category::Can), 1);
        assert_eq!(tally.increment(Category::Can), 2);
        assert_eq!(tally.increment(Category::Paper), 1);
        assert_eq!(tally.count(Category::Can), 2);
        assert_eq!(tally.count(Category::Plastic), 0);
    }

    #[test]
    fn reset_all_zeroes_every_category() {
        let mut tally = TallyStore::new();
        tally.increment(Category::Can);
        tally.increment(Category::Trash);
        tally.reset_all();
        assert!(tally.snapshot().values().all(|&count| count == 0));
    }

    #[test]
    fn non_countable_categories_are_booked_under_trash() {
        let mut tally = TallyStore::new();
        tally.increment(Category::Unknown);
        assert_eq!(tally.count(Category::Trash), 1);
        assert_eq!(tally.count(Category::Unknown), 0);
    }
}
