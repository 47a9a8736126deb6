//! Per-title view aggregation

use crate::record::PageviewRecord;
use crate::sort::sort_records;
use std::collections::HashMap;

/// Sums views of accepted records by title
///
/// Aggregators built over disjoint slices of the input can be combined with
/// [`Aggregator::merge`] before the final sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    views: HashMap<String, u64>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one accepted record (`en` and `en.m` views of a title are summed)
    pub fn add(&mut self, record: &PageviewRecord) {
        self.add_views(&record.title, record.views);
    }

    pub fn add_views(&mut self, title: &str, views: u64) {
        match self.views.get_mut(title) {
            Some(total) => *total = total.saturating_add(views),
            None => {
                self.views.insert(title.to_string(), views);
            }
        }
    }

    /// Fold another aggregator into this one
    pub fn merge(&mut self, other: Aggregator) {
        for (title, views) in other.views {
            let total = self.views.entry(title).or_insert(0);
            *total = total.saturating_add(views);
        }
    }

    pub fn get(&self, title: &str) -> Option<u64> {
        self.views.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Ordered result: views descending, title ascending
    pub fn into_sorted(self) -> Vec<(String, u64)> {
        sort_records(&self.views)
    }
}
