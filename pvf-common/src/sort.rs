//! Record sorting
//!
//! Produces a total order over `(title, views)` pairs: views descending, ties
//! broken by title ascending. The result never depends on the iteration order
//! of the source map.

use std::cmp::Ordering;

/// Composite comparator: views descending, then title ascending
pub fn compare_records(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Sort a title → views mapping into an ordered sequence.
///
/// Accepts any map iterated by reference (`&HashMap`, `&BTreeMap`). The input
/// is not modified.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use pvf_common::sort::sort_records;
///
/// let records = HashMap::from([("a".to_string(), 1), ("b".to_string(), 3)]);
/// assert_eq!(sort_records(&records), vec![("b".to_string(), 3), ("a".to_string(), 1)]);
/// ```
pub fn sort_records<'a, I>(records: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (&'a String, &'a u64)>,
{
    let mut sorted: Vec<(String, u64)> = records
        .into_iter()
        .map(|(title, views)| (title.clone(), *views))
        .collect();
    sorted.sort_by(compare_records);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    fn entry(title: &str, views: u64) -> (String, u64) {
        (title.to_string(), views)
    }

    #[test]
    fn test_sort_records_total_order() {
        let records: BTreeMap<String, u64> = [("a", 1), ("b", 1), ("c", 2), ("d", 3), ("e", 4)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        assert_eq!(
            sort_records(&records),
            vec![entry("e", 4), entry("d", 3), entry("c", 2), entry("a", 1), entry("b", 1)]
        );
    }

    #[test]
    fn test_sort_records_independent_of_map_type() {
        let pairs = [("x", 5), ("b", 5), ("m", 9), ("a", 0)];
        let hash: HashMap<String, u64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let tree: BTreeMap<String, u64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();

        let expected = vec![entry("m", 9), entry("b", 5), entry("x", 5), entry("a", 0)];
        assert_eq!(sort_records(&hash), expected);
        assert_eq!(sort_records(&tree), expected);
    }

    #[test]
    fn test_sort_records_empty() {
        let records: HashMap<String, u64> = HashMap::new();
        assert!(sort_records(&records).is_empty());
    }

    #[test]
    fn test_sort_records_single_entry() {
        let records = HashMap::from([("Only".to_string(), 7)]);
        assert_eq!(sort_records(&records), vec![entry("Only", 7)]);
    }

    #[test]
    fn test_sort_records_equal_counts_by_title() {
        let records: HashMap<String, u64> = ["Zeta", "Alpha", "Mu", "alpha"]
            .iter()
            .map(|t| (t.to_string(), 3))
            .collect();
        let titles: Vec<String> = sort_records(&records).into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Alpha", "Mu", "Zeta", "alpha"]);
    }

    #[test]
    fn test_sort_records_does_not_mutate_input() {
        let records = HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let before = records.clone();
        let _ = sort_records(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_compare_records() {
        assert_eq!(compare_records(&entry("a", 2), &entry("b", 1)), Ordering::Less);
        assert_eq!(compare_records(&entry("a", 1), &entry("b", 1)), Ordering::Less);
        assert_eq!(compare_records(&entry("b", 1), &entry("a", 1)), Ordering::Greater);
        assert_eq!(compare_records(&entry("a", 1), &entry("a", 1)), Ordering::Equal);
    }
}
