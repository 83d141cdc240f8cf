use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::model::{Attribute, Table};

/// Occurrences of one distinct attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        ValueCount {
            value: value.into(),
            count,
        }
    }
}

/// Count records per distinct value of `attribute`.
///
/// Blank values form their own `""` group. The result is sorted by
/// descending count; equal counts keep the order in which the value first
/// appeared in `table`.
pub fn count_by(table: &Table, attribute: Attribute) -> Vec<ValueCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for record in table {
        let value = record.value(attribute);
        match slots.entry(value) {
            Entry::Occupied(slot) => counts[*slot.get()].count += 1,
            Entry::Vacant(slot) => {
                slot.insert(counts.len());
                counts.push(ValueCount::new(value, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// A count together with its percentage of the total, for pie labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Percentages of each count against the sum of all counts.
pub fn shares(counts: &[ValueCount]) -> Vec<Share> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|c| Share {
            value: c.value.clone(),
            count: c.count,
            percent: c.count as f64 * 100.0 / total as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::{record, sample_table};

    #[test]
    fn counts_categories() {
        assert_eq!(
            count_by(&sample_table(), Attribute::Category),
            vec![ValueCount::new("Filme", 2), ValueCount::new("Livro", 1)]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        let table = Table::new(vec![
            record("Caio", "Série", "M"),
            record("Ana", "Filme", "F"),
            record("Bia", "Livro", "F"),
            record("Ana", "Livro", "F"),
            record("Davi", "Filme", "M"),
        ]);
        assert_eq!(
            count_by(&table, Attribute::Category),
            vec![
                ValueCount::new("Filme", 2),
                ValueCount::new("Livro", 2),
                ValueCount::new("Série", 1),
            ]
        );
        assert_eq!(
            count_by(&table, Attribute::Name),
            vec![
                ValueCount::new("Ana", 2),
                ValueCount::new("Caio", 1),
                ValueCount::new("Bia", 1),
                ValueCount::new("Davi", 1),
            ]
        );
    }

    #[test]
    fn blank_values_are_a_group() {
        let table = Table::new(vec![
            record("Ana", "", "F"),
            record("Bia", "Filme", ""),
            record("Caio", "", "F"),
        ]);
        assert_eq!(
            count_by(&table, Attribute::Category),
            vec![ValueCount::new("", 2), ValueCount::new("Filme", 1)]
        );
        // every record in the fixture lacks a link
        assert_eq!(count_by(&table, Attribute::Link), vec![ValueCount::new("", 3)]);
    }

    #[test]
    fn counts_sum_to_table_size() {
        let table = sample_table();
        for attribute in Attribute::ALL {
            let total: usize = count_by(&table, attribute).iter().map(|c| c.count).sum();
            assert_eq!(total, table.len(), "{attribute:?}");
        }
    }

    #[test]
    fn empty_table_has_no_counts() {
        assert!(count_by(&Table::default(), Attribute::Gender).is_empty());
        assert!(shares(&[]).is_empty());
    }

    #[test]
    fn shares_are_percentages() {
        let s = shares(&[ValueCount::new("F", 3), ValueCount::new("M", 1)]);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].count, 3);
        assert!((s[0].percent - 75.0).abs() < 1e-9);
        assert!((s[1].percent - 25.0).abs() < 1e-9);
    }
}
