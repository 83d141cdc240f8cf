use std::collections::BTreeSet;

use super::model::{Attribute, Record, Table};

// ---------------------------------------------------------------------------
// Filter predicate: one category, any number of genders
// ---------------------------------------------------------------------------

/// Current filter widgets' state.
///
/// * `category == None` → the "Todos" choice, no category restriction
/// * `genders` empty → no gender restriction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub category: Option<String>,
    pub genders: BTreeSet<String>,
}

impl FilterSelection {
    /// Whether this selection lets every row through.
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && self.genders.is_empty()
    }

    /// Whether `record` passes both predicates.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            if record.category != *category {
                return false;
            }
        }
        if !self.genders.is_empty() && !self.genders.contains(&record.gender) {
            return false;
        }
        true
    }

    /// Toggle a gender in or out of the multi-select.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.genders.remove(gender) {
            self.genders.insert(gender.to_string());
        }
    }
}

/// Return indices of records that pass the selection, in table order.
pub fn filtered_indices(table: &Table, selection: &FilterSelection) -> Vec<usize> {
    if selection.is_unrestricted() {
        return (0..table.len()).collect();
    }
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Build the derived table of matching records. The input is left untouched.
pub fn apply(table: &Table, selection: &FilterSelection) -> Table {
    table.select(&filtered_indices(table, selection))
}

/// Choices offered by the filter widgets: distinct categories and genders of
/// the full table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub genders: Vec<String>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Self {
        FilterOptions {
            categories: table.unique(Attribute::Category),
            genders: table.unique(Attribute::Gender),
        }
    }
}
