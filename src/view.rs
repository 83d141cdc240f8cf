use crate::data::aggregate::{ValueCount, count_by};
use crate::data::filter::{FilterSelection, apply};
use crate::data::model::{Attribute, Table};

// ---------------------------------------------------------------------------
// DashboardView – everything the table and chart pages render
// ---------------------------------------------------------------------------

/// Result of running the filter-and-count pipeline for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Records passing the selection, in source order.
    pub rows: Table,
    pub by_category: Vec<ValueCount>,
    pub by_submitter: Vec<ValueCount>,
    pub by_gender: Vec<ValueCount>,
    pub by_indication: Vec<ValueCount>,
}

impl DashboardView {
    pub fn build(table: &Table, selection: &FilterSelection) -> Self {
        let rows = apply(table, selection);
        log::debug!(
            "selection {:?} keeps {} of {} records",
            selection,
            rows.len(),
            table.len()
        );
        DashboardView {
            by_category: count_by(&rows, Attribute::Category),
            by_submitter: count_by(&rows, Attribute::Name),
            by_gender: count_by(&rows, Attribute::Gender),
            by_indication: count_by(&rows, Attribute::Indication),
            rows,
        }
    }

    /// Number of records shown ("Total de Registros Exibidos").
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::sample_table;

    #[test]
    fn unfiltered_view_counts_everything() {
        let view = DashboardView::build(&sample_table(), &FilterSelection::default());
        assert_eq!(view.total(), 3);
        assert_eq!(
            view.by_submitter,
            vec![ValueCount::new("Ana", 2), ValueCount::new("Bia", 1)]
        );
        assert_eq!(view.by_gender, vec![ValueCount::new("F", 3)]);
    }

    #[test]
    fn charts_follow_the_selection() {
        let selection = FilterSelection {
            category: Some("Livro".into()),
            genders: BTreeSet::new(),
        };
        let view = DashboardView::build(&sample_table(), &selection);
        assert_eq!(view.total(), 1);
        assert_eq!(view.by_category, vec![ValueCount::new("Livro", 1)]);
        assert_eq!(view.by_indication, vec![ValueCount::new("Livro de Bia", 1)]);
    }

    #[test]
    fn empty_selection_result_renders_empty_series() {
        let selection = FilterSelection {
            category: Some("Jogo".into()),
            genders: BTreeSet::new(),
        };
        let view = DashboardView::build(&sample_table(), &selection);
        assert_eq!(view, DashboardView::default());
    }
}
