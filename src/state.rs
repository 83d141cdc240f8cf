use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::data::filter::{FilterOptions, FilterSelection};
use crate::data::loader::DatasetSource;
use crate::data::model::Table;
use crate::view::DashboardView;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Table,
    Charts,
    Form,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Table, Page::Charts, Page::Form];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Página Inicial",
            Page::Table => "Tabela",
            Page::Charts => "Gráficos",
            Page::Form => "Formulário",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Handle over the file currently shown.
    pub source: Option<DatasetSource>,

    /// Loaded table (None until a load succeeds).
    pub table: Option<Arc<Table>>,

    /// Choices for the category / gender widgets.
    pub options: FilterOptions,

    /// Current filter widgets' state, shared by the table and chart pages.
    pub selection: FilterSelection,

    /// Pipeline output for `selection` (cached).
    pub view: DashboardView,

    pub page: Page,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
            table: None,
            options: FilterOptions::default(),
            selection: FilterSelection::default(),
            view: DashboardView::default(),
            page: Page::default(),
            status_message: None,
        }
    }

    /// Load the file named in the settings.
    pub fn open_configured(&mut self) {
        let path = self.settings.data.clone();
        self.open(path);
    }

    /// Point the dashboard at `path`. The previous table stays on screen if
    /// the new one fails to load.
    pub fn open(&mut self, path: PathBuf) {
        let source = DatasetSource::new(path, self.settings.sheet.clone());
        match source.load() {
            Ok(table) => {
                self.settings.data = source.path().to_path_buf();
                self.source = Some(source);
                self.set_table(table);
            }
            Err(e) => {
                log::error!(
                    "Failed to load {} (sheet {}): {e}",
                    source.path().display(),
                    source.sheet()
                );
                self.status_message = Some(format!("Erro: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table, reset the filters and recompute the view.
    pub fn set_table(&mut self, table: Arc<Table>) {
        self.options = FilterOptions::from_table(&table);
        self.selection = FilterSelection::default();
        self.view = DashboardView::build(&table, &self.selection);
        self.table = Some(table);
        self.status_message = None;
    }

    /// Recompute `view` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.view = DashboardView::build(table, &self.selection);
        }
    }

    /// Choose a category; `None` is "Todos".
    pub fn set_category(&mut self, category: Option<String>) {
        if self.selection.category != category {
            self.selection.category = category;
            self.refilter();
        }
    }

    /// Toggle a single gender in the multi-select.
    pub fn toggle_gender(&mut self, gender: &str) {
        self.selection.toggle_gender(gender);
        self.refilter();
    }

    /// Drop both filters.
    pub fn clear_filters(&mut self) {
        if !self.selection.is_unrestricted() {
            self.selection = FilterSelection::default();
            self.refilter();
        }
    }
}
