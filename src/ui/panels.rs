use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};

/// Combo-box entry meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "Todos";

/// How a blank cell value is shown in widgets and charts.
pub fn display_value(value: &str) -> &str {
    if value.is_empty() { "(vazio)" } else { value }
}

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

pub fn nav_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navegação");
    ui.separator();
    ui.label("Ir para:");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }
}

// ---------------------------------------------------------------------------
// Filter widgets (table and chart pages)
// ---------------------------------------------------------------------------

/// Category combo box and gender multi-select. Applies changes to `state`
/// once the widgets are drawn.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    // Clone what we need so we can mutate state after the widgets.
    let options = state.options.clone();
    let mut category = state.selection.category.clone();
    let mut toggled: Option<String> = None;
    let mut clear = false;

    egui::ComboBox::from_label("Filtrar por Categoria (opcional):")
        .selected_text(category.as_deref().map_or(ALL_CATEGORIES, display_value))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut category, None, ALL_CATEGORIES);
            for value in &options.categories {
                ui.selectable_value(&mut category, Some(value.clone()), display_value(value));
            }
        });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("Filtrar por Gênero (opcional):");
        for value in &options.genders {
            let mut checked = state.selection.genders.contains(value);
            if ui.checkbox(&mut checked, display_value(value)).changed() {
                toggled = Some(value.clone());
            }
        }
    });

    if !state.selection.is_unrestricted() && ui.small_button("Limpar filtros").clicked() {
        clear = true;
    }

    state.set_category(category);
    if let Some(gender) = toggled {
        state.toggle_gender(&gender);
    }
    if clear {
        state.clear_filters();
    }
}

/// Placeholder for pages that need data while none is loaded.
pub fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Nenhum dado carregado  (Arquivo → Abrir…)");
    });
}

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

pub fn home_page(ui: &mut Ui) {
    ui.heading("Bem-vindo ao Dashboard de Sugestões");
    ui.label("Use o menu lateral para navegar entre as páginas.");
}

pub fn form_page(ui: &mut Ui, form_url: &str) {
    ui.heading("Formulário");
    ui.label("Para acesso do formulário acesse o link abaixo");
    ui.hyperlink_to("Clique aqui para acessar o formulário", form_url);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} indicações carregadas, {} visíveis",
                table.len(),
                state.view.total()
            ));
            if let Some(source) = &state.source {
                ui.label(RichText::new(source.path().display().to_string()).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir base de indicações")
        .add_filter("Arquivos suportados", &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"])
        .add_filter("Planilha", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_get_a_visible_label() {
        assert_eq!(display_value(""), "(vazio)");
        assert_eq!(display_value("Filme"), "Filme");
    }
}
