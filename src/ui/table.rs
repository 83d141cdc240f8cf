use eframe::egui::{self, Align, Layout, RichText, ScrollArea, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Attribute, Table};
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// "Tabela" page
// ---------------------------------------------------------------------------

pub fn table_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Tabela de Dados");

    if state.table.is_none() {
        panels::no_data(ui);
        return;
    }

    panels::filter_bar(ui, state);
    ui.add_space(8.0);
    metric(ui, "Total de Registros Exibidos", state.view.total());
    ui.add_space(8.0);

    records_table(ui, &state.view.rows);
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value.to_string()).size(28.0).strong());
    });
}

/// Scrollable table with one column per attribute. The link column shows a
/// hyperlink only for records that carry one.
fn records_table(ui: &mut Ui, rows: &Table) {
    let row_height = ui.text_style_height(&TextStyle::Body) + 6.0;

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::initial(280.0).at_least(120.0).clip(true))
            .column(Column::remainder().at_least(70.0))
            .header(24.0, |mut header| {
                for attribute in Attribute::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(attribute.display_label());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, rows.len(), |mut row| {
                    let Some(record) = rows.get(row.index()) else {
                        return;
                    };
                    row.col(|ui: &mut Ui| {
                        ui.label(&record.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&record.category);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&record.gender);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.add(egui::Label::new(&record.indication).truncate());
                    });
                    row.col(|ui: &mut Ui| {
                        if let Some(link) = &record.link {
                            ui.hyperlink_to("Acessar", link);
                        }
                    });
                });
            });
    });
}
