use eframe::egui;

use crate::config::Settings;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IndicationApp {
    pub state: AppState,
}

impl IndicationApp {
    /// Dark theme like the published dashboard, then load the configured file.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut state = AppState::new(settings);
        state.open_configured();
        Self { state }
    }
}

impl eframe::App for IndicationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => panels::home_page(ui),
            Page::Table => table::table_page(ui, &mut self.state),
            Page::Charts => plot::charts_page(ui, &mut self.state),
            Page::Form => panels::form_page(ui, &self.state.settings.form_url),
        });
    }
}
