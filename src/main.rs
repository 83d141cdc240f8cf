mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use app::IndicationApp;
use clap::Parser;
use config::{Args, Settings};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::from(Args::parse());
    log::info!(
        "Starting dashboard on {} (sheet {})",
        settings.data.display(),
        settings.sheet
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Formulário de Indicações",
        options,
        Box::new(|cc| Ok(Box::new(IndicationApp::new(cc, settings)))),
    )
}
