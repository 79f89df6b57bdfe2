#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod form;
mod theme;
mod utils;

fn main() -> eframe::Result<()> {
    pp_core::logging::init(false);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("PyPack Factory"),
        ..Default::default()
    };
    eframe::run_native(
        "PyPack Factory",
        options,
        Box::new(|_cc| Box::new(app::PpApp::default())),
    )
}
