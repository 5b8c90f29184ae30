mod app;
mod state;
mod ui;

use app::ModulusApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Modulus Panda – Stress–Strain Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(ModulusApp::default()))),
    )
}
