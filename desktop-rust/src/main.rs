mod app;
mod io;
mod model;

use app::DesktopApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Tactic Tagger",
        options,
        Box::new(|_cc| Box::new(DesktopApp::default())),
    )
}
