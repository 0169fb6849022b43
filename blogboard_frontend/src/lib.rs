pub mod aggregate;
pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod resource;
pub mod routing;
pub mod session;
pub mod validation;

use anyhow::anyhow;
use eframe::{self, egui};

pub use app::BlogboardApp;
pub use config::FrontendConfig;

/// Launches the egui application with default window options.
pub fn run_frontend() -> anyhow::Result<()> {
    run_frontend_with_options(default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(options: eframe::NativeOptions) -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(false).try_init();
    let config = FrontendConfig::load()?;
    log::info!(
        "starting frontend against {} (session file {})",
        config.api_base_url,
        config.session_file.display()
    );
    eframe::run_native(
        "Blogboard",
        options,
        Box::new(move |cc| {
            let app = BlogboardApp::new(cc, config)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|err| anyhow!("frontend exited with error: {err}"))
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Blogboard")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    }
}
