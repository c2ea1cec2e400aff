mod app;
mod ui;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use plm_gui::actions;
pub use plm_gui::i18n;
pub use plm_gui::state;

use app::PlmApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plm_gui=info,plm_client=info".into()),
        )
        .init();

    let settings = state::AppSettings::load();
    tracing::info!("Catalog service at {}", settings.client.base_url());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PLM Catalog")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([520.0, 360.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "plm-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(PlmApp::new(cc, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
