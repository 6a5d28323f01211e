use anyhow::anyhow;
use eframe::egui;
use ink_overlay::draw::settings_store;
use ink_overlay::gui::InkDemoApp;

fn main() -> anyhow::Result<()> {
    let (settings, load_error) = settings_store::load_or_default();
    ink_overlay::logging::init(settings.debug_logging, None)?;
    if let Some(err) = load_error {
        tracing::warn!(error = ?err, "failed to load overlay settings, using defaults");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ink Overlay",
        native_options,
        Box::new(move |_cc| Box::new(InkDemoApp::new(&settings))),
    )
    .map_err(|err| anyhow!("ink overlay demo failed: {err}"))
}
