//! Decal Kit main entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dk_frontend=debug,dk_renderer=debug,dk_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Decal Kit");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Decal Kit"),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "dk",
        native_options,
        Box::new(|cc| Ok(Box::new(dk_frontend::DecalApp::new(cc)))),
    )
}
