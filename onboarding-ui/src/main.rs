// Desktop entry point for the onboarding UI
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use onboarding::Config;
use onboarding_ui::app::OnboardingApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load().context("failed to load configuration")?;
    let backend = onboarding::connect(&config.api).context("failed to create the auth backend")?;
    let title = config.application.name.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([420.0, 600.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(OnboardingApp::new(cc, config, backend)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with an error: {}", e))
}
