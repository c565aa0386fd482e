//! Entry point for the egui-based CarbonFlo UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use carbonflo::config;
use carbonflo::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use carbonflo::logging::{self, ConsoleTarget};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init(ConsoleTarget::Stdout) {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default();
    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([720.0, 820.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "CarbonFlo",
        native_options,
        Box::new(move |_cc| match settings {
            Ok(settings) => Ok(Box::new(EguiApp::new(&settings))),
            Err(err) => {
                tracing::error!("Failed to load config: {err}");
                Ok(Box::new(LaunchError {
                    message: format!("Failed to load config: {err}"),
                }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start CarbonFlo");
                ui.label(&self.message);
            });
        });
    }
}
