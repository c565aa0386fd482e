//! egui renderer for the application UI.

mod alert;
mod chart_math;
mod contribution;
mod style;
mod trends;

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{Screen, StatusTone};
use eframe::egui::{self, Frame, Margin, RichText};
use std::time::Duration;

/// Smallest window the layout still fits in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(420.0, 560.0);

/// Poll interval while requests are outstanding.
const PENDING_REPAINT: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app for the configured server.
    pub fn new(settings: &AppSettings) -> Self {
        Self::with_controller(EguiController::from_settings(settings))
    }

    pub fn with_controller(mut controller: EguiController) -> Self {
        controller.mount_active_screen();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_tabs(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("screen_tabs")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("CarbonFlo")
                            .strong()
                            .size(18.0)
                            .color(palette.text_primary),
                    );
                    ui.add_space(12.0);
                    for screen in [Screen::Trends, Screen::Contribution] {
                        let selected = self.controller.ui.screen == screen;
                        if ui.selectable_label(selected, screen.label()).clicked() && !selected {
                            self.controller.show_screen(screen);
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Reload").clicked() {
                            self.controller.reload_active_screen();
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.grid)
                    .inner_margin(Margin::symmetric(10, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                let color = match status.tone {
                    StatusTone::Idle | StatusTone::Info => palette.text_muted,
                    StatusTone::Busy => palette.text_primary,
                    StatusTone::Error => palette.warning,
                };
                ui.horizontal(|ui| {
                    if status.tone == StatusTone::Busy {
                        ui.add(egui::Spinner::new().size(12.0));
                    }
                    ui.label(RichText::new(&status.text).color(color));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_tabs(ctx);
        self.render_status(ctx);
        let blocked = self.controller.ui.alert.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| match self.controller.ui.screen {
                Screen::Trends => self.render_trends(ui),
                Screen::Contribution => self.render_contribution(ui),
            });
        });
        self.render_alert(ctx);
        if self.controller.has_pending_jobs() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}
