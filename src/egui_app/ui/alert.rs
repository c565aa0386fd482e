use super::EguiApp;
use super::style;
use eframe::egui::{self, Align2, RichText};

impl EguiApp {
    /// Modal title, message and OK button for the pending alert.
    pub(super) fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.controller.ui.alert.clone() else {
            return;
        };
        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            self.controller.dismiss_alert();
            return;
        }
        let palette = style::palette();
        let mut dismissed = false;
        egui::Window::new(RichText::new(&alert.title).strong())
            .id(egui::Id::new("blocking_alert"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(RichText::new(&alert.message).color(palette.text_primary));
                ui.add_space(10.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.controller.dismiss_alert();
        }
    }
}
