use super::EguiApp;
use super::style;
use crate::session::MetricsLoad;
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText};

const COUNTRY_PLACEHOLDER: &str = "-- Choose a country --";

impl EguiApp {
    pub(super) fn render_contribution(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading(RichText::new("Your Contribution").color(palette.text_primary));
        ui.label(
            RichText::new("Describe what you have done for the environment.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);

        let loading = self.controller.contribution().is_loading();
        ui.add(
            egui::TextEdit::multiline(self.controller.contribution_mut().actions_mut())
                .hint_text("e.g. I biked to work and installed solar panels")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        self.render_country_picker(ui);
        ui.add_space(8.0);

        let label = if loading {
            "Analyzing..."
        } else {
            "Analyze my Contributions"
        };
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!loading, egui::Button::new(label))
                .clicked()
            {
                self.controller.submit_contribution();
            }
            if loading {
                ui.spinner();
            }
        });
        ui.add_space(12.0);

        if let Some(response) = self.controller.contribution().response() {
            Frame::new()
                .fill(palette.bg_card)
                .corner_radius(CornerRadius::same(8))
                .inner_margin(Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(response).color(palette.insight_text));
                });
        }
    }

    fn render_country_picker(&mut self, ui: &mut egui::Ui) {
        let session = self.controller.contribution();
        if matches!(session.metrics(), MetricsLoad::Loading(_)) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading countries...");
            });
            return;
        }
        let countries = session.countries().to_vec();
        let mut selected = session.selected_country().map(str::to_string);
        let before = selected.clone();
        egui::ComboBox::from_id_salt("contribution_country")
            .width(ui.available_width().min(320.0))
            .selected_text(selected.as_deref().unwrap_or(COUNTRY_PLACEHOLDER))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, COUNTRY_PLACEHOLDER);
                for country in &countries {
                    ui.selectable_value(&mut selected, Some(country.clone()), country.as_str());
                }
            });
        if selected != before {
            self.controller.contribution_mut().select_country(selected);
        }
    }
}
