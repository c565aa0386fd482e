use super::EguiApp;
use super::chart_math::{hit_point, point_positions};
use super::style;
use crate::metrics::format_likelihood;
use crate::session::{MetricsLoad, Tooltip};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Sense, Stroke, StrokeKind};

const CHART_HEIGHT: f32 = 320.0;
const CHART_PADDING: f32 = 16.0;
const POINT_RADIUS: f32 = 5.0;
const HIT_RADIUS: f32 = 10.0;
const TOOLTIP_WIDTH: f32 = 260.0;

impl EguiApp {
    pub(super) fn render_trends(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading(
            RichText::new("Likelihood of meeting Paris Agreement goals")
                .color(palette.text_primary),
        );
        ui.label(RichText::new("Click a point for an AI insight.").color(palette.text_muted));
        ui.add_space(8.0);

        let failure = match self.controller.trends().metrics() {
            MetricsLoad::Idle | MetricsLoad::Loading(_) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading Climate Data...");
                });
                return;
            }
            MetricsLoad::Failed(err) => Some(err.clone()),
            MetricsLoad::Ready(_) => None,
        };
        match failure {
            Some(err) => {
                ui.label(RichText::new(err).color(palette.warning));
            }
            None => self.render_chart(ui),
        }

        if let Some(tooltip) = self.controller.tooltip().cloned() {
            self.render_tooltip(ui.ctx(), &tooltip);
        }
    }

    fn render_chart(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let frame_rect = response.rect;
        painter.rect_filled(frame_rect, CornerRadius::same(8), egui::Color32::WHITE);
        painter.rect_stroke(
            frame_rect,
            CornerRadius::same(8),
            style::card_border(),
            StrokeKind::Inside,
        );

        let plot = frame_rect.shrink(CHART_PADDING);
        for step in 0..=4 {
            let y = plot.bottom() - plot.height() * step as f32 / 4.0;
            painter.line_segment(
                [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
                Stroke::new(1.0, palette.grid),
            );
        }

        let points = point_positions(plot, self.controller.trends().chart_values());
        if points.len() > 1 {
            painter.add(egui::Shape::line(points.clone(), style::chart_line()));
        }
        for point in &points {
            painter.circle_filled(*point, POINT_RADIUS, palette.accent_orange);
        }

        if response.clicked() {
            let Some(pointer) = response.interact_pointer_pos() else {
                return;
            };
            match hit_point(&points, pointer, HIT_RADIUS) {
                Some(index) => {
                    let point = points[index];
                    self.controller.click_chart_point(index, point.x, point.y);
                }
                None => self.controller.dismiss_tooltip(),
            }
        }
    }

    fn render_tooltip(&mut self, ctx: &egui::Context, tooltip: &Tooltip) {
        let palette = style::palette();
        let screen = ctx.viewport_rect();
        let x = (tooltip.x + 12.0).min(screen.right() - TOOLTIP_WIDTH - 8.0);
        let y = tooltip.y + 12.0;
        let mut close = false;
        egui::Area::new(egui::Id::new("chart_tooltip"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(x.max(screen.left()), y))
            .show(ctx, |ui| {
                Frame::new()
                    .fill(palette.bg_card)
                    .corner_radius(CornerRadius::same(8))
                    .inner_margin(Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(TOOLTIP_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(&tooltip.country)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("x").clicked() {
                                        close = true;
                                    }
                                },
                            );
                        });
                        ui.label(
                            RichText::new(format!(
                                "Likelihood: {}%",
                                format_likelihood(tooltip.likelihood)
                            ))
                            .color(egui::Color32::WHITE),
                        );
                        ui.label(
                            RichText::new(format!("Target Year: {}", tooltip.year))
                                .color(egui::Color32::WHITE),
                        );
                        ui.add_space(4.0);
                        ui.horizontal_wrapped(|ui| {
                            if tooltip.pending {
                                ui.spinner();
                            }
                            ui.label(RichText::new(&tooltip.insight).color(palette.insight_text));
                        });
                    });
            });
        if close {
            self.controller.dismiss_tooltip();
        }
    }
}
