use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_card: Color32,
    pub panel_outline: Color32,
    pub grid: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_sky: Color32,
    pub accent_orange: Color32,
    pub insight_text: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(0xF5, 0xF5, 0xDC),
        bg_card: Color32::from_rgb(0x2E, 0x3B, 0x32),
        panel_outline: Color32::from_rgb(0xC8, 0xC8, 0xB0),
        grid: Color32::from_rgb(0xDD, 0xDD, 0xC6),
        text_primary: Color32::from_rgb(0x22, 0x2A, 0x24),
        text_muted: Color32::from_rgb(0x6B, 0x70, 0x66),
        accent_sky: Color32::from_rgb(0x87, 0xCE, 0xEB),
        accent_orange: Color32::from_rgb(0xFF, 0xA7, 0x26),
        insight_text: Color32::from_rgb(0xB9, 0xF6, 0xCA),
        warning: Color32::from_rgb(0xC6, 0x28, 0x28),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_sky;
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.faint_bg_color = palette.grid;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent_sky;
    visuals.selection.stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.noninteractive.bg_fill = palette.bg_primary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.menu_corner_radius = CornerRadius::same(6);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_fill = palette.accent_sky;
    vis.weak_bg_fill = palette.accent_sky;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Line joining the chart points.
pub fn chart_line() -> Stroke {
    Stroke::new(2.0, palette().accent_sky)
}

pub fn card_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}
