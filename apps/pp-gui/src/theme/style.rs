use super::palette;
use eframe::egui;

pub fn apply_settings(ctx: &egui::Context, is_dark: bool) {
    let colors = palette::get_colors(is_dark);
    let base = if is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals_for(base, &colors);

    style.text_styles = [
        (egui::TextStyle::Heading, egui::FontId::proportional(22.0)),
        (egui::TextStyle::Body, egui::FontId::proportional(14.0)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(12.5)),
        (egui::TextStyle::Button, egui::FontId::proportional(14.0)),
        (egui::TextStyle::Small, egui::FontId::proportional(11.0)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 7.0);
    style.spacing.window_margin = egui::Margin::same(16.0);

    ctx.set_style(style);
}

fn visuals_for(mut v: egui::Visuals, colors: &palette::Palette) -> egui::Visuals {
    v.window_rounding = egui::Rounding::same(8.0);
    v.panel_fill = colors.bg_base;
    v.window_fill = colors.bg_header;
    v.extreme_bg_color = colors.bg_console;
    v.selection.bg_fill = colors.accent;

    v.widgets.noninteractive.bg_fill = colors.bg_base;
    v.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, colors.text_strong);
    v.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors.text_strong);
    v.widgets.inactive.weak_bg_fill = colors.bg_input;
    v.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors.accent);

    v
}
