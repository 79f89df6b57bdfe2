use super::palette::{self, Palette};
use eframe::egui;

// ============================================================================
// BUTTONS
// ============================================================================

#[derive(PartialEq, Clone, Copy)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Destructive,
}

impl ButtonVariant {
    fn colors(self, colors: &Palette) -> (egui::Color32, egui::Color32) {
        match self {
            ButtonVariant::Primary => (colors.accent, egui::Color32::WHITE),
            ButtonVariant::Secondary => (colors.bg_input, colors.text_strong),
            ButtonVariant::Destructive => (palette::DANGER, egui::Color32::WHITE),
        }
    }
}

pub fn styled_button(ui: &mut egui::Ui, text: &str, variant: ButtonVariant) -> egui::Response {
    let colors = palette::get_colors(ui.visuals().dark_mode);
    let (bg, fg) = variant.colors(&colors);

    ui.add(
        egui::Button::new(egui::RichText::new(text).color(fg).strong())
            .fill(bg)
            .rounding(6.0)
            .min_size(egui::vec2(140.0, 36.0)),
    )
}

// ============================================================================
// CARD
// ============================================================================

/// Titled panel. The optional header action reports its click in the
/// second tuple field.
pub fn card<R>(
    ui: &mut egui::Ui,
    title: &str,
    action: Option<(&str, ButtonVariant)>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> (R, bool) {
    let colors = palette::get_colors(ui.visuals().dark_mode);
    let mut action_clicked = false;

    let inner = egui::Frame::none()
        .fill(colors.bg_base)
        .rounding(8.0)
        .stroke(egui::Stroke::new(1.0, colors.border))
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;

            // --- HEADER ---
            egui::Frame::none()
                .fill(colors.bg_header)
                .rounding(egui::Rounding {
                    nw: 8.0,
                    ne: 8.0,
                    sw: 0.0,
                    se: 0.0,
                })
                .inner_margin(egui::Margin::symmetric(14.0, 8.0))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(title)
                                .strong()
                                .size(13.5)
                                .color(colors.text_strong),
                        );

                        if let Some((label, variant)) = action {
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let (bg, fg) = variant.colors(&colors);
                                    let button = egui::Button::new(
                                        egui::RichText::new(label).size(12.0).color(fg),
                                    )
                                    .fill(bg)
                                    .rounding(4.0)
                                    .min_size(egui::vec2(60.0, 22.0));
                                    action_clicked = ui.add(button).clicked();
                                },
                            );
                        }
                    });
                });

            // --- SEPARATOR ---
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(ui.available_width(), 1.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 0.0, colors.border);

            // --- BODY ---
            egui::Frame::none()
                .inner_margin(14.0)
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(10.0, 8.0);
                    add_contents(ui)
                })
                .inner
        })
        .inner;

    (inner, action_clicked)
}

// ============================================================================
// INPUTS
// ============================================================================

pub fn text_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    let colors = palette::get_colors(ui.visuals().dark_mode);
    let rounding = egui::Rounding::same(6.0);
    let margin = egui::vec2(10.0, 7.0);

    let response = egui::Frame::none()
        .inner_margin(egui::Margin::symmetric(margin.x, margin.y))
        .fill(colors.bg_input)
        .rounding(rounding)
        .stroke(egui::Stroke::new(1.0, colors.border))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(hint)
                    .desired_width(f32::INFINITY)
                    .frame(false)
                    .text_color(colors.text_strong),
            )
        })
        .inner;

    if response.has_focus() || response.hovered() {
        let width = if response.has_focus() { 1.5 } else { 1.0 };
        ui.painter().rect_stroke(
            response.rect.expand2(margin),
            rounding,
            egui::Stroke::new(width, colors.accent),
        );
    }

    response
}

/// Label, text field and a browse button on one row. Returns the field's
/// response and whether the button was clicked.
pub fn path_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
) -> (egui::Response, bool) {
    ui.horizontal(|ui| {
        ui.add_sized(egui::vec2(110.0, 30.0), egui::Label::new(label));

        let browse_width = 90.0;
        let field_width = (ui.available_width() - browse_width - 10.0).max(80.0);
        let response = ui
            .allocate_ui(egui::vec2(field_width, 30.0), |ui| text_input(ui, value, hint))
            .inner;
        let browse = ui
            .add_sized(egui::vec2(browse_width, 30.0), egui::Button::new("📂 Browse"))
            .clicked();

        (response, browse)
    })
    .inner
}

/// Checkbox with a muted explanation next to it.
pub fn option_toggle(ui: &mut egui::Ui, value: &mut bool, label: &str, hint: &str) -> egui::Response {
    let colors = palette::get_colors(ui.visuals().dark_mode);
    ui.horizontal(|ui| {
        let response = ui.checkbox(value, label);
        ui.label(egui::RichText::new(hint).small().color(colors.text_weak));
        response
    })
    .inner
}

// ============================================================================
// COMBO BOX
// ============================================================================

pub fn combo_box(
    ui: &mut egui::Ui,
    id: &str,
    selected_text: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    let colors = palette::get_colors(ui.visuals().dark_mode);

    ui.scope(|ui| {
        ui.spacing_mut().button_padding = egui::vec2(10.0, 6.0);
        let v = ui.visuals_mut();
        v.widgets.inactive.rounding = 6.0.into();
        v.widgets.inactive.weak_bg_fill = colors.bg_input;
        v.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, colors.border);
        v.widgets.hovered = v.widgets.inactive;
        v.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors.accent);
        v.widgets.open = v.widgets.hovered;

        egui::ComboBox::from_id_source(id)
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                let lv = ui.visuals_mut();
                lv.widgets.active.weak_bg_fill = colors.accent;
                lv.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
                lv.widgets.inactive.weak_bg_fill = egui::Color32::TRANSPARENT;
                add_contents(ui);
            });
    });
}
