pub mod palette;
pub mod style;
pub mod widgets;

pub use palette::{ACCENT, DANGER, SUCCESS, WARNING};
pub use style::apply_settings;
pub use widgets::{card, combo_box, option_toggle, path_field, styled_button, text_input, ButtonVariant};

#[derive(PartialEq, Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
    System,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "🌙 Dark",
            Theme::Light => "☀ Light",
            Theme::System => "💻 System",
        }
    }
}
