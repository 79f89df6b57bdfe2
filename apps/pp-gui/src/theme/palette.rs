use eframe::egui::Color32;

// --- STATUS COLORS ---
pub const ACCENT: Color32 = Color32::from_rgb(55, 118, 171); // Python blue
pub const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
pub const WARNING: Color32 = Color32::from_rgb(222, 172, 30);
pub const DANGER: Color32 = Color32::from_rgb(207, 58, 58);

// --- DARK MODE ---
pub const DARK_BG_BASE: Color32 = Color32::from_rgb(28, 30, 34);
pub const DARK_BG_HEADER: Color32 = Color32::from_rgb(36, 39, 44);
pub const DARK_BG_INPUT: Color32 = Color32::from_rgb(43, 46, 52);
pub const DARK_BG_CONSOLE: Color32 = Color32::from_rgb(18, 19, 22);
pub const DARK_BORDER: Color32 = Color32::from_gray(62);
pub const DARK_TEXT_STRONG: Color32 = Color32::from_gray(235);
pub const DARK_TEXT_WEAK: Color32 = Color32::from_gray(150);

// --- LIGHT MODE ---
pub const LIGHT_BG_BASE: Color32 = Color32::from_rgb(252, 252, 253);
pub const LIGHT_BG_HEADER: Color32 = Color32::from_rgb(243, 245, 248);
pub const LIGHT_BG_INPUT: Color32 = Color32::from_rgb(236, 239, 243);
pub const LIGHT_BG_CONSOLE: Color32 = Color32::from_rgb(238, 240, 244);
pub const LIGHT_BORDER: Color32 = Color32::from_gray(214);
pub const LIGHT_TEXT_STRONG: Color32 = Color32::from_gray(35);
pub const LIGHT_TEXT_WEAK: Color32 = Color32::from_gray(105);

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_base: Color32,
    pub bg_header: Color32,
    pub bg_input: Color32,
    pub bg_console: Color32,
    pub border: Color32,
    pub text_strong: Color32,
    pub text_weak: Color32,
    pub accent: Color32,
}

pub fn get_colors(is_dark: bool) -> Palette {
    if is_dark {
        Palette {
            bg_base: DARK_BG_BASE,
            bg_header: DARK_BG_HEADER,
            bg_input: DARK_BG_INPUT,
            bg_console: DARK_BG_CONSOLE,
            border: DARK_BORDER,
            text_strong: DARK_TEXT_STRONG,
            text_weak: DARK_TEXT_WEAK,
            accent: ACCENT,
        }
    } else {
        Palette {
            bg_base: LIGHT_BG_BASE,
            bg_header: LIGHT_BG_HEADER,
            bg_input: LIGHT_BG_INPUT,
            bg_console: LIGHT_BG_CONSOLE,
            border: LIGHT_BORDER,
            text_strong: LIGHT_TEXT_STRONG,
            text_weak: LIGHT_TEXT_WEAK,
            accent: ACCENT,
        }
    }
}
