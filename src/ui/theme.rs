//! Colour palettes and global styling for the chat window.
//!
//! Two palettes, one per [`Theme`]. Surfaces go from the window background
//! (`surface[0]`) up to raised controls (`surface[3]`); bubbles use their
//! own pair of fills so our messages stand apart from everyone else's.

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

use crate::config::Theme;

#[derive(Clone, Debug)]
pub struct ChatTheme {
    pub name: &'static str,
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub accent_hover: Color32,
    pub error: Color32,
    pub link: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    /// Fill behind our own messages
    pub bubble_own: Color32,
    pub bubble_own_text: Color32,
    /// Fill behind everybody else's
    pub bubble_other: Color32,
    pub bubble_other_text: Color32,
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            surface: [
                Color32::from_rgb(10, 10, 15),  // window
                Color32::from_rgb(19, 19, 26),  // panels
                Color32::from_rgb(28, 28, 38),  // message list
                Color32::from_rgb(46, 46, 62),  // raised controls
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            error: Color32::from_rgb(240, 71, 71),
            link: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border: Color32::from_rgb(47, 49, 54),
            bubble_own: Color32::from_rgb(88, 101, 242),
            bubble_own_text: Color32::WHITE,
            bubble_other: Color32::from_rgb(47, 49, 62),
            bubble_other_text: Color32::from_rgb(220, 221, 222),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(212, 215, 220),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            error: Color32::from_rgb(216, 58, 58),
            link: Color32::from_rgb(0, 120, 200),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border: Color32::from_rgb(210, 213, 219),
            bubble_own: Color32::from_rgb(88, 101, 242),
            bubble_own_text: Color32::WHITE,
            bubble_other: Color32::from_rgb(227, 229, 232),
            bubble_other_text: Color32::from_rgb(6, 6, 7),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(10.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(16.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
        (TextStyle::Name("bubble_author".into()), FontId::new(12.0, Proportional)),
        (TextStyle::Name("bubble_body".into()), FontId::new(14.0, Proportional)),
    ]
    .into()
}

/// Install visuals, spacing and text styles for `theme` on the context.
///
/// Called at startup and again on every theme toggle.
pub fn apply_style(ctx: &egui::Context, theme: Theme) {
    let palette = ChatTheme::for_theme(theme);
    let mut style = (*ctx.style()).clone();

    style.visuals = if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    style.text_styles = configure_text_styles();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    let widgets = &mut style.visuals.widgets;
    widgets.inactive.bg_fill = palette.surface[3];
    widgets.inactive.weak_bg_fill = palette.surface[3];
    widgets.inactive.bg_stroke = egui::Stroke::NONE;
    widgets.inactive.corner_radius = egui::CornerRadius::same(6);

    widgets.hovered.bg_fill = palette.accent_hover;
    widgets.hovered.weak_bg_fill = palette.accent_hover;
    widgets.hovered.bg_stroke = egui::Stroke::NONE;
    widgets.hovered.corner_radius = egui::CornerRadius::same(6);

    widgets.active.bg_fill = palette.accent;
    widgets.active.weak_bg_fill = palette.accent;
    widgets.active.corner_radius = egui::CornerRadius::same(6);

    style.visuals.panel_fill = palette.surface[1];
    style.visuals.window_fill = palette.surface[1];
    style.visuals.extreme_bg_color = palette.surface[0];
    style.visuals.hyperlink_color = palette.link;
    style.visuals.selection.bg_fill =
        Color32::from_rgba_unmultiplied(88, 101, 242, 100);

    ctx.set_style(style);
}

/// Author label colours; picked per name by [`author_color`]
const AUTHOR_COLORS: [Color32; 12] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(230, 126, 34),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(236, 100, 166),
    Color32::from_rgb(41, 128, 185),
    Color32::from_rgb(39, 174, 96),
    Color32::from_rgb(211, 84, 0),
    Color32::from_rgb(102, 178, 255),
];

/// Stable colour for an author name (FNV-1a over the bytes).
pub fn author_color(author: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in author.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    AUTHOR_COLORS[(hash as usize) % AUTHOR_COLORS.len()]
}
