//! Floating "jump to latest" button over the message list.

use eframe::egui::{self, RichText};

use crate::ui::theme::ChatTheme;

/// Seconds the button takes to fade in or out
const FADE_SECS: f32 = 0.2;

/// Show the button while `visible`, fading in and out. Returns `true` when
/// it was clicked this frame.
pub fn render_jump_button(ctx: &egui::Context, visible: bool, palette: &ChatTheme) -> bool {
    let opacity = ctx.animate_bool_with_time(egui::Id::new("jump_button_fade"), visible, FADE_SECS);
    if opacity <= 0.0 {
        return false;
    }

    let mut clicked = false;
    egui::Area::new(egui::Id::new("jump_button"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -72.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            let button = egui::Button::new(RichText::new("⬇ Latest").color(palette.bubble_own_text))
                .fill(palette.accent)
                .corner_radius(12.0);
            // Ignore clicks while fading out
            if ui.add(button).clicked() && visible {
                clicked = true;
            }
        });
    clicked
}
