//! Bubble layout and the scrollable message list.

use eframe::egui::{self, Color32, RichText};

use crate::ui::theme::{self, ChatTheme};
use crate::view::{Bubble, BubbleSide, MessageListView, ScrollMetrics};

use super::format::render_body;

/// Horizontal distance a bubble slides in from
const ENTRANCE_SLIDE: f32 = 16.0;

/// Paint every bubble in `view` inside a vertical scroll area.
///
/// Consumes a pending scroll-to-bottom request and feeds the measured
/// scroll geometry back into the view for the next render pass.
pub fn render_message_list(ui: &mut egui::Ui, view: &mut MessageListView, palette: &ChatTheme) {
    let now = ui.input(|i| i.time);
    view.advance_entrances(now);
    let scroll_to_bottom = view.take_scroll_request();

    let output = egui::ScrollArea::vertical()
        .id_salt("message_list")
        .auto_shrink([false; 2])
        // Land scroll requests within this frame so the metrics fed back
        // below already show the new offset
        .animated(false)
        .show(ui, |ui| {
            ui.add_space(8.0);

            if view.bubbles().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(RichText::new("No messages yet").color(palette.text_muted));
                });
            }

            for bubble in view.bubbles() {
                let progress = view.entrance_progress(bubble.id, now);
                render_bubble(ui, bubble, progress, palette);
                ui.add_space(6.0);
            }

            ui.add_space(8.0);
            if scroll_to_bottom {
                ui.scroll_to_cursor_animation(
                    Some(egui::Align::BOTTOM),
                    egui::style::ScrollAnimation::none(),
                );
            }
        });

    view.update_metrics(ScrollMetrics {
        offset: output.state.offset.y,
        content_height: output.content_size.y,
        viewport_height: output.inner_rect.height(),
    });

    if view.is_animating() {
        ui.ctx().request_repaint();
    }
}

/// Ease-out cubic
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn render_bubble(ui: &mut egui::Ui, bubble: &Bubble, progress: f32, palette: &ChatTheme) {
    let (fill, text_color, link_color, layout) = match bubble.side {
        BubbleSide::Own => (
            palette.bubble_own,
            palette.bubble_own_text,
            palette.bubble_own_text,
            egui::Layout::right_to_left(egui::Align::TOP),
        ),
        BubbleSide::Other => (
            palette.bubble_other,
            palette.bubble_other_text,
            palette.link,
            egui::Layout::left_to_right(egui::Align::TOP),
        ),
    };
    let eased = ease_out(progress);
    let max_width = ui.available_width() * 0.7;

    ui.with_layout(layout, |ui| {
        ui.set_opacity(eased);
        ui.add_space(12.0 + (1.0 - eased) * ENTRANCE_SLIDE);

        egui::Frame::new()
            .fill(fill)
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    if bubble.side == BubbleSide::Other {
                        ui.label(author_label(&bubble.author));
                    }
                    render_body(ui, &bubble.body, text_color, link_color);
                });
            });
    });
}

fn author_label(author: &str) -> RichText {
    let color: Color32 = theme::author_color(author);
    RichText::new(author)
        .text_style(egui::TextStyle::Name("bubble_author".into()))
        .color(color)
        .strong()
}
