//! Message composer at the bottom of the window

use eframe::egui::{self, RichText};

use crate::app::ChatApp;
use crate::message::MAX_BODY_CHARS;
use crate::ui::ChatTheme;
use crate::validation;

impl ChatApp {
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context, palette: &ChatTheme) {
        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(palette.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, palette.border)),
            )
            .show(ctx, |ui| {
                let valid = validation::validate_message(&self.client.session.input).is_ok()
                    && !self.client.post_in_flight();
                let mut send = false;

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(valid, egui::Button::new("Send")).clicked() {
                            send = true;
                        }

                        let count = self.client.session.input.trim().chars().count();
                        let counter_color = if count > MAX_BODY_CHARS {
                            palette.error
                        } else {
                            palette.text_muted
                        };
                        ui.label(
                            RichText::new(format!("{count}/{MAX_BODY_CHARS}"))
                                .color(counter_color)
                                .small(),
                        );

                        let input_frame = egui::Frame::new()
                            .fill(palette.surface[0])
                            .corner_radius(6.0)
                            .inner_margin(egui::Margin::symmetric(10, 8));
                        input_frame.show(ui, |ui| {
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.client.session.input)
                                    .desired_width(ui.available_width())
                                    .frame(false)
                                    .hint_text("Type a message... (Enter to send)"),
                            );

                            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                send = true;
                                response.request_focus();
                            }
                        });
                    });
                });

                if send {
                    self.client.send_current_input();
                }
            });
    }
}
