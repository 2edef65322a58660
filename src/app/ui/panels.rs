//! Toolbar and central panel rendering

use eframe::egui;

use crate::app::ChatApp;
use crate::ui::{self, ChatTheme, ToolbarAction};

impl ChatApp {
    pub(in crate::app) fn render_toolbar(&mut self, ctx: &egui::Context, palette: &ChatTheme) {
        let action = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::new()
                    .fill(palette.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .stroke(egui::Stroke::new(1.0, palette.border)),
            )
            .show(ctx, |ui| {
                ui::render_toolbar(
                    ui,
                    &mut self.username_input,
                    self.client.session.current_user(),
                    self.client.session.theme(),
                    self.client.last_fetch(),
                    palette,
                )
            })
            .inner;

        match action {
            Some(ToolbarAction::SetUsername(name)) => self.set_username(name),
            Some(ToolbarAction::ToggleTheme) => self.toggle_theme(ctx),
            Some(ToolbarAction::Refresh) => self.client.refresh(),
            None => {}
        }
    }

    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context, palette: &ChatTheme) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.surface[2]).inner_margin(0.0))
            .show(ctx, |ui| {
                if let Some(status) = self.client.status() {
                    egui::Frame::new()
                        .fill(palette.surface[1])
                        .inner_margin(egui::Margin::symmetric(12, 4))
                        .show(ui, |ui| {
                            ui.colored_label(palette.error, status);
                        });
                }

                egui::Frame::new().inner_margin(12.0).show(ui, |ui| {
                    ui::render_message_list(ui, &mut self.client.view, palette);
                });
            });
    }
}
