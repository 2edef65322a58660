//! Main update loop and keyboard shortcuts

use eframe::egui;
use std::time::{Duration, Instant};

use super::ChatApp;
use crate::ui::{self, ChatTheme};

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply snapshots and post results from the backend
        self.client.process_events();

        if self.last_visibility_tick.elapsed() >= self.settings.visibility_interval() {
            self.last_visibility_tick = Instant::now();
            self.client.tick_visibility();
        }

        let (refresh, jump) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::R),
                i.modifiers.command && i.key_pressed(egui::Key::End),
            )
        });
        if refresh {
            self.client.refresh();
        }
        if jump {
            self.client.jump_to_bottom();
        }

        // Keep polling the backend channel while idle
        ctx.request_repaint_after(Duration::from_millis(100));

        let palette = ChatTheme::for_theme(self.client.session.theme());
        self.render_toolbar(ctx, &palette);
        self.render_input_panel(ctx, &palette);
        self.render_central_panel(ctx, &palette);

        if ui::render_jump_button(ctx, self.client.view.jump_visible(), &palette) {
            self.client.jump_to_bottom();
        }
    }
}
