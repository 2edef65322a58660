//! Top toolbar: identity, theme toggle and manual refresh.
//!
//! The time stamp shows the last fetch attempt. A failed fetch looks the
//! same as an empty one, so it never claims the list is in sync.

use chrono::{DateTime, Local};
use eframe::egui::{self, RichText};

use crate::config::Theme;
use crate::ui::theme::ChatTheme;
use crate::validation;

/// Actions that the toolbar can request
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    /// Adopt the name typed in the identity field
    SetUsername(String),
    ToggleTheme,
    Refresh,
}

/// Render the toolbar. `username_input` is the editable identity field.
pub fn render_toolbar(
    ui: &mut egui::Ui,
    username_input: &mut String,
    current_user: &str,
    theme: Theme,
    last_fetch: Option<DateTime<Local>>,
    palette: &ChatTheme,
) -> Option<ToolbarAction> {
    let mut toolbar_action = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.spacing_mut().button_padding = egui::vec2(8.0, 4.0);

        ui.label(RichText::new("DevChat").heading().color(palette.text_primary));
        ui.separator();

        ui.label(RichText::new("Name").color(palette.text_muted));
        let response = ui.add(
            egui::TextEdit::singleline(username_input)
                .hint_text("your name")
                .desired_width(120.0),
        );
        let commit = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if commit && username_input.trim() != current_user {
            match validation::validate_username(username_input) {
                Ok(()) => {
                    toolbar_action = Some(ToolbarAction::SetUsername(
                        username_input.trim().to_string(),
                    ));
                }
                Err(_) => *username_input = current_user.to_string(),
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if theme.is_dark() { "☀ Light" } else { "🌙 Dark" };
            if ui.button(theme_label).clicked() {
                toolbar_action = Some(ToolbarAction::ToggleTheme);
            }
            if ui.button("Refresh").clicked() {
                toolbar_action = Some(ToolbarAction::Refresh);
            }
            if let Some(at) = last_fetch {
                ui.label(
                    RichText::new(fetch_stamp_label(at))
                        .color(palette.text_muted)
                        .small(),
                );
            }
        });
    });

    toolbar_action
}

/// Text for the last-fetch stamp
pub fn fetch_stamp_label(at: DateTime<Local>) -> String {
    format!("last fetch {}", at.format("%H:%M:%S"))
}
