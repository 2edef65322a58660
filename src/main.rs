//! DevChat - a small polling chat client built with egui
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime that polls the message store
//! - Communication via crossbeam channels

use eframe::egui;

use devchat_client::app::ChatApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([320.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DevChat",
        options,
        Box::new(|cc| Ok(Box::new(ChatApp::new(cc)))),
    )
}
