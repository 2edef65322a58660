//! Application shell around the chat client
//!
//! - `core`: ChatApp struct, startup and settings persistence
//! - `update`: per-frame loop and periodic ticks
//! - `ui::panels`: toolbar, status line and central message panel
//! - `ui::input`: message composer

pub mod core;
pub mod ui;
pub mod update;

pub use core::ChatApp;
