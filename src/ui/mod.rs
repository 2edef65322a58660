//! egui rendering for the chat window.
//!
//! - `toolbar`: identity field, theme toggle and manual refresh
//! - `messages`: the scrollable bubble list
//! - `jump_button`: floating "jump to latest" control
//! - `theme`: palettes and global styling

pub mod jump_button;
pub mod messages;
pub mod theme;
pub mod toolbar;

pub use jump_button::render_jump_button;
pub use messages::render_message_list;
pub use theme::{apply_style, ChatTheme};
pub use toolbar::{render_toolbar, ToolbarAction};
