//! Collection of reusable TUI components.

pub mod choice;
pub mod preview;
pub mod text_input;
pub mod tid_editor;
