//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* header scene and list state and turns them
//! into half-block pixels and text on the terminal.

pub mod avatar;
pub mod debug_overlay;
pub mod layout;
pub mod list_widget;
pub mod painter;
pub mod screen;
pub mod theme;
