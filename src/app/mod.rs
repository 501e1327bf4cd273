//! Application orchestration: state, the scroll container, the event
//! source, and input handling.

pub mod clock;
pub mod event;
pub mod handler;
pub mod list_scroll;
pub mod state;
