//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::config::Action;
use crate::core::geometry::Dp;
use crate::core::header::HeaderHit;
use crate::ui::painter::dp_at;

use super::state::AppState;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Process a key event through the configured bindings.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, whatever the bindings say.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::ScrollUp => state.list.scroll_rows(-1),
        Action::ScrollDown => state.list.scroll_rows(1),
        Action::PageUp => state.list.scroll_pages(-1),
        Action::PageDown => state.list.scroll_pages(1),
        Action::ScrollToTop => state.header.activate_menu(&state.scroll),
        Action::ScrollToBottom => state.list.glide_to_index(usize::MAX),
        Action::ToggleDebug => state.show_debug = !state.show_debug,
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event: the wheel scrolls, a left click on the menu
/// button asks the list to scroll home.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => state.list.scroll_rows(WHEEL_ROWS),
        MouseEventKind::ScrollUp => state.list.scroll_rows(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = state.header_area else {
                return;
            };
            let Some((x, y)) = dp_at(area, Position::new(mouse.column, mouse.row), state.scale)
            else {
                return;
            };
            let scene = state.header.compose(Dp(area.width as f32 * state.scale));
            if scene.hit_test(x, y) == Some(HeaderHit::Menu) {
                state.header.activate_menu(&state.scroll);
            }
        }
        _ => {}
    }
}
