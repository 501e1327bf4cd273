//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the list (with its sticky header on top) and a
/// one-line key hint bar.
pub struct AppLayout {
    pub list_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // list + header
                Constraint::Length(1), // key hints
            ])
            .split(area);

        Self {
            list_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Top `rows` of the list area, where the header is pinned.
    pub fn header_area(&self, rows: u16) -> Rect {
        Rect {
            height: rows.min(self.list_area.height),
            ..self.list_area
        }
    }
}
