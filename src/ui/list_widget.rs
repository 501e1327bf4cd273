//! Placeholder rows of the profile list, scrolled by [`ListScroll`].

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::list_scroll::ListScroll;

use super::theme::Theme;

/// Left inset of row text, in columns.
const ROW_INDENT: u16 = 4;

/// Draws every row whose top edge lands inside `area`.  Rows scrolled
/// under the sticky header are drawn too; the header paints over them.
pub struct ProfileList<'a> {
    scroll: &'a ListScroll,
}

impl<'a> ProfileList<'a> {
    pub fn new(scroll: &'a ListScroll) -> Self {
        Self { scroll }
    }
}

pub fn row_label(ordinal: usize) -> String {
    format!("List item #{ordinal}")
}

impl Widget for ProfileList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::surface_style());
        if area.width <= ROW_INDENT || area.height == 0 {
            return;
        }

        let row_px = self.scroll.row_px() as i64;
        let (first, first_y) = self.scroll.first_row_on_screen();
        let text_width = area.width - ROW_INDENT;

        for (i, ordinal) in (first..self.scroll.row_count()).enumerate() {
            let top_px = first_y + i as i64 * row_px;
            if top_px < 0 {
                continue;
            }
            let row = (top_px / 2) as u16;
            if row >= area.height {
                break;
            }
            buf.set_stringn(
                area.x + ROW_INDENT,
                area.y + row,
                row_label(ordinal),
                text_width as usize,
                Theme::row_style(),
            );
        }
    }
}
