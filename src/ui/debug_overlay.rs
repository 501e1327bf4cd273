//! Scroll readout pinned to the bottom-right corner of a given area.

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use crate::core::position::ScrollPosition;

use super::theme::Theme;

/// Gap to the area's right and bottom edges, in columns / rows.
const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;

/// Shows the first visible index and offset.  Draws nothing when hidden or
/// when the area is too small to hold it.
pub struct DebugReadout {
    pub visible: bool,
    pub position: ScrollPosition,
}

impl DebugReadout {
    fn lines(&self) -> [String; 2] {
        [
            format!("First visible index: {}", self.position.first_visible_index),
            format!("First visible offset: {}", self.position.first_visible_offset),
        ]
    }
}

impl Widget for DebugReadout {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible {
            return;
        }
        let lines = self.lines();
        let width = lines.iter().map(|l| l.len() as u16).max().unwrap_or(0);
        let height = lines.len() as u16;
        if area.width < width + MARGIN_X || area.height < height + MARGIN_Y {
            return;
        }

        let x = area.x + area.width - width - MARGIN_X;
        let y = area.y + area.height - height - MARGIN_Y;
        for (i, text) in lines.into_iter().enumerate() {
            let line = Line::styled(text, Theme::debug_style());
            buf.set_line(x, y + i as u16, &line, width);
        }
    }
}
