//! Scroll container for the profile list.
//!
//! Item 0 is the sticky header; items `1..=row_count` are the placeholder
//! rows.  Offsets are in pixels (half terminal rows).  Requested scrolls
//! glide to their target with exponential ease-out: each reference frame the
//! remaining distance shrinks by `speed`, so motion visibly decelerates.

use std::time::Duration;

use crate::core::position::ScrollPosition;
use crate::core::scroll::{ScrollRequest, ScrollSource};

/// Frame length the decay `speed` is defined against.
const REFERENCE_FRAME: Duration = Duration::from_millis(16);
/// Remaining distance (px) under which an animated scroll snaps home.
const SNAP_DISTANCE: f64 = 0.4;

#[derive(Debug)]
struct Glide {
    target: f64,
    /// Resolved on arrival; dropped unresolved when superseded.
    request: Option<ScrollRequest>,
}

#[derive(Debug)]
pub struct ListScroll {
    header_px: u32,
    row_px: u32,
    row_count: usize,
    viewport_px: u32,
    offset: f64,
    /// Damping per reference frame: `remaining *= (1 - speed)`.
    speed: f64,
    glide: Option<Glide>,
}

impl ListScroll {
    pub fn new(header_px: u32, row_px: u32, row_count: usize, speed: f64) -> Self {
        Self {
            header_px,
            row_px: row_px.max(1),
            row_count,
            viewport_px: 0,
            offset: 0.0,
            speed: speed.clamp(0.05, 0.95),
            glide: None,
        }
    }

    pub fn row_px(&self) -> u32 {
        self.row_px
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Current whole-pixel offset from the top of the content.
    pub fn offset_px(&self) -> u32 {
        self.offset.round() as u32
    }

    fn content_px(&self) -> u64 {
        self.header_px as u64 + self.row_count as u64 * self.row_px as u64
    }

    pub fn max_offset(&self) -> u32 {
        self.content_px()
            .saturating_sub(self.viewport_px as u64)
            .min(u32::MAX as u64) as u32
    }

    /// Update the visible height; keeps the offset in range.
    pub fn set_viewport(&mut self, viewport_px: u32) {
        self.viewport_px = viewport_px;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = self.max_offset() as f64;
        self.offset = self.offset.clamp(0.0, max);
        if let Some(glide) = self.glide.as_mut() {
            glide.target = glide.target.clamp(0.0, max);
        }
    }

    /// Pixel offset at which item `index` sits at the top, clamped to the
    /// scrollable range.
    pub fn item_offset(&self, index: usize) -> u32 {
        let raw = if index == 0 {
            0
        } else {
            let rows = (index - 1).min(self.row_count) as u64;
            self.header_px as u64 + rows * self.row_px as u64
        };
        raw.min(self.max_offset() as u64) as u32
    }

    /// Manual scroll by `delta_px` (positive = down).  Cancels any glide.
    pub fn scroll_by(&mut self, delta_px: i64) {
        if let Some(glide) = self.glide.take() {
            if glide.request.is_some() {
                tracing::debug!("manual scroll cancelled an in-flight scroll request");
            }
        }
        let next = self.offset_px() as i64 + delta_px;
        self.offset = next.clamp(0, self.max_offset() as i64) as f64;
    }

    pub fn scroll_rows(&mut self, rows: i64) {
        self.scroll_by(rows * self.row_px as i64);
    }

    pub fn scroll_pages(&mut self, pages: i64) {
        let page = (self.viewport_px.saturating_sub(self.header_px)).max(self.row_px) as i64;
        self.scroll_by(pages * page);
    }

    /// Start gliding toward `index` without anyone waiting on it.
    pub fn glide_to_index(&mut self, index: usize) {
        self.start_glide(index, None);
    }

    /// Accept a scroll request from the header.  A newer request supersedes
    /// an older one.
    pub fn handle_request(&mut self, request: ScrollRequest) {
        let index = request.index;
        self.start_glide(index, Some(request));
    }

    fn start_glide(&mut self, index: usize, request: Option<ScrollRequest>) {
        if let Some(old) = self.glide.take() {
            if old.request.is_some() {
                tracing::debug!(index, "scroll request superseded");
            }
        }
        let target = self.item_offset(index) as f64;
        tracing::debug!(index, target, from = self.offset, "scroll glide started");
        if (target - self.offset).abs() < SNAP_DISTANCE {
            self.offset = target;
            if let Some(request) = request {
                request.complete();
            }
            return;
        }
        self.glide = Some(Glide { target, request });
    }

    /// Advance an in-flight glide by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(glide) = self.glide.as_mut() else {
            return;
        };
        let frames = elapsed.as_secs_f64() / REFERENCE_FRAME.as_secs_f64();
        let keep = (1.0 - self.speed).powf(frames);
        let remaining = (glide.target - self.offset) * keep;

        if remaining.abs() < SNAP_DISTANCE {
            self.offset = glide.target;
            if let Some(glide) = self.glide.take() {
                tracing::debug!(offset = self.offset, "scroll glide arrived");
                if let Some(request) = glide.request {
                    request.complete();
                }
            }
        } else {
            self.offset = glide.target - remaining;
        }
    }

    /// True while a glide is in flight.
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    /// Ordinal of the first placeholder row with any part on screen, and the
    /// pixel (from the viewport top, possibly negative) where it starts.
    pub fn first_row_on_screen(&self) -> (usize, i64) {
        let offset = self.offset_px() as i64;
        let header = self.header_px as i64;
        let row = self.row_px as i64;
        if offset <= header {
            return (0, header - offset);
        }
        let into_rows = offset - header;
        let first = (into_rows / row) as usize;
        (first, -(into_rows % row))
    }
}

impl ScrollSource for ListScroll {
    fn position(&self) -> ScrollPosition {
        let offset = self.offset_px();
        if offset < self.header_px {
            return ScrollPosition::new(0, offset);
        }
        let into_rows = offset - self.header_px;
        ScrollPosition::new(
            1 + (into_rows / self.row_px) as usize,
            into_rows % self.row_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::{scroll_channel, ScrollCommander};

    const FRAME: Duration = Duration::from_millis(16);

    fn list() -> ListScroll {
        let mut list = ListScroll::new(20, 2, 100, 0.3);
        list.set_viewport(60);
        list
    }

    fn settle(list: &mut ListScroll) {
        for _ in 0..500 {
            list.advance(FRAME);
        }
    }

    #[test]
    fn starts_at_origin() {
        assert_eq!(list().position(), ScrollPosition::TOP);
    }

    #[test]
    fn position_walks_items() {
        let mut l = list();
        l.scroll_by(5);
        assert_eq!(l.position(), ScrollPosition::new(0, 5));
        l.scroll_by(15);
        assert_eq!(l.position(), ScrollPosition::new(1, 0));
        l.scroll_by(9);
        assert_eq!(l.position(), ScrollPosition::new(5, 1));
    }

    #[test]
    fn offset_is_clamped() {
        let mut l = list();
        l.scroll_by(-10);
        assert_eq!(l.offset_px(), 0);
        l.scroll_by(10_000);
        assert_eq!(l.offset_px(), 20 + 200 - 60);
    }

    #[test]
    fn short_list_cannot_scroll() {
        let mut l = ListScroll::new(20, 2, 3, 0.3);
        l.set_viewport(60);
        l.scroll_rows(5);
        assert_eq!(l.position(), ScrollPosition::TOP);
    }

    #[tokio::test]
    async fn request_glides_home_and_completes() {
        let (handle, mut rx) = scroll_channel();
        let mut l = list();
        l.scroll_rows(30);
        assert_ne!(l.position(), ScrollPosition::TOP);

        let completion = handle.request_scroll_to_index(0);
        l.handle_request(rx.recv().await.expect("request"));
        assert!(l.is_animating());

        let mut prev = l.offset;
        for _ in 0..500 {
            l.advance(FRAME);
            assert!(l.offset <= prev, "glide overshot or reversed");
            prev = l.offset;
        }
        assert!(!l.is_animating());
        assert_eq!(l.position(), ScrollPosition::TOP);
        assert!(completion.wait().await);
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let (handle, mut rx) = scroll_channel();
        let mut l = list();

        let first = handle.request_scroll_to_index(40);
        l.handle_request(rx.recv().await.expect("first"));
        l.advance(FRAME);
        let second = handle.request_scroll_to_index(0);
        l.handle_request(rx.recv().await.expect("second"));
        settle(&mut l);

        assert!(!first.wait().await);
        assert!(second.wait().await);
        assert_eq!(l.position(), ScrollPosition::TOP);
    }

    #[tokio::test]
    async fn manual_scroll_cancels_glide() {
        let (handle, mut rx) = scroll_channel();
        let mut l = list();
        l.scroll_rows(20);
        let completion = handle.request_scroll_to_index(0);
        l.handle_request(rx.recv().await.expect("request"));
        l.advance(FRAME);
        l.scroll_rows(1);

        assert!(!l.is_animating());
        assert!(!completion.wait().await);
    }

    #[tokio::test]
    async fn request_for_current_item_completes_immediately() {
        let (handle, mut rx) = scroll_channel();
        let mut l = list();
        let completion = handle.request_scroll_to_index(0);
        l.handle_request(rx.recv().await.expect("request"));
        assert!(!l.is_animating());
        assert!(completion.wait().await);
    }

    #[test]
    fn item_offset_is_clamped_to_range() {
        let l = list();
        assert_eq!(l.item_offset(0), 0);
        assert_eq!(l.item_offset(1), 20);
        assert_eq!(l.item_offset(6), 30);
        assert_eq!(l.item_offset(1_000), l.max_offset());
    }

    #[test]
    fn first_row_tracks_offset() {
        let mut l = list();
        assert_eq!(l.first_row_on_screen(), (0, 20));
        l.scroll_by(7);
        assert_eq!(l.first_row_on_screen(), (0, 13));
        l.scroll_by(18);
        assert_eq!(l.first_row_on_screen(), (2, -1));
    }

    #[test]
    fn shrinking_viewport_reclamps() {
        let mut l = list();
        l.scroll_by(10_000);
        l.set_viewport(200);
        assert_eq!(l.offset_px(), 20);
    }
}
