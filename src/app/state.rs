//! Central application state.
//!
//! All mutable state lives here so that rendering reads `&AppState` and the
//! input handler mutates `&mut AppState`, both on the one UI loop.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    animation::{AnimatedProminence, HeaderPhase, Prominence, StaticProminence},
    geometry::{Dp, LayoutConstants},
    header::HeaderCompositor,
    scroll::{ScrollHandle, ScrollSource},
};
use crate::ui::{avatar::AvatarImage, painter::rows_for, theme::Theme};

use super::list_scroll::ListScroll;

/// Pixels per list row (one terminal row of two half-block pixels).
pub const ROW_PX: u32 = 2;
/// Per-frame damping of animated list scrolls.
const GLIDE_SPEED: f64 = 0.3;

pub struct AppState {
    pub config: AppConfig,
    pub header: HeaderCompositor<Box<dyn Prominence>>,
    pub list: ListScroll,
    /// Sending side of the list's scroll request channel.
    pub scroll: ScrollHandle,
    pub avatar: AvatarImage,
    /// Layout units per pixel.
    pub scale: f32,
    pub show_debug: bool,
    pub should_quit: bool,
    /// Where the header was drawn last frame, for mouse hit-testing.
    pub header_area: Option<Rect>,
    last_phase: HeaderPhase,
}

impl AppState {
    pub fn new(config: AppConfig, avatar: AvatarImage, scroll: ScrollHandle) -> Self {
        let scale = config.scale as f32;
        let prominence: Box<dyn Prominence> = if config.animate_header {
            Box::new(AnimatedProminence::new(config.animation_duration()).with_easing(config.easing))
        } else {
            Box::new(StaticProminence)
        };

        let header = HeaderCompositor::new(prominence, LayoutConstants::DEFAULT, Theme::header_colors())
            .label(config.label.clone())
            .avatar(avatar.content())
            // One terminal row of text.
            .line_height(Dp(ROW_PX as f32 * scale));

        // Whole rows, so keyboard scrolling keeps text on row boundaries.
        let header_px = rows_for(header.height(), scale) as u32 * ROW_PX;
        let list = ListScroll::new(header_px, ROW_PX, config.item_count, GLIDE_SPEED);

        Self {
            show_debug: config.show_debug,
            config,
            header,
            list,
            scroll,
            avatar,
            scale,
            should_quit: false,
            header_area: None,
            last_phase: HeaderPhase::Expanded,
        }
    }

    /// Per-frame update: advance the list, hand its latest position to the
    /// header, then advance the header animation.
    pub fn frame(&mut self, elapsed: Duration) {
        self.list.advance(elapsed);
        self.header.observe(self.list.position());
        self.header.advance(elapsed);

        let phase = self.header.phase();
        if phase != self.last_phase {
            tracing::debug!(?phase, "header phase changed");
            self.last_phase = phase;
        }
    }

    /// Resize the list viewport to `rows` terminal rows and re-derive.
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.list.set_viewport(rows as u32 * ROW_PX);
        self.header.observe(self.list.position());
    }

    /// True while anything on screen is still moving.
    pub fn is_animating(&self) -> bool {
        self.list.is_animating() || self.header.prominence().is_animating()
    }
}
