//! Header composition: background, menu button, avatar and name label.
//!
//! The compositor is fed the latest scroll position by the host loop,
//! drives its [`Prominence`] from it, and emits a [`HeaderScene`] that the
//! renderer paints each frame.

use std::time::Duration;

use super::animation::{HeaderPhase, Prominence};
use super::background;
use super::draw::{AvatarContent, DrawCommand, Icon};
use super::geometry::{Dp, DpRect, LayoutConstants, Rgb};
use super::position::{derive, ProminenceState, ScrollPosition};
use super::scroll::ScrollCommander;

const MENU_TOP_PADDING: Dp = Dp(8.0);
const MENU_END_PADDING: Dp = Dp(20.0);
/// Square touch target of the menu button.
const MENU_TARGET_SIZE: Dp = Dp(48.0);
const LABEL_TOP_PADDING: Dp = Dp(8.0);
const LABEL_BOTTOM_PADDING: Dp = Dp(20.0);
const DEFAULT_LINE_HEIGHT: Dp = Dp(24.0);

/// Colours the header paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderColors {
    /// Flat band behind the avatar.
    pub band: Rgb,
    /// Colour scooped out of the band; matches the list surface.
    pub cutout: Rgb,
    /// Icons drawn on top of the band.
    pub on_band: Rgb,
    pub label: Rgb,
}

/// Interactive regions of a composed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    Menu,
}

/// One frame of header output.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderScene {
    pub commands: Vec<DrawCommand>,
    /// Total header height including the label.
    pub height: Dp,
    pub menu_bounds: DpRect,
}

impl HeaderScene {
    pub fn hit_test(&self, x: Dp, y: Dp) -> Option<HeaderHit> {
        self.menu_bounds.contains(x, y).then_some(HeaderHit::Menu)
    }
}

pub struct HeaderCompositor<P: Prominence> {
    prominence: P,
    constants: LayoutConstants,
    colors: HeaderColors,
    label: String,
    avatar: AvatarContent,
    line_height: Dp,
    /// State derived from the last observed position.
    observed: Option<ProminenceState>,
}

impl<P: Prominence> HeaderCompositor<P> {
    pub fn new(prominence: P, constants: LayoutConstants, colors: HeaderColors) -> Self {
        Self {
            prominence,
            constants,
            colors,
            label: "Mr. X".to_string(),
            avatar: AvatarContent::default(),
            line_height: DEFAULT_LINE_HEIGHT,
            observed: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn avatar(mut self, avatar: AvatarContent) -> Self {
        self.avatar = avatar;
        self
    }

    /// Height of one line of label text in the renderer's units.
    pub fn line_height(mut self, line_height: Dp) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn prominence(&self) -> &P {
        &self.prominence
    }

    pub fn phase(&self) -> HeaderPhase {
        self.prominence.phase()
    }

    /// Feed the latest scroll position.  Must be called with every new
    /// position before the next [`compose`](Self::compose).  Returns the
    /// derived state when it differs from the previous call's.
    pub fn observe(&mut self, pos: ScrollPosition) -> Option<ProminenceState> {
        let state = derive(pos);
        self.prominence.set_target(state.target());
        if self.observed == Some(state) {
            return None;
        }
        tracing::debug!(
            at_top = state.at_top,
            index = pos.first_visible_index,
            offset = pos.first_visible_offset,
            "header prominence target changed"
        );
        self.observed = Some(state);
        Some(state)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.prominence.advance(elapsed);
    }

    /// Menu activation: ask the list to go back to its first item.  The
    /// request is not awaited; arrival shows up as a later `(0, 0)` position.
    pub fn activate_menu(&self, scroll: &impl ScrollCommander) {
        tracing::debug!("menu activated; requesting scroll to top");
        drop(scroll.request_scroll_to_index(0));
    }

    /// Height of the region holding the background, menu and avatar.
    fn box_height(&self) -> Dp {
        let c = &self.constants;
        background::height(c).max(c.avatar_top_padding + c.avatar_size)
    }

    /// Full header height for the current configuration.
    pub fn height(&self) -> Dp {
        self.box_height() + LABEL_TOP_PADDING + self.line_height + LABEL_BOTTOM_PADDING
    }

    fn menu_bounds(&self, width: Dp) -> DpRect {
        DpRect::new(
            width - MENU_END_PADDING - MENU_TARGET_SIZE,
            MENU_TOP_PADDING,
            MENU_TARGET_SIZE,
            MENU_TARGET_SIZE,
        )
    }

    fn avatar_bounds(&self, width: Dp) -> DpRect {
        let c = &self.constants;
        DpRect::new(
            (width - c.avatar_size) / 2.0,
            c.avatar_top_padding,
            c.avatar_size,
            c.avatar_size,
        )
    }

    /// Build the scene for a header `width` wide.
    pub fn compose(&self, width: Dp) -> HeaderScene {
        let alpha = self.prominence.current();
        let menu_bounds = self.menu_bounds(width);

        let mut commands =
            background::render(width, self.colors.band, self.colors.cutout, &self.constants);
        commands.push(DrawCommand::Icon {
            icon: Icon::Menu,
            bounds: menu_bounds,
            color: self.colors.on_band,
        });
        commands.push(DrawCommand::Avatar {
            bounds: self.avatar_bounds(width),
            content: self.avatar,
            opacity: alpha,
        });
        commands.push(DrawCommand::Text {
            text: self.label.clone(),
            center_x: width / 2.0,
            top: self.box_height() + LABEL_TOP_PADDING,
            color: self.colors.label,
            opacity: alpha,
        });

        HeaderScene {
            commands,
            height: self.height(),
            menu_bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::{AnimatedProminence, StaticProminence};
    use crate::core::scroll::scroll_channel;

    const COLORS: HeaderColors = HeaderColors {
        band: Rgb(0x62, 0x00, 0xee),
        cutout: Rgb::WHITE,
        on_band: Rgb::WHITE,
        label: Rgb(0, 0, 0),
    };
    const SETTLE: Duration = Duration::from_secs(1);

    fn animated() -> HeaderCompositor<AnimatedProminence> {
        HeaderCompositor::new(
            AnimatedProminence::default(),
            LayoutConstants::DEFAULT,
            COLORS,
        )
    }

    fn decoration_opacities(scene: &HeaderScene) -> Vec<f32> {
        scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Avatar { .. } | DrawCommand::Text { .. }))
            .map(DrawCommand::opacity)
            .collect()
    }

    #[test]
    fn layers_in_paint_order() {
        let scene = animated().compose(Dp(360.0));
        let kinds: Vec<&str> = scene
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::FillRect { .. } => "rect",
                DrawCommand::FillArc { .. } => "arc",
                DrawCommand::Icon { .. } => "icon",
                DrawCommand::Avatar { .. } => "avatar",
                DrawCommand::Text { .. } => "text",
            })
            .collect();
        assert_eq!(kinds, ["rect", "arc", "icon", "avatar", "text"]);
    }

    #[test]
    fn geometry_for_default_constants() {
        let header = animated().line_height(Dp(24.0));
        let scene = header.compose(Dp(360.0));

        assert_eq!(scene.height, Dp(92.0 + 8.0 + 24.0 + 20.0));
        assert_eq!(
            scene.menu_bounds,
            DpRect::new(Dp(292.0), Dp(8.0), Dp(48.0), Dp(48.0))
        );
        let avatar = scene
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Avatar { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .expect("avatar present");
        assert_eq!(avatar, DpRect::new(Dp(144.0), Dp(20.0), Dp(72.0), Dp(72.0)));
    }

    #[test]
    fn menu_hit_test() {
        let scene = animated().compose(Dp(360.0));
        assert_eq!(scene.hit_test(Dp(300.0), Dp(20.0)), Some(HeaderHit::Menu));
        assert_eq!(scene.hit_test(Dp(180.0), Dp(20.0)), None);
    }

    #[test]
    fn scroll_away_and_back() {
        let mut header = animated();
        header.observe(ScrollPosition::TOP);
        header.advance(SETTLE);
        assert_eq!(decoration_opacities(&header.compose(Dp(360.0))), [1.0, 1.0]);
        assert_eq!(header.phase(), HeaderPhase::Expanded);

        let state = header.observe(ScrollPosition::new(5, 0)).expect("left the top");
        assert!(!state.at_top);
        header.advance(SETTLE);
        assert_eq!(decoration_opacities(&header.compose(Dp(360.0))), [0.0, 0.0]);
        assert_eq!(header.phase(), HeaderPhase::Collapsed);

        header.observe(ScrollPosition::TOP);
        header.advance(SETTLE);
        assert_eq!(header.prominence().current(), 1.0);
    }

    #[test]
    fn decorations_track_prominence_mid_transition() {
        let mut header = animated();
        header.observe(ScrollPosition::new(2, 0));
        header.advance(Duration::from_millis(100));

        let current = header.prominence().current();
        assert!(current > 0.0 && current < 1.0, "not mid-transition: {current}");
        assert_eq!(
            decoration_opacities(&header.compose(Dp(360.0))),
            [current, current]
        );
        assert!(matches!(header.phase(), HeaderPhase::Transitioning(_)));
    }

    #[test]
    fn repeated_positions_report_no_change() {
        let mut header =
            HeaderCompositor::new(StaticProminence, LayoutConstants::DEFAULT, COLORS);
        assert!(header.observe(ScrollPosition::new(4, 1)).is_some());
        assert_eq!(header.observe(ScrollPosition::new(4, 1)), None);
        assert_eq!(header.observe(ScrollPosition::new(9, 0)), None);
        assert!(header.observe(ScrollPosition::TOP).is_some_and(|s| s.at_top));
    }

    #[test]
    fn menu_stays_visible_while_collapsed() {
        let mut header = animated();
        header.observe(ScrollPosition::new(3, 7));
        header.advance(SETTLE);
        let scene = header.compose(Dp(200.0));
        assert!(scene
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Icon { icon: Icon::Menu, .. })));
    }

    #[tokio::test]
    async fn menu_requests_scroll_to_first_item() {
        let (handle, mut rx) = scroll_channel();
        let mut header = animated();
        header.observe(ScrollPosition::new(12, 4));

        header.activate_menu(&handle);

        let request = rx.recv().await.expect("request sent");
        assert_eq!(request.index, 0);
        // Completing after the header dropped its handle must not fail.
        request.complete();
    }

    #[test]
    fn static_header_ignores_scroll() {
        let mut header =
            HeaderCompositor::new(StaticProminence, LayoutConstants::DEFAULT, COLORS).label("Ada");
        header.observe(ScrollPosition::new(40, 2));
        header.advance(SETTLE);
        let scene = header.compose(Dp(360.0));
        assert_eq!(decoration_opacities(&scene), [1.0, 1.0]);
        assert!(scene
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Ada")));
    }
}
