//! Curved header background: a flat colour band whose bottom edge is
//! scooped out by a shallow elliptical dome that cradles the avatar.

use super::draw::DrawCommand;
use super::geometry::{Dp, DpRect, LayoutConstants, Rgb};

/// Arc start, clockwise from 3 o'clock: 9 o'clock.
const ARC_START_DEGREES: f32 = 180.0;
/// Half a turn, through 12 o'clock to 3 o'clock.
const ARC_SWEEP_DEGREES: f32 = 180.0;

/// Fixed height of the background for `constants`.
pub fn height(constants: &LayoutConstants) -> Dp {
    constants.background_height()
}

/// Bounds of the cutout ellipse for a background `width` wide.
///
/// The box spans the full width and is exactly `curve_height` tall, so for
/// any width other than `curve_height` the cutout is an ellipse rather than
/// a circle.
pub fn arc_bounds(width: Dp, constants: &LayoutConstants) -> DpRect {
    DpRect::new(
        Dp::ZERO,
        constants.arc_anchor_y(),
        width,
        constants.curve_height,
    )
}

/// Drawing commands for the background, back to front.
pub fn render(
    width: Dp,
    band: Rgb,
    cutout: Rgb,
    constants: &LayoutConstants,
) -> Vec<DrawCommand> {
    vec![
        DrawCommand::FillRect {
            bounds: DpRect::new(Dp::ZERO, Dp::ZERO, width, height(constants)),
            color: band,
        },
        DrawCommand::FillArc {
            bounds: arc_bounds(width, constants),
            start_angle: ARC_START_DEGREES,
            sweep_angle: ARC_SWEEP_DEGREES,
            use_center: true,
            color: cutout,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: Rgb = Rgb(0x62, 0x00, 0xee);
    const SURFACE: Rgb = Rgb::WHITE;

    #[test]
    fn band_then_arc() {
        let cmds = render(Dp(360.0), BAND, SURFACE, &LayoutConstants::DEFAULT);
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[0],
            DrawCommand::FillRect {
                bounds: DpRect::new(Dp(0.0), Dp(0.0), Dp(360.0), Dp(66.0)),
                color: BAND,
            }
        );
        match &cmds[1] {
            DrawCommand::FillArc {
                bounds,
                start_angle,
                sweep_angle,
                use_center,
                color,
            } => {
                assert_eq!(*bounds, DpRect::new(Dp(0.0), Dp(56.0), Dp(360.0), Dp(20.0)));
                assert_eq!(*start_angle, 180.0);
                assert_eq!(*sweep_angle, 180.0);
                assert!(*use_center);
                assert_eq!(*color, SURFACE);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn height_follows_constants() {
        let constants = LayoutConstants {
            avatar_top_padding: Dp(10.0),
            avatar_size: Dp(40.0),
            curve_height: Dp(8.0),
        };
        assert_eq!(height(&constants), Dp(34.0));
        assert_eq!(arc_bounds(Dp(100.0), &constants).y, Dp(30.0));
    }

    #[test]
    fn arc_is_elliptical_not_circular() {
        let bounds = arc_bounds(Dp(360.0), &LayoutConstants::DEFAULT);
        assert_eq!(bounds.width, Dp(360.0));
        assert_eq!(bounds.height, Dp(20.0));
        // The dome's chord lands on the band's bottom edge.
        assert_eq!(bounds.center_y(), height(&LayoutConstants::DEFAULT));
    }
}
