//! Scene description handed to the renderer.
//!
//! Commands are painted in order; later commands occlude earlier ones.

use super::geometry::{Dp, DpRect, Rgb};

/// What fills the avatar circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvatarContent {
    /// Generic "account" silhouette on a light background.
    #[default]
    Placeholder,
    /// An image the renderer has loaded for this header.
    Picture,
}

/// Icon glyphs the header can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Menu,
}

impl Icon {
    pub fn glyph(self) -> char {
        match self {
            Icon::Menu => '☰',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        bounds: DpRect,
        color: Rgb,
    },
    /// Elliptical arc inscribed in `bounds`.  Angles are in degrees,
    /// clockwise from 3 o'clock (y grows downwards).  With `use_center`
    /// the wedge is filled through the ellipse centre.
    FillArc {
        bounds: DpRect,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        color: Rgb,
    },
    /// Circle-clipped avatar.
    Avatar {
        bounds: DpRect,
        content: AvatarContent,
        opacity: f32,
    },
    Icon {
        icon: Icon,
        /// The glyph is centred in these bounds.
        bounds: DpRect,
        color: Rgb,
    },
    /// Single line of text, horizontally centred on `center_x`.
    Text {
        text: String,
        center_x: Dp,
        top: Dp,
        color: Rgb,
        opacity: f32,
    },
}

impl DrawCommand {
    /// Opacity the command is painted with.
    pub fn opacity(&self) -> f32 {
        match self {
            DrawCommand::Avatar { opacity, .. } | DrawCommand::Text { opacity, .. } => *opacity,
            _ => 1.0,
        }
    }
}

/// Returns whether the point `(x, y)` lies inside the filled arc.  Without
/// `use_center` only the segment between the chord and the curve counts.
pub fn arc_contains(
    bounds: &DpRect,
    start_angle: f32,
    sweep_angle: f32,
    use_center: bool,
    x: Dp,
    y: Dp,
) -> bool {
    let rx = bounds.width.get() / 2.0;
    let ry = bounds.height.get() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let dx = x.get() - bounds.center_x().get();
    let dy = y.get() - bounds.center_y().get();
    if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
        return false;
    }
    if sweep_angle.abs() >= 360.0 {
        return true;
    }

    // Clockwise in y-down space is the plain atan2 of (dy, dx).
    let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    let (lo, span) = if sweep_angle >= 0.0 {
        (start_angle, sweep_angle)
    } else {
        (start_angle + sweep_angle, -sweep_angle)
    };
    if (angle - lo).rem_euclid(360.0) > span {
        return false;
    }
    if use_center {
        return true;
    }

    // Segment fill: the point must sit on the curve's side of the chord.
    let on_ellipse = |deg: f32| {
        let r = deg.to_radians();
        (rx * r.cos(), ry * r.sin())
    };
    let (ax, ay) = on_ellipse(lo);
    let (bx, by) = on_ellipse(lo + span);
    let (mx, my) = on_ellipse(lo + span / 2.0);
    let side = |px: f32, py: f32| (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    side(dx, dy) * side(mx, my) >= 0.0
}
