//! Lengths, rectangles and colours used by the scene description.

use std::ops::{Add, Div, Mul, Sub};

/// Density-independent length.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn max(self, other: Dp) -> Dp {
        Dp(self.0.max(other.0))
    }
}

impl Add for Dp {
    type Output = Dp;
    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl Sub for Dp {
    type Output = Dp;
    fn sub(self, rhs: Dp) -> Dp {
        Dp(self.0 - rhs.0)
    }
}

impl Mul<f32> for Dp {
    type Output = Dp;
    fn mul(self, rhs: f32) -> Dp {
        Dp(self.0 * rhs)
    }
}

impl Div<f32> for Dp {
    type Output = Dp;
    fn div(self, rhs: f32) -> Dp {
        Dp(self.0 / rhs)
    }
}

/// Axis-aligned rectangle in dp, y growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DpRect {
    pub x: Dp,
    pub y: Dp,
    pub width: Dp,
    pub height: Dp,
}

impl DpRect {
    pub fn new(x: Dp, y: Dp, width: Dp, height: Dp) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> Dp {
        self.x + self.width
    }

    pub fn bottom(&self) -> Dp {
        self.y + self.height
    }

    pub fn center_x(&self) -> Dp {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> Dp {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, x: Dp, y: Dp) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Fixed sizes of the header decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    pub avatar_top_padding: Dp,
    pub avatar_size: Dp,
    pub curve_height: Dp,
}

impl LayoutConstants {
    pub const DEFAULT: LayoutConstants = LayoutConstants {
        avatar_top_padding: Dp(20.0),
        avatar_size: Dp(72.0),
        curve_height: Dp(20.0),
    };

    /// Vertical position of the avatar's centre line; the cutout arc's
    /// bounding box starts here.
    pub fn arc_anchor_y(&self) -> Dp {
        self.avatar_top_padding + self.avatar_size / 2.0
    }

    /// Height of the curved background band.
    pub fn background_height(&self) -> Dp {
        self.arc_anchor_y() + self.curve_height / 2.0
    }
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Linear blend of `self` (underneath) toward `top` by `alpha`.
    pub fn blend(self, top: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |under: u8, over: u8| -> u8 {
            (under as f32 + (over as f32 - under as f32) * a).round() as u8
        };
        Rgb(mix(self.0, top.0), mix(self.1, top.1), mix(self.2, top.2))
    }
}
