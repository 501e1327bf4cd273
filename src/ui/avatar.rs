//! Avatar pixels: the built-in account placeholder or a user image.

use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use thiserror::Error;

use crate::core::draw::AvatarContent;
use crate::core::geometry::Rgb;

/// Longest edge kept after loading; the avatar never needs more.
const MAX_SOURCE_EDGE: u32 = 128;

const PLACEHOLDER_BACKGROUND: Rgb = Rgb(0xd3, 0xd3, 0xd3);
const PLACEHOLDER_FIGURE: Rgb = Rgb(0x61, 0x61, 0x61);

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("could not read avatar {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode avatar: {0}")]
    Decode(#[from] image::ImageError),
    #[error("avatar image is empty")]
    Empty,
}

/// Pixel source for the avatar circle.
#[derive(Debug, Clone, Default)]
pub enum AvatarImage {
    #[default]
    Placeholder,
    Picture(Arc<RgbaImage>),
}

impl AvatarImage {
    /// Load and downscale an image file.
    pub fn load(path: &Path) -> Result<Self, AvatarError> {
        let bytes = std::fs::read(path).map_err(|source| AvatarError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let img = image::load_from_memory(&bytes)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(AvatarError::Empty);
        }
        let thumb = img.thumbnail(MAX_SOURCE_EDGE, MAX_SOURCE_EDGE).to_rgba8();
        Ok(AvatarImage::Picture(Arc::new(thumb)))
    }

    /// Load `path` if given, degrading to the placeholder on failure.
    pub fn load_or_placeholder(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return AvatarImage::Placeholder;
        };
        match Self::load(path) {
            Ok(img) => {
                tracing::info!(path = %path.display(), "avatar loaded");
                img
            }
            Err(err) => {
                tracing::warn!(%err, "falling back to placeholder avatar");
                AvatarImage::Placeholder
            }
        }
    }

    pub fn content(&self) -> AvatarContent {
        match self {
            AvatarImage::Placeholder => AvatarContent::Placeholder,
            AvatarImage::Picture(_) => AvatarContent::Picture,
        }
    }

    /// Rasterise to a `width` × `height` pixel grid (row-major).  Pixels
    /// outside the content are `None`; the caller applies the circle clip.
    pub fn rasterise(&self, width: u32, height: u32) -> Vec<Option<Rgb>> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        match self {
            AvatarImage::Placeholder => (0..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .map(|(x, y)| {
                    let u = (x as f32 + 0.5) / width as f32;
                    let v = (y as f32 + 0.5) / height as f32;
                    Some(placeholder_pixel(u, v))
                })
                .collect(),
            AvatarImage::Picture(src) => {
                // Fill the square, cropping the longer edge (centre crop).
                let scale = (width as f32 / src.width() as f32)
                    .max(height as f32 / src.height() as f32);
                let fit_w = ((src.width() as f32 * scale).round() as u32).max(width);
                let fit_h = ((src.height() as f32 * scale).round() as u32).max(height);
                let resized = image::imageops::resize(&**src, fit_w, fit_h, FilterType::Triangle);
                let x0 = (fit_w - width) / 2;
                let y0 = (fit_h - height) / 2;
                (0..height)
                    .flat_map(|y| (0..width).map(move |x| (x, y)))
                    .map(|(x, y)| {
                        let p = resized.get_pixel(x0 + x, y0 + y);
                        let alpha = p[3] as f32 / 255.0;
                        (p[3] > 0).then(|| PLACEHOLDER_BACKGROUND.blend(Rgb(p[0], p[1], p[2]), alpha))
                    })
                    .collect()
            }
        }
    }
}

/// Person silhouette inside a ring, in unit coordinates.
fn placeholder_pixel(u: f32, v: f32) -> Rgb {
    let dist = |cx: f32, cy: f32| ((u - cx).powi(2) + (v - cy).powi(2)).sqrt();
    let r = dist(0.5, 0.5);

    let ring = (0.38..=0.44).contains(&r);
    let head = dist(0.5, 0.38) <= 0.14;
    // Shoulders: top of an ellipse, kept inside the ring.
    let shoulders = r < 0.38 && ((u - 0.5) / 0.28).powi(2) + ((v - 0.86) / 0.26).powi(2) <= 1.0;

    if ring || head || shoulders {
        PLACEHOLDER_FIGURE
    } else {
        PLACEHOLDER_BACKGROUND
    }
}
