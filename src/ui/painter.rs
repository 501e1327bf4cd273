//! Rasterises a [`HeaderScene`] onto the terminal with `▀` half-blocks.
//!
//! One pixel is one column wide and half a row tall, so pixels are roughly
//! square.  Layout units map to pixels through `scale` (units per pixel).
//! Shapes (rects, arcs, avatar) go through a pixel canvas first; glyphs
//! (icons, text) are then placed on top, cell by cell.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

use crate::core::draw::{arc_contains, AvatarContent, DrawCommand};
use crate::core::geometry::{Dp, DpRect, Rgb};
use crate::core::header::HeaderScene;

use super::avatar::AvatarImage;
use super::theme::{to_color, to_rgb};

/// Layout-unit point at the centre of cell `pos`, relative to `area`.
pub fn dp_at(area: Rect, pos: Position, scale: f32) -> Option<(Dp, Dp)> {
    if !area.contains(pos) {
        return None;
    }
    let col = (pos.x - area.x) as f32 + 0.5;
    let row = (pos.y - area.y) as f32 + 0.5;
    Some((Dp(col * scale), Dp(row * 2.0 * scale)))
}

/// Header rows needed for a scene `height` tall.
pub fn rows_for(height: Dp, scale: f32) -> u16 {
    (height.get() / scale / 2.0).ceil().max(0.0) as u16
}

/// Widget painting one header scene into its area.
pub struct ScenePainter<'a> {
    scene: &'a HeaderScene,
    scale: f32,
    avatar: &'a AvatarImage,
    /// Assumed colour under cells with a palette (non-RGB) background.
    surface: Rgb,
}

impl<'a> ScenePainter<'a> {
    pub fn new(scene: &'a HeaderScene, scale: f32, avatar: &'a AvatarImage, surface: Rgb) -> Self {
        Self {
            scene,
            scale: scale.max(f32::EPSILON),
            avatar,
            surface,
        }
    }
}

/// Pixel buffer covering the widget area; `None` leaves the cell as is.
struct Canvas {
    area: Rect,
    width: usize,
    height: usize,
    px: Vec<Option<Rgb>>,
}

impl Canvas {
    fn new(area: Rect) -> Self {
        let width = area.width as usize;
        let height = area.height as usize * 2;
        Self {
            area,
            width,
            height,
            px: vec![None; width * height],
        }
    }

    fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.px[y * self.width + x] = Some(color);
        }
    }

    fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.px.get(y * self.width + x).copied().flatten()
    }

    /// Colour currently visible at pixel `(x, y)`.
    fn under(&self, x: usize, y: usize, buf: &Buffer, fallback: Rgb) -> Rgb {
        self.get(x, y).unwrap_or_else(|| {
            let pos = Position::new(self.area.x + x as u16, self.area.y + (y / 2) as u16);
            buf.cell(pos).map_or(fallback, |c| to_rgb(c.bg, fallback))
        })
    }

    fn fill(&mut self, scale: f32, color: Rgb, inside: impl Fn(Dp, Dp) -> bool) {
        for y in 0..self.height {
            let cy = Dp((y as f32 + 0.5) * scale);
            for x in 0..self.width {
                if inside(Dp((x as f32 + 0.5) * scale), cy) {
                    self.px[y * self.width + x] = Some(color);
                }
            }
        }
    }

    /// Write pixel pairs into cells: equal halves become a blank cell with
    /// that background, mixed halves a `▀` with fg = top, bg = bottom.
    fn commit(&self, buf: &mut Buffer, fallback: Rgb) {
        for row in 0..self.area.height as usize {
            for col in 0..self.width {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);
                if top.is_none() && bottom.is_none() {
                    continue;
                }
                let pos = Position::new(self.area.x + col as u16, self.area.y + row as u16);
                let Some(cell) = buf.cell_mut(pos) else {
                    continue;
                };
                let base = to_rgb(cell.bg, fallback);
                match (top, bottom) {
                    (Some(t), Some(b)) if t == b => {
                        cell.set_char(' ').set_bg(to_color(t));
                    }
                    _ => {
                        cell.set_char('▀')
                            .set_fg(to_color(top.unwrap_or(base)))
                            .set_bg(to_color(bottom.unwrap_or(base)));
                    }
                }
            }
        }
    }
}

impl<'a> ScenePainter<'a> {
    fn paint_avatar(
        &self,
        canvas: &mut Canvas,
        buf: &Buffer,
        bounds: &DpRect,
        content: AvatarContent,
        opacity: f32,
    ) {
        let x0 = (bounds.x.get() / self.scale).round().max(0.0) as usize;
        let y0 = (bounds.y.get() / self.scale).round().max(0.0) as usize;
        let w = (bounds.width.get() / self.scale).round().max(0.0) as u32;
        let h = (bounds.height.get() / self.scale).round().max(0.0) as u32;

        let source = match content {
            AvatarContent::Placeholder => &AvatarImage::Placeholder,
            AvatarContent::Picture => self.avatar,
        };
        let pixels = source.rasterise(w, h);

        for j in 0..h as usize {
            for i in 0..w as usize {
                let u = (i as f32 + 0.5) / w as f32 - 0.5;
                let v = (j as f32 + 0.5) / h as f32 - 0.5;
                if u * u + v * v > 0.25 {
                    continue;
                }
                let Some(color) = pixels[j * w as usize + i] else {
                    continue;
                };
                let (x, y) = (x0 + i, y0 + j);
                if x >= canvas.width || y >= canvas.height {
                    continue;
                }
                let under = canvas.under(x, y, buf, self.surface);
                canvas.set(x, y, under.blend(color, opacity));
            }
        }
    }

    fn glyph_cell(&self, area: Rect, x: Dp, y: Dp) -> Option<Position> {
        let col = (x.get() / self.scale).floor();
        let row = (y.get() / self.scale / 2.0).floor();
        if col < 0.0 || row < 0.0 || col >= area.width as f32 || row >= area.height as f32 {
            return None;
        }
        Some(Position::new(area.x + col as u16, area.y + row as u16))
    }

    fn paint_text(&self, area: Rect, buf: &mut Buffer, cmd: &DrawCommand) {
        let DrawCommand::Text {
            text,
            center_x,
            top,
            color,
            opacity,
        } = cmd
        else {
            return;
        };
        let width = text.chars().count() as f32;
        let start = *center_x - Dp(width * self.scale / 2.0);
        for (i, ch) in text.chars().enumerate() {
            let x = start + Dp((i as f32 + 0.5) * self.scale);
            let Some(pos) = self.glyph_cell(area, x, *top) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                let base = to_rgb(cell.bg, self.surface);
                cell.set_char(ch).set_fg(to_color(base.blend(*color, *opacity)));
            }
        }
    }
}

impl Widget for ScenePainter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut canvas = Canvas::new(area);
        for cmd in self.scene.commands.iter().filter(|c| c.opacity() > 0.0) {
            match cmd {
                DrawCommand::FillRect { bounds, color } => {
                    canvas.fill(self.scale, *color, |x, y| bounds.contains(x, y));
                }
                DrawCommand::FillArc {
                    bounds,
                    start_angle,
                    sweep_angle,
                    use_center,
                    color,
                } => {
                    canvas.fill(self.scale, *color, |x, y| {
                        arc_contains(bounds, *start_angle, *sweep_angle, *use_center, x, y)
                    });
                }
                DrawCommand::Avatar {
                    bounds,
                    content,
                    opacity,
                } => {
                    self.paint_avatar(&mut canvas, buf, bounds, *content, *opacity);
                }
                _ => {}
            }
        }
        canvas.commit(buf, self.surface);

        for cmd in self.scene.commands.iter().filter(|c| c.opacity() > 0.0) {
            match cmd {
                DrawCommand::Icon { icon, bounds, color } => {
                    if let Some(pos) = self.glyph_cell(area, bounds.center_x(), bounds.center_y()) {
                        if let Some(cell) = buf.cell_mut(pos) {
                            cell.set_char(icon.glyph()).set_fg(to_color(*color));
                        }
                    }
                }
                DrawCommand::Text { .. } => {
                    self.paint_text(area, buf, cmd);
                }
                _ => {}
            }
        }
    }
}
