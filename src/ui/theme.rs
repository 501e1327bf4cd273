//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::geometry::Rgb;
use crate::core::header::HeaderColors;

/// Central theme; every colour the UI uses comes from here.
pub struct Theme;

impl Theme {
    pub const PRIMARY: Rgb = Rgb(0x62, 0x00, 0xee);
    pub const ON_PRIMARY: Rgb = Rgb::WHITE;
    pub const SURFACE: Rgb = Rgb(0x12, 0x12, 0x12);
    pub const ON_SURFACE: Rgb = Rgb(0xe6, 0xe6, 0xe6);

    pub fn header_colors() -> HeaderColors {
        HeaderColors {
            band: Self::PRIMARY,
            cutout: Self::SURFACE,
            on_band: Self::ON_PRIMARY,
            label: Self::ON_SURFACE,
        }
    }

    // ── list ───────────────────────────────────────────────────
    pub fn surface_style() -> Style {
        Style::default()
            .bg(to_color(Self::SURFACE))
            .fg(to_color(Self::ON_SURFACE))
    }

    pub fn row_style() -> Style {
        Style::default().fg(to_color(Self::ON_SURFACE))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn debug_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// RGB value of a cell colour, or `fallback` for palette colours.
pub fn to_rgb(color: Color, fallback: Rgb) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => Rgb(r, g, b),
        _ => fallback,
    }
}
