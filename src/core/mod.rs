//! Core logic – scroll-to-prominence mapping, animation, and the header
//! scene description.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Output is
//! a list of [`draw::DrawCommand`]s that the `ui` layer rasterises.

pub mod animation;
pub mod background;
pub mod draw;
pub mod geometry;
pub mod header;
pub mod position;
pub mod scroll;
