//! Scroll position as reported by the list, and the "at top" signal derived
//! from it.

/// Where the list currently is, as `(first visible item, pixels scrolled
/// past that item's top edge)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScrollPosition {
    pub first_visible_index: usize,
    pub first_visible_offset: u32,
}

impl ScrollPosition {
    /// The origin: first pixel of the first item.
    pub const TOP: Self = Self {
        first_visible_index: 0,
        first_visible_offset: 0,
    };

    pub fn new(first_visible_index: usize, first_visible_offset: u32) -> Self {
        Self {
            first_visible_index,
            first_visible_offset,
        }
    }
}

/// Whether header decorations should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProminenceState {
    pub at_top: bool,
}

impl ProminenceState {
    /// Animation target for this state: `1.0` when at the top, else `0.0`.
    pub fn target(self) -> f32 {
        if self.at_top {
            1.0
        } else {
            0.0
        }
    }
}

/// Map a scroll position to the prominence signal.
///
/// Only the exact origin counts as "at top"; index 0 with any offset does not.
pub fn derive(pos: ScrollPosition) -> ProminenceState {
    ProminenceState {
        at_top: pos == ScrollPosition::TOP,
    }
}
