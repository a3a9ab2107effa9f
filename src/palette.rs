use crate::types::Rgba;
use serde::{Deserialize, Serialize};

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 40;
pub const DEFAULT_STROKE_WIDTH: u32 = 6;

/// The swatches, in toolbar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Black,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Violet,
        Color::Black,
    ];

    pub const fn rgba(self) -> Rgba {
        match self {
            Color::Red => Rgba::opaque(255, 0, 0),
            Color::Orange => Rgba::opaque(255, 165, 0),
            Color::Yellow => Rgba::opaque(255, 255, 0),
            Color::Green => Rgba::opaque(0, 128, 0),
            Color::Blue => Rgba::opaque(0, 0, 255),
            Color::Violet => Rgba::opaque(238, 130, 238),
            Color::Black => Rgba::opaque(0, 0, 0),
        }
    }

    /// Swatch for a 1-based keyboard shortcut.
    pub fn from_shortcut(n: usize) -> Option<Color> {
        n.checked_sub(1).and_then(|i| Color::ALL.get(i).copied())
    }
}

impl Default for Color {
    // last swatch in the toolbar
    fn default() -> Self {
        Color::Black
    }
}

/// Active pen: one color, one width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Color,
    width: u32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: u32) -> Self {
        Self { color, width: clamp_width(width) }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = clamp_width(width);
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::default(), DEFAULT_STROKE_WIDTH)
    }
}

fn clamp_width(width: u32) -> u32 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_black_and_six_wide() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::Black);
        assert_eq!(style.color, *Color::ALL.last().unwrap());
        assert_eq!(style.width(), 6);
    }

    #[test]
    fn width_is_clamped_to_slider_range() {
        let mut style = StrokeStyle::default();
        style.set_width(0);
        assert_eq!(style.width(), MIN_STROKE_WIDTH);
        style.set_width(500);
        assert_eq!(style.width(), MAX_STROKE_WIDTH);
    }

    #[test]
    fn shortcuts_map_to_toolbar_order() {
        assert_eq!(Color::from_shortcut(1), Some(Color::Red));
        assert_eq!(Color::from_shortcut(7), Some(Color::Black));
        assert_eq!(Color::from_shortcut(0), None);
        assert_eq!(Color::from_shortcut(8), None);
    }
}
