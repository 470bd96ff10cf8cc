use serde::{Deserialize, Serialize};
use super::color::Color;

/// Colors for one postcard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill behind the postal frame
    pub background_color: Color,
    /// Fill of the postal frame itself
    pub frame_color: Color,
    /// Outlines, shadows, silhouettes
    pub stroke_color: Color,
    /// First tile color endpoint
    pub tile_color_a: Color,
    /// Second tile color endpoint
    pub tile_color_b: Color,
    pub window_color: Color,
    pub window_frame_color: Color,
    /// Base of the shine accents (drawn brightened)
    pub window_shine_color: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(0xFD, 0xEB, 0xED),
            frame_color: Color::WHITE,
            stroke_color: Color::from_rgb8(0xD9, 0xAC, 0xF5),
            tile_color_a: Color::from_rgb8(0xFF, 0xCE, 0xFE),
            tile_color_b: Color::from_rgb8(0xAA, 0xE3, 0xE2),
            window_color: Color::from_rgb8(0xFD, 0xF7, 0xC3),
            window_frame_color: Color::WHITE,
            window_shine_color: Color::from_rgb8(0xFD, 0xF7, 0xC3),
        }
    }
}

impl Palette {
    /// Shine accents are the shine base lifted well above the glass
    pub fn shine_fill(&self) -> Color {
        self.window_shine_color.brighten(1.5)
    }
}
