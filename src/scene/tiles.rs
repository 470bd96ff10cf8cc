//! Color-cycling tile overlay drawn on every building body

use crate::config::{Settings, MAX_TILE_COUNT};
use crate::math::{Rect, SketchRng, Vec2};
use crate::style::{Color, Palette};
use super::grid::grid;
use super::shape::{Shape, Style};

/// One grid cell of a building's tile overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    /// Color at the start of a color cycle
    pub current_color: Color,
    /// Color at the peak of a color cycle
    pub next_color: Color,
    /// Index of the owning building in draw order
    pub building: usize,
    /// Fill shown this frame
    pub fill: Color,
    /// Reveal scale shown this frame (0 hidden, 1 full)
    pub scale: f32,
}

impl Tile {
    fn new(rect: Rect, current_color: Color, next_color: Color) -> Self {
        Self {
            rect,
            current_color,
            next_color,
            building: 0,
            fill: current_color,
            scale: 1.0,
        }
    }

    /// Draw a fresh color pair around the palette's tile colors
    pub fn recolor(&mut self, palette: &Palette, jitter: f32, rng: &mut SketchRng) {
        let (current, next) = color_pair(palette, jitter, rng);
        self.current_color = current;
        self.next_color = next;
        self.fill = current;
    }

    pub fn to_shape(&self, palette: &Palette, stroke_width: f32) -> Option<Shape> {
        if self.scale <= 0.0 {
            return None;
        }
        let rect = self.rect.scale_about(self.scale, Vec2::splat(0.5));
        Some(Shape::rect(
            rect,
            0.0,
            Style::filled(self.fill).with_stroke(palette.stroke_color, stroke_width),
        ))
    }
}

fn color_pair(palette: &Palette, jitter: f32, rng: &mut SketchRng) -> (Color, Color) {
    let current = palette.tile_color_a.brighten(rng.jitter(jitter));
    let next = palette.tile_color_b.brighten(rng.jitter(jitter));
    (current, next)
}

/// Cover `body` with roughly square tiles. The tile count across the width is
/// random; rows are whatever it takes to cover the height, and cells are then
/// stretched to partition the body exactly.
pub fn generate_tiles(body: Rect, settings: &Settings, rng: &mut SketchRng) -> Vec<Tile> {
    if !body.is_drawable() {
        return Vec::new();
    }

    let count = rng
        .range_usize(settings.tile_count_min, settings.tile_count_max)
        .clamp(1, MAX_TILE_COUNT);
    let tile_side = body.width() / count as f32;
    let cols = count;
    let rows = ((body.height() / tile_side).ceil() as usize).clamp(1, MAX_TILE_COUNT);

    grid(rows, cols, body.origin, body.size)
        .into_iter()
        .map(|rect| {
            let (current, next) = color_pair(&settings.palette, settings.tile_brightness_jitter, rng);
            Tile::new(rect, current, next)
        })
        .collect()
}
