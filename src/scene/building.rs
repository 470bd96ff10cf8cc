use crate::config::Settings;
use crate::math::{Rect, SketchRng, Vec2};
use crate::style::Palette;
use super::shape::{Shape, Style};
use super::tiles::{generate_tiles, Tile};
use super::window::{generate_window_grid, Window};

// Buildings grow out of the ground: scale around the bottom center
const GROUND_PIVOT: Vec2 = Vec2 { x: 0.5, y: 1.0 };

/// Per-frame transform of a whole building
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingPose {
    /// Body/shadow scale (entrance)
    pub scale: f32,
    /// Translation of everything (exit)
    pub offset: Vec2,
}

impl Default for BuildingPose {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// One building: body, optional drop shadow, tile overlay and windows
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub body: Rect,
    pub shadow: Option<Rect>,
    pub tiles: Vec<Tile>,
    pub windows: Vec<Window>,
    pub pose: BuildingPose,
}

impl Building {
    /// Build the body at `body` with its tiles and windows.
    /// Degenerate sizes produce a building with no tiles and no windows.
    pub fn generate(body: Rect, settings: &Settings, rng: &mut SketchRng) -> Self {
        let tiles = generate_tiles(body, settings, rng);
        let windows = generate_window_grid(body, settings, rng);
        let shadow = settings.building_shadow.then_some(body);

        Self {
            body,
            shadow,
            tiles,
            windows,
            pose: BuildingPose::default(),
        }
    }

    /// Footprint used for back-to-front ordering
    pub fn area(&self) -> f32 {
        self.body.area()
    }

    /// Union of body and every child at rest
    pub fn bounds(&self) -> Rect {
        let mut bounds = self.body;
        if let Some(shadow) = self.shadow {
            bounds = bounds.union(&shadow);
        }
        for tile in &self.tiles {
            bounds = bounds.union(&tile.rect);
        }
        for window in &self.windows {
            bounds = bounds.union(&window.frame);
        }
        bounds
    }

    /// Shape tree in draw order: shadow, tiles, body outline, windows
    pub fn to_shape(&self, palette: &Palette, settings: &Settings) -> Shape {
        let stroke = palette.stroke_color;
        let stroke_width = settings.stroke_width;
        let visible = self.pose.scale > 0.0;
        let body = self.body.scale_about(self.pose.scale, GROUND_PIVOT);

        let mut children = Vec::with_capacity(self.tiles.len() + self.windows.len() + 2);

        if let (true, Some(shadow)) = (visible, self.shadow) {
            children.push(Shape::rect(
                shadow.scale_about(self.pose.scale, GROUND_PIVOT),
                0.0,
                Style::filled(stroke)
                    .with_stroke(stroke, stroke_width)
                    .with_shadow(stroke, 12.0, Vec2::new(0.0, 8.0)),
            ));
        }

        children.extend(self.tiles.iter().filter_map(|t| t.to_shape(palette, stroke_width)));

        if visible {
            children.push(Shape::rect(body, 0.0, Style::stroked(stroke, stroke_width)));
        }

        children.extend(self.windows.iter().filter_map(|w| w.to_shape(palette, settings)));

        let mut group = Shape::group(children);
        if self.pose.offset != Vec2::ZERO {
            group.translate(self.pose.offset);
        }
        group
    }
}
