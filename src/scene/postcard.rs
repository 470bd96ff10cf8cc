use crate::config::Settings;
use crate::math::{Rect, SketchRng};
use super::shape::{Shape, Style};
use super::tajimi::Tajimi;

/// The whole scene: view background, postal frame, and the street inside it
#[derive(Debug, Clone, PartialEq)]
pub struct Postcard {
    pub view: Rect,
    pub frame: Rect,
    pub tajimi: Tajimi,
}

impl Postcard {
    pub fn generate(settings: &Settings, rng: &mut SketchRng) -> Self {
        let view = Rect::from_xywh(0.0, 0.0, settings.postal_width, settings.postal_height);

        let frame_offset = (view.width() - view.width() * settings.postal_frame_offset_factor) * 0.5;
        let frame = view.inset(frame_offset);

        let canvas_offset = frame.width() * settings.postal_frame_size_factor * 0.5;
        let canvas = frame.inset(canvas_offset);

        Self {
            view,
            frame,
            tajimi: Tajimi::generate(canvas, settings, rng),
        }
    }

    /// New color pairs for every tile; geometry is untouched
    pub fn recolor_tiles(&mut self, settings: &Settings, rng: &mut SketchRng) {
        for building in &mut self.tajimi.buildings {
            for tile in &mut building.tiles {
                tile.recolor(&settings.palette, settings.tile_brightness_jitter, rng);
            }
        }
    }

    pub fn to_shape(&self, settings: &Settings) -> Shape {
        let palette = &settings.palette;
        Shape::group(vec![
            Shape::rect(self.view, 0.0, Style::filled(palette.background_color)),
            Shape::rect(
                self.frame,
                settings.postal_frame_radius,
                Style::filled(palette.frame_color).with_stroke(palette.stroke_color, settings.stroke_width),
            ),
            self.tajimi.to_shape(palette, settings),
        ])
    }
}
