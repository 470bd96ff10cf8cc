//! The street: a packed row of buildings inside a clipped, framed rectangle

use log::debug;
use crate::config::Settings;
use crate::math::{Rect, SketchRng};
use crate::style::Palette;
use super::building::Building;
use super::shape::{Shape, Style};

// Narrowest remainder still worth a filler building
const FILLER_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct Tajimi {
    /// Ascending by footprint area; later entries draw in front
    pub buildings: Vec<Building>,
    /// Visible rectangle the street was composed for
    pub target: Rect,
    /// Overscanned extent the buildings were packed into
    pub bounds: Rect,
    pub background: Rect,
    /// Stroked frame, inset by the stroke width
    pub frame: Rect,
    /// Clip for everything, inset by half the stroke width
    pub clip: Rect,
}

impl Tajimi {
    /// Greedily pack buildings left to right over `target` plus the overscan,
    /// finish with a filler that consumes exactly the remaining width, then
    /// sort by area for painter's order.
    pub fn generate(target: Rect, settings: &Settings, rng: &mut SketchRng) -> Self {
        let width = target.width();
        let height = target.height();

        let minimum_building_width = settings.building_width_minimum_factor * width;
        let minimum_available_space = settings.building_width_factor_threshold * width;
        let overscan = width * settings.street_overscan;

        let mut available_width = width + overscan;
        let mut current_x = target.min_x() - overscan * 0.5;
        let bounds = Rect::from_xywh(current_x, target.min_y(), available_width, height);

        let sample_height = |rng: &mut SketchRng| {
            rng.range(
                settings.building_height_min_factor * height,
                settings.building_height_max_factor * height,
            )
        };

        let mut buildings = Vec::new();
        while available_width > minimum_available_space && buildings.len() < settings.max_buildings {
            let building_height = sample_height(rng);
            let mut building_width = rng
                .range(
                    building_height * settings.building_width_min_factor,
                    building_height * settings.building_width_max_factor,
                )
                .ceil();

            // Never leave a sliver for the next building
            if available_width - building_width < minimum_building_width {
                building_width *= settings.building_shrink_factor;
            }
            let building_width = building_width.max(1.0).min(available_width);

            let x = current_x + rng.jitter(settings.building_jitter);
            let body = Rect::from_xywh(x, target.max_y() - building_height, building_width, building_height);
            let building = Building::generate(body, settings, rng);

            available_width -= building.body.width();
            current_x += building.body.width();
            buildings.push(building);
        }

        if available_width > FILLER_EPSILON {
            let building_height = sample_height(rng);
            let body = Rect::from_xywh(
                current_x,
                target.max_y() - building_height,
                available_width,
                building_height,
            );
            buildings.push(Building::generate(body, settings, rng));
        }

        buildings.sort_by(|a, b| a.area().total_cmp(&b.area()));
        for (index, building) in buildings.iter_mut().enumerate() {
            for tile in &mut building.tiles {
                tile.building = index;
            }
        }

        debug!(
            "composed street of {} buildings over {:.1}px",
            buildings.len(),
            bounds.width()
        );

        let stroke_width = settings.stroke_width;
        Self {
            buildings,
            target,
            bounds,
            background: target,
            frame: target.inset(stroke_width),
            clip: target.inset(stroke_width * 0.5),
        }
    }

    /// Sum of body widths; equals the overscanned width
    pub fn packed_width(&self) -> f32 {
        self.buildings.iter().map(|b| b.body.width()).sum()
    }

    pub fn to_shape(&self, palette: &Palette, settings: &Settings) -> Shape {
        let radius = settings.frame_radius;
        let mut children = Vec::with_capacity(self.buildings.len() + 2);

        children.push(Shape::rect(self.background, radius, Style::filled(palette.background_color)));
        children.extend(self.buildings.iter().map(|b| b.to_shape(palette, settings)));
        children.push(Shape::rect(
            self.frame,
            radius,
            Style::stroked(palette.stroke_color, settings.stroke_width),
        ));

        Shape::clipped(self.clip, radius, children)
    }
}
