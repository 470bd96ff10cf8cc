//! Window units placed in a grid over a building body

use crate::config::{Settings, WindowPreset};
use crate::math::{arc_through, Rect, SketchRng, Vec2};
use crate::style::Palette;
use super::shape::{Shape, Style};

// Narrow windows get a wider frame: inset grows as this over the width
const INSET_RESCALE: f32 = 1.25 * 190.0;
const GLASS_MASK_FACTOR: f32 = 0.98;
const SILHOUETTE_SEGMENTS: usize = 12;

/// Legal accent combinations for one window.
/// Shine and silhouette never appear together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowVariant {
    Plain,
    WithDivisor,
    WithShine { divisor: bool },
    WithSilhouette { divisor: bool },
}

impl WindowVariant {
    fn resolve(divisor: bool, shine: bool, silhouette: bool) -> Self {
        match (silhouette, shine, divisor) {
            (true, _, divisor) => WindowVariant::WithSilhouette { divisor },
            (false, true, divisor) => WindowVariant::WithShine { divisor },
            (false, false, true) => WindowVariant::WithDivisor,
            (false, false, false) => WindowVariant::Plain,
        }
    }

    pub fn has_divisor(&self) -> bool {
        match self {
            WindowVariant::Plain => false,
            WindowVariant::WithDivisor => true,
            WindowVariant::WithShine { divisor } | WindowVariant::WithSilhouette { divisor } => *divisor,
        }
    }

    pub fn has_shine(&self) -> bool {
        matches!(self, WindowVariant::WithShine { .. })
    }

    pub fn has_silhouette(&self) -> bool {
        matches!(self, WindowVariant::WithSilhouette { .. })
    }
}

/// A person standing behind the glass
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    pub head_center: Vec2,
    pub head_radius: f32,
    /// Closed outline of the shoulders
    pub body: Vec<Vec2>,
}

impl Silhouette {
    fn new(glass: Rect) -> Self {
        let at = |fx: f32, fy: f32| glass.origin + Vec2::new(glass.width() * fx, glass.height() * fy);
        Self {
            head_center: glass.center(),
            head_radius: glass.width() * 0.2,
            body: arc_through(at(0.2, 1.0), at(0.5, 0.6), at(0.8, 1.0), SILHOUETTE_SEGMENTS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub frame: Rect,
    pub glass: Rect,
    /// Distance between frame and glass on every side
    pub inset: f32,
    pub variant: WindowVariant,
    /// Vertical division line across the glass, always present
    pub division: (Vec2, Vec2),
    /// Zero when the variant has no divisor
    pub division_width: f32,
    /// Diagonal shine quads, clipped by the glass when drawn
    pub shines: Vec<[Vec2; 4]>,
    pub silhouette: Option<Silhouette>,
    /// Reveal scale shown this frame
    pub scale: f32,
    /// Downward slide of the silhouette this frame
    pub silhouette_offset: f32,
}

/// Glass inset for a frame of width `width`: the largest of a width fraction,
/// a rescaled fraction that grows as windows shrink, and the hard minimum
pub fn frame_inset(width: f32, settings: &Settings) -> f32 {
    let f = settings.window_frame_offset_factor;
    let rescaled = if width > 0.0 { INSET_RESCALE / width * f } else { 0.0 };
    let inset = (width * f).max(rescaled).max(settings.window_min_frame_offset);
    if inset.is_finite() {
        inset
    } else {
        settings.window_min_frame_offset
    }
}

impl Window {
    pub fn new(frame: Rect, variant: WindowVariant, settings: &Settings, rng: &mut SketchRng) -> Self {
        let inset = frame_inset(frame.width(), settings);
        let glass = frame.inset(inset);

        let division = (
            glass.origin + Vec2::new(glass.width() * 0.5, 0.0),
            glass.origin + Vec2::new(glass.width() * 0.5, glass.height()),
        );
        let division_width = if variant.has_divisor() { settings.stroke_width } else { 0.0 };

        let shines = if variant.has_shine() {
            random_shines(glass, rng)
        } else {
            Vec::new()
        };
        let silhouette = variant.has_silhouette().then(|| Silhouette::new(glass));

        Self {
            frame,
            glass,
            inset,
            variant,
            division,
            division_width,
            shines,
            silhouette,
            scale: 1.0,
            silhouette_offset: 0.0,
        }
    }

    pub fn to_shape(&self, palette: &Palette, settings: &Settings) -> Option<Shape> {
        if self.scale <= 0.0 {
            return None;
        }

        let center = self.frame.center();
        let s = self.scale;
        let tf = |p: Vec2| center + (p - center) * s;
        let tf_rect = |r: Rect| Rect::new(tf(r.origin), r.size * s);
        let radius = settings.window_radius * s;
        let stroke = palette.stroke_color;
        let stroke_width = settings.stroke_width;

        let frame = Shape::rect(
            tf_rect(self.frame),
            radius,
            Style::filled(palette.window_frame_color)
                .with_stroke(stroke, stroke_width)
                .with_shadow(stroke, 8.0, Vec2::new(0.0, 8.0)),
        );

        let glass = tf_rect(self.glass);
        let mut pane = vec![Shape::rect(glass, radius, Style::filled(palette.window_color))];

        let shine_fill = palette.shine_fill();
        for quad in &self.shines {
            pane.push(Shape::Polygon {
                points: quad.iter().map(|p| tf(*p)).collect(),
                style: Style::filled(shine_fill),
            });
        }

        if let Some(silhouette) = &self.silhouette {
            let slide = Vec2::new(0.0, self.silhouette_offset);
            let style = Style::filled(stroke);
            pane.push(Shape::Circle {
                center: tf(silhouette.head_center + slide),
                radius: silhouette.head_radius * s,
                style,
            });
            pane.push(Shape::Polygon {
                points: silhouette.body.iter().map(|p| tf(*p + slide)).collect(),
                style,
            });
        }

        pane.push(Shape::Line {
            from: tf(self.division.0),
            to: tf(self.division.1),
            style: Style::stroked(stroke, self.division_width),
        });
        pane.push(Shape::rect(glass, radius, Style::stroked(stroke, stroke_width)));

        let mask = Rect::new(glass.origin, glass.size * GLASS_MASK_FACTOR);
        Some(Shape::group(vec![frame, Shape::clipped(mask, radius, pane)]))
    }
}

/// Two or three diagonal bands running down-left across the glass
fn random_shines(glass: Rect, rng: &mut SketchRng) -> Vec<[Vec2; 4]> {
    let segments = rng.range_usize(2, 4);
    let hip = glass.size * 2.0;
    let mut position = 0.0;
    let mut shines = Vec::with_capacity(segments);

    for _ in 0..segments {
        let dimension = rng.range(0.1, 0.3);
        let offset = rng.range(0.05, 0.3);

        let start = position + offset;
        let end = start + dimension;

        shines.push([
            glass.origin + Vec2::new(hip.x * start, 0.0),
            glass.origin + Vec2::new(hip.x * end, 0.0),
            glass.origin + Vec2::new(0.0, hip.y * end),
            glass.origin + Vec2::new(0.0, hip.y * start),
        ]);
        position += offset + dimension;
    }

    shines
}

fn pick_preset(settings: &Settings, rng: &mut SketchRng) -> WindowPreset {
    let weights: Vec<f32> = settings.window_presets.iter().map(|p| p.weight).collect();
    rng.pick_weighted(&weights)
        .and_then(|i| settings.window_presets.get(i).copied())
        .unwrap_or(WindowPreset::new(1.0, 1.0, false, false))
}

/// Whether a frame keeps some glass once the inset is taken off every side
pub fn has_room_for_glass(frame: Rect, settings: &Settings) -> bool {
    let margin = 2.0 * frame_inset(frame.width(), settings);
    frame.width() > margin && frame.height() > margin
}

/// Emit one window for a square grid cell, sized by a random preset.
/// Cells too small to show any glass stay empty.
fn generate_window(cell: Rect, settings: &Settings, rng: &mut SketchRng) -> Option<Window> {
    let preset = pick_preset(settings, rng);
    let silhouette = preset.silhouette && rng.chance(settings.silhouette_chance);
    let shine = !silhouette && rng.chance(settings.shine_chance);
    let variant = WindowVariant::resolve(preset.divisor, shine, silhouette);

    let size = cell.size.mul_elem(&Vec2::new(preset.width_scale, preset.height_scale));
    let frame = Rect::new(cell.center() - size * 0.5, size);
    if !has_room_for_glass(frame, settings) {
        return None;
    }

    Some(Window::new(frame, variant, settings, rng))
}

/// Lay a `window_grid_cols`-wide grid of window cells over `body` and fill a
/// random subset of them. Rows stop before the last cell would leave the body.
pub fn generate_window_grid(body: Rect, settings: &Settings, rng: &mut SketchRng) -> Vec<Window> {
    let cols = settings.window_grid_cols;
    if cols == 0 || !body.is_drawable() {
        return Vec::new();
    }

    let grid_offset = body.width() * settings.window_grid_offset_factor;
    let space = (body.width() - grid_offset * 2.0) / cols as f32;
    if !(space.is_finite() && space > 0.0) {
        return Vec::new();
    }
    let rows = ((body.height() - grid_offset) / space).floor().max(0.0) as usize;

    let space_offset = space * settings.window_space_offset_factor;
    let side = space - space_offset * 2.0;
    if side <= 0.0 {
        return Vec::new();
    }

    let mut windows = Vec::new();
    for col in 0..cols {
        for row in 0..rows {
            if !rng.chance(settings.window_chance) {
                continue;
            }
            let point = body.origin
                + Vec2::splat(grid_offset + space_offset)
                + Vec2::new(col as f32 * space, row as f32 * space);
            windows.extend(generate_window(Rect::new(point, Vec2::splat(side)), settings, rng));
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Rect {
        Rect::from_xywh(40.0, 120.0, 90.0, 300.0)
    }

    #[test]
    fn test_glass_inside_frame_with_min_inset() {
        let settings = Settings::default();
        for seed in 0..20 {
            let mut rng = SketchRng::new(seed);
            for window in generate_window_grid(body(), &settings, &mut rng) {
                assert!(window.inset >= settings.window_min_frame_offset);
                assert!(window.frame.contains_rect(&window.glass, 1e-4));
                assert!(window.glass.min_x() - window.frame.min_x() >= settings.window_min_frame_offset - 1e-4);
                assert!(window.frame.max_y() - window.glass.max_y() >= settings.window_min_frame_offset - 1e-4);
            }
        }
    }

    #[test]
    fn test_windows_stay_inside_body() {
        let settings = Settings::default();
        for seed in 0..20 {
            let mut rng = SketchRng::new(seed);
            for window in generate_window_grid(body(), &settings, &mut rng) {
                assert!(body().contains_rect(&window.frame, 1e-3));
            }
        }
    }

    #[test]
    fn test_inset_candidates() {
        let settings = Settings::default();
        // Wide window: the width fraction wins
        assert!((frame_inset(100.0, &settings) - 13.5).abs() < 1e-4);
        // Small window: the rescaled fraction wins
        let small = frame_inset(8.0, &settings);
        assert!((small - INSET_RESCALE / 8.0 * 0.135).abs() < 1e-4);
        assert!(small > settings.window_min_frame_offset);
        // Nothing below the hard minimum
        let tiny_factor = Settings {
            window_frame_offset_factor: 0.0,
            ..Settings::default()
        };
        assert_eq!(frame_inset(50.0, &tiny_factor), 3.0);
        assert_eq!(frame_inset(0.0, &tiny_factor), 3.0);
    }

    #[test]
    fn test_variant_flags_are_exclusive() {
        let settings = Settings {
            silhouette_chance: 1.0,
            ..Settings::default()
        };
        let mut rng = SketchRng::new(3);
        let windows = generate_window_grid(Rect::from_xywh(0.0, 0.0, 200.0, 800.0), &settings, &mut rng);
        assert!(!windows.is_empty());
        for window in &windows {
            assert!(!(window.variant.has_shine() && window.variant.has_silhouette()));
            assert_eq!(window.silhouette.is_some(), window.variant.has_silhouette());
            assert_eq!(window.shines.is_empty(), !window.variant.has_shine());
            if window.variant.has_shine() {
                assert!((2..4).contains(&window.shines.len()));
            }
        }
        assert!(windows.iter().any(|w| w.variant.has_silhouette()));
    }

    #[test]
    fn test_divisor_keeps_node_with_zero_width() {
        let settings = Settings::default();
        let mut rng = SketchRng::new(4);
        let frame = Rect::from_xywh(0.0, 0.0, 40.0, 40.0);
        let plain = Window::new(frame, WindowVariant::Plain, &settings, &mut rng);
        let divided = Window::new(frame, WindowVariant::WithDivisor, &settings, &mut rng);

        assert_eq!(plain.division_width, 0.0);
        assert_eq!(divided.division_width, settings.stroke_width);
        // Division spans the glass height
        assert!((plain.division.1.y - plain.division.0.y - plain.glass.height()).abs() < 1e-4);
        let count = |w: &Window| w.to_shape(&settings.palette, &settings).unwrap().primitive_count();
        assert_eq!(count(&plain), count(&divided));
    }

    #[test]
    fn test_narrow_body_never_emits_empty_glass() {
        let settings = Settings::default();
        // Window frames about 8px wide, where the inset would eat the glass
        let narrow = Rect::from_xywh(0.0, 0.0, 41.0, 300.0);
        for seed in 0..50 {
            let mut rng = SketchRng::new(seed);
            for window in generate_window_grid(narrow, &settings, &mut rng) {
                assert!(window.glass.is_drawable());
                assert!(window.frame.contains_rect(&window.glass, 1e-4));
            }
        }
        let cramped = Rect::from_xywh(0.0, 0.0, 7.995, 7.995);
        assert!(!has_room_for_glass(cramped, &settings));
        assert!(has_room_for_glass(Rect::from_xywh(0.0, 0.0, 30.0, 30.0), &settings));
    }

    #[test]
    fn test_variant_resolution() {
        assert_eq!(WindowVariant::resolve(false, false, false), WindowVariant::Plain);
        assert_eq!(WindowVariant::resolve(true, false, false), WindowVariant::WithDivisor);
        assert_eq!(WindowVariant::resolve(true, true, false), WindowVariant::WithShine { divisor: true });
        assert_eq!(
            WindowVariant::resolve(false, true, true),
            WindowVariant::WithSilhouette { divisor: false }
        );
    }

    #[test]
    fn test_zero_cols_or_tiny_body() {
        let mut rng = SketchRng::new(1);
        let no_cols = Settings {
            window_grid_cols: 0,
            ..Settings::default()
        };
        assert!(generate_window_grid(body(), &no_cols, &mut rng).is_empty());
        assert!(generate_window_grid(Rect::from_xywh(0.0, 0.0, 0.0, 10.0), &Settings::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_hidden_window_emits_nothing() {
        let settings = Settings::default();
        let mut rng = SketchRng::new(2);
        let mut window = Window::new(
            Rect::from_xywh(0.0, 0.0, 30.0, 30.0),
            WindowVariant::WithShine { divisor: true },
            &settings,
            &mut rng,
        );
        window.scale = 0.0;
        assert!(window.to_shape(&settings.palette, &settings).is_none());
    }
}
