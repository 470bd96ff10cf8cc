use serde::{Deserialize, Serialize};
use log::warn;
use super::error::ConfigError;
use crate::style::Palette;

/// Most tiles a building can have across its width, or down its height
pub const MAX_TILE_COUNT: usize = 256;

/// One window size/variant preset, drawn by weight for every emitted window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPreset {
    /// Width as a fraction of the window cell
    pub width_scale: f32,
    /// Height as a fraction of the window cell
    pub height_scale: f32,
    /// Draw the vertical division line
    pub divisor: bool,
    /// May hold a silhouette instead of shine
    pub silhouette: bool,
    /// Relative draw weight
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl WindowPreset {
    pub const fn new(width_scale: f32, height_scale: f32, divisor: bool, silhouette: bool) -> Self {
        Self {
            width_scale,
            height_scale,
            divisor,
            silhouette,
            weight: 1.0,
        }
    }

    /// The four presets of the postcard: two divided panes, two small panes
    /// that may frame a silhouette
    pub fn defaults() -> Vec<WindowPreset> {
        vec![
            WindowPreset::new(1.0, 0.75, true, false),
            WindowPreset::new(1.0, 1.0, true, false),
            WindowPreset::new(0.75, 0.75, false, true),
            WindowPreset::new(0.75, 1.0, false, true),
        ]
    }
}

/// Frame timings of the looping animation, all in frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Length of one seamless loop
    pub cycle_length: f32,
    /// Every building finishes its entrance within this many frames
    pub entrance_budget: f32,
    pub building_duration_min: f32,
    pub building_duration_max: f32,
    /// Spread of tile reveal starts across one building
    pub tile_reveal_span: f32,
    /// Extra tile reveal delay per building index
    pub tile_building_stagger: f32,
    pub tile_reveal_duration: f32,
    /// Color-cycle period range
    pub tile_cycle_min: f32,
    pub tile_cycle_max: f32,
    /// Random color-cycle delay after a tile is revealed
    pub tile_cycle_delay_span: f32,
    /// Spread of window reveal starts across one building
    pub window_reveal_span: f32,
    pub window_reveal_duration: f32,
    /// Synchronized exit window shared by all buildings
    pub exit_start: f32,
    pub exit_end: f32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            cycle_length: 340.0,
            entrance_budget: 60.0,
            building_duration_min: 25.0,
            building_duration_max: 45.0,
            tile_reveal_span: 50.0,
            tile_building_stagger: 4.0,
            tile_reveal_duration: 20.0,
            tile_cycle_min: 60.0,
            tile_cycle_max: 100.0,
            tile_cycle_delay_span: 30.0,
            window_reveal_span: 30.0,
            window_reveal_duration: 18.0,
            exit_start: 265.0,
            exit_end: 340.0,
        }
    }
}

/// Flat options bundle for one postcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub palette: Palette,

    // Postcard
    pub postal_width: f32,
    pub postal_height: f32,
    /// Postal frame width as a fraction of the view width
    pub postal_frame_offset_factor: f32,
    /// Margin between postal frame and street, as a fraction of the frame width
    pub postal_frame_size_factor: f32,
    pub postal_frame_radius: f32,
    pub stroke_width: f32,

    // Street
    pub building_height_min_factor: f32,
    pub building_height_max_factor: f32,
    pub building_width_min_factor: f32,
    pub building_width_max_factor: f32,
    /// Packing stops once less than this fraction of the width remains
    pub building_width_factor_threshold: f32,
    /// Narrowest remainder allowed after a building, as a fraction of the width
    pub building_width_minimum_factor: f32,
    pub building_shrink_factor: f32,
    /// Horizontal jitter in pixels
    pub building_jitter: f32,
    /// Extra width that bleeds past both visible edges
    pub street_overscan: f32,
    /// Cap on buildings placed by the packing loop (the filler is extra)
    pub max_buildings: usize,
    pub building_shadow: bool,
    pub frame_radius: f32,

    // Tiles
    pub tile_count_min: usize,
    pub tile_count_max: usize,
    pub tile_brightness_jitter: f32,

    // Windows
    pub window_radius: f32,
    pub window_frame_offset_factor: f32,
    pub window_min_frame_offset: f32,
    pub window_grid_offset_factor: f32,
    pub window_grid_cols: usize,
    pub window_space_offset_factor: f32,
    pub window_chance: f32,
    pub silhouette_chance: f32,
    pub shine_chance: f32,
    pub window_presets: Vec<WindowPreset>,

    pub timeline: TimelineSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            postal_width: 540.0,
            postal_height: 540.0,
            postal_frame_offset_factor: 0.9,
            postal_frame_size_factor: 0.1,
            postal_frame_radius: 4.0,
            stroke_width: 1.5,
            building_height_min_factor: 0.35,
            building_height_max_factor: 0.7,
            building_width_min_factor: 0.225,
            building_width_max_factor: 0.375,
            building_width_factor_threshold: 0.25,
            building_width_minimum_factor: 0.15,
            building_shrink_factor: 0.65,
            building_jitter: 20.0,
            street_overscan: 0.3,
            max_buildings: 16,
            building_shadow: true,
            frame_radius: 4.0,
            tile_count_min: 8,
            tile_count_max: 12,
            tile_brightness_jitter: 0.3,
            window_radius: 1.5,
            window_frame_offset_factor: 0.135,
            window_min_frame_offset: 3.0,
            window_grid_offset_factor: 0.1,
            window_grid_cols: 2,
            window_space_offset_factor: 0.175,
            window_chance: 0.75,
            silhouette_chance: 2.0 / 3.0,
            shine_chance: 1.0,
            window_presets: WindowPreset::defaults(),
            timeline: TimelineSettings::default(),
        }
    }
}

impl Settings {
    /// Parse from YAML; missing keys take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(ConfigError::Parse)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Write)
    }

    /// Copy with every numeric field forced into a range the generators can
    /// sample from: non-finite or non-positive factors fall back to their
    /// defaults, inverted min/max pairs are swapped, probabilities are clamped.
    pub fn sanitized(&self) -> Self {
        let d = Settings::default();
        let mut s = self.clone();

        s.postal_width = positive_or(s.postal_width, d.postal_width, "postal_width");
        s.postal_height = positive_or(s.postal_height, d.postal_height, "postal_height");
        s.postal_frame_offset_factor = unit_or(
            s.postal_frame_offset_factor,
            d.postal_frame_offset_factor,
            "postal_frame_offset_factor",
        );
        s.postal_frame_size_factor = non_negative_or(
            s.postal_frame_size_factor,
            d.postal_frame_size_factor,
            "postal_frame_size_factor",
        )
        .min(0.9);
        s.postal_frame_radius = non_negative_or(s.postal_frame_radius, d.postal_frame_radius, "postal_frame_radius");
        s.stroke_width = non_negative_or(s.stroke_width, d.stroke_width, "stroke_width");

        s.building_height_min_factor = positive_or(
            s.building_height_min_factor,
            d.building_height_min_factor,
            "building_height_min_factor",
        );
        s.building_height_max_factor = positive_or(
            s.building_height_max_factor,
            d.building_height_max_factor,
            "building_height_max_factor",
        );
        ordered(
            &mut s.building_height_min_factor,
            &mut s.building_height_max_factor,
            "building_height_*_factor",
        );
        s.building_width_min_factor = positive_or(
            s.building_width_min_factor,
            d.building_width_min_factor,
            "building_width_min_factor",
        );
        s.building_width_max_factor = positive_or(
            s.building_width_max_factor,
            d.building_width_max_factor,
            "building_width_max_factor",
        );
        ordered(
            &mut s.building_width_min_factor,
            &mut s.building_width_max_factor,
            "building_width_*_factor",
        );
        s.building_width_factor_threshold = non_negative_or(
            s.building_width_factor_threshold,
            d.building_width_factor_threshold,
            "building_width_factor_threshold",
        );
        s.building_width_minimum_factor = non_negative_or(
            s.building_width_minimum_factor,
            d.building_width_minimum_factor,
            "building_width_minimum_factor",
        );
        s.building_shrink_factor = unit_or(s.building_shrink_factor, d.building_shrink_factor, "building_shrink_factor");
        s.building_jitter = non_negative_or(s.building_jitter, d.building_jitter, "building_jitter");
        s.street_overscan = non_negative_or(s.street_overscan, d.street_overscan, "street_overscan");
        s.frame_radius = non_negative_or(s.frame_radius, d.frame_radius, "frame_radius");

        if s.tile_count_min == 0 {
            warn!("tile_count_min must be at least 1, using {}", d.tile_count_min);
            s.tile_count_min = d.tile_count_min;
        }
        if s.tile_count_min > s.tile_count_max {
            warn!(
                "tile_count range is inverted ({} > {}), swapping",
                s.tile_count_min, s.tile_count_max
            );
            std::mem::swap(&mut s.tile_count_min, &mut s.tile_count_max);
        }
        if s.tile_count_max > MAX_TILE_COUNT {
            warn!("tile_count_max {} is too large, using {}", s.tile_count_max, MAX_TILE_COUNT);
            s.tile_count_max = MAX_TILE_COUNT;
        }
        s.tile_count_min = s.tile_count_min.min(MAX_TILE_COUNT - 1);
        if s.tile_count_max <= s.tile_count_min {
            s.tile_count_max = s.tile_count_min + 1;
        }
        s.tile_brightness_jitter = non_negative_or(
            s.tile_brightness_jitter,
            d.tile_brightness_jitter,
            "tile_brightness_jitter",
        );

        s.window_radius = non_negative_or(s.window_radius, d.window_radius, "window_radius");
        s.window_frame_offset_factor = non_negative_or(
            s.window_frame_offset_factor,
            d.window_frame_offset_factor,
            "window_frame_offset_factor",
        );
        s.window_min_frame_offset = non_negative_or(
            s.window_min_frame_offset,
            d.window_min_frame_offset,
            "window_min_frame_offset",
        );
        s.window_grid_offset_factor = non_negative_or(
            s.window_grid_offset_factor,
            d.window_grid_offset_factor,
            "window_grid_offset_factor",
        )
        .min(0.45);
        s.window_space_offset_factor = non_negative_or(
            s.window_space_offset_factor,
            d.window_space_offset_factor,
            "window_space_offset_factor",
        )
        .min(0.45);
        s.window_chance = probability(s.window_chance, "window_chance");
        s.silhouette_chance = probability(s.silhouette_chance, "silhouette_chance");
        s.shine_chance = probability(s.shine_chance, "shine_chance");
        for preset in &mut s.window_presets {
            preset.width_scale = unit_or(preset.width_scale, 1.0, "window_presets.width_scale");
            preset.height_scale = unit_or(preset.height_scale, 1.0, "window_presets.height_scale");
            preset.weight = non_negative_or(preset.weight, 1.0, "window_presets.weight");
        }

        s.timeline = s.timeline.sanitized();
        s
    }
}

impl TimelineSettings {
    pub fn sanitized(&self) -> Self {
        let d = TimelineSettings::default();
        let mut t = *self;

        t.cycle_length = positive_or(t.cycle_length, d.cycle_length, "timeline.cycle_length");
        t.entrance_budget = positive_or(t.entrance_budget, d.entrance_budget, "timeline.entrance_budget");
        t.building_duration_min = positive_or(
            t.building_duration_min,
            d.building_duration_min,
            "timeline.building_duration_min",
        );
        t.building_duration_max = positive_or(
            t.building_duration_max,
            d.building_duration_max,
            "timeline.building_duration_max",
        );
        ordered(
            &mut t.building_duration_min,
            &mut t.building_duration_max,
            "timeline.building_duration_*",
        );
        t.tile_reveal_span = non_negative_or(t.tile_reveal_span, d.tile_reveal_span, "timeline.tile_reveal_span");
        t.tile_building_stagger = non_negative_or(
            t.tile_building_stagger,
            d.tile_building_stagger,
            "timeline.tile_building_stagger",
        );
        t.tile_reveal_duration = positive_or(
            t.tile_reveal_duration,
            d.tile_reveal_duration,
            "timeline.tile_reveal_duration",
        );
        t.tile_cycle_min = positive_or(t.tile_cycle_min, d.tile_cycle_min, "timeline.tile_cycle_min");
        t.tile_cycle_max = positive_or(t.tile_cycle_max, d.tile_cycle_max, "timeline.tile_cycle_max");
        ordered(&mut t.tile_cycle_min, &mut t.tile_cycle_max, "timeline.tile_cycle_*");
        t.tile_cycle_delay_span = non_negative_or(
            t.tile_cycle_delay_span,
            d.tile_cycle_delay_span,
            "timeline.tile_cycle_delay_span",
        );
        t.window_reveal_span = non_negative_or(
            t.window_reveal_span,
            d.window_reveal_span,
            "timeline.window_reveal_span",
        );
        t.window_reveal_duration = positive_or(
            t.window_reveal_duration,
            d.window_reveal_duration,
            "timeline.window_reveal_duration",
        );

        t.exit_start = non_negative_or(t.exit_start, d.exit_start, "timeline.exit_start");
        t.exit_end = positive_or(t.exit_end, d.exit_end, "timeline.exit_end");
        ordered(&mut t.exit_start, &mut t.exit_end, "timeline.exit_*");
        if t.exit_end > t.cycle_length {
            warn!("timeline.exit_end {} is past the cycle length, clamping", t.exit_end);
            t.exit_end = t.cycle_length;
            t.exit_start = t.exit_start.min(t.exit_end);
        }
        t
    }
}

fn positive_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("{} = {} is not a positive number, using {}", name, value, default);
        default
    }
}

fn non_negative_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{} = {} is negative or not a number, using {}", name, value, default);
        default
    }
}

fn unit_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        value
    } else {
        warn!("{} = {} is outside (0, 1], using {}", name, value, default);
        default
    }
}

fn probability(value: f32, name: &str) -> f32 {
    if !value.is_finite() {
        warn!("{} is not a number, using 0", name);
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn ordered(min: &mut f32, max: &mut f32, name: &str) {
    if *min > *max {
        warn!("{} range is inverted ({} > {}), swapping", name, min, max);
        std::mem::swap(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_sanitizing() {
        let s = Settings::default();
        assert_eq!(s.sanitized(), s);
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
postal_width: 800
window_grid_cols: 3
stroke_color: '#382B80'
timeline:
  cycle_length: 200
  exit_start: 150
  exit_end: 200
"#;
        let s = Settings::from_yaml(yaml).unwrap();
        assert_eq!(s.postal_width, 800.0);
        assert_eq!(s.window_grid_cols, 3);
        assert_eq!(s.palette.stroke_color.to_hex(), "#382b80");
        assert_eq!(s.timeline.cycle_length, 200.0);
        // Untouched keys keep their defaults
        assert_eq!(s.building_shrink_factor, 0.65);
        assert_eq!(s.timeline.entrance_budget, 60.0);
        assert_eq!(s.window_presets.len(), 4);
    }

    #[test]
    fn test_yaml_round_trip_defaults() {
        let s = Settings::default();
        let text = s.to_yaml().unwrap();
        let back = Settings::from_yaml(&text).unwrap();
        assert_eq!(back.postal_width, s.postal_width);
        assert_eq!(back.palette, s.palette);
        assert_eq!(back.window_presets, s.window_presets);
        assert_eq!(back.timeline, s.timeline);
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let err = Settings::from_yaml("tile_color_a: 'not-a-color'").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_sanitize_swaps_inverted_ranges() {
        let s = Settings {
            building_height_min_factor: 0.8,
            building_height_max_factor: 0.3,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.building_height_min_factor, 0.3);
        assert_eq!(s.building_height_max_factor, 0.8);
    }

    #[test]
    fn test_sanitize_bounds_tile_counts() {
        let huge = Settings {
            tile_count_max: 100_000_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(huge.tile_count_min, 8);
        assert_eq!(huge.tile_count_max, MAX_TILE_COUNT);

        let inverted = Settings {
            tile_count_min: 12,
            tile_count_max: 8,
            ..Default::default()
        }
        .sanitized();
        assert_eq!((inverted.tile_count_min, inverted.tile_count_max), (8, 12));

        let both_huge = Settings {
            tile_count_min: 5_000,
            tile_count_max: 9_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(both_huge.tile_count_min, MAX_TILE_COUNT - 1);
        assert_eq!(both_huge.tile_count_max, MAX_TILE_COUNT);
    }

    #[test]
    fn test_sanitize_replaces_degenerate_values() {
        let s = Settings {
            building_width_min_factor: 0.0,
            building_width_max_factor: f32::NAN,
            tile_count_min: 0,
            tile_count_max: 0,
            window_chance: 4.0,
            building_shrink_factor: -1.0,
            ..Default::default()
        }
        .sanitized();
        let d = Settings::default();
        assert_eq!(s.building_width_min_factor, d.building_width_min_factor);
        assert_eq!(s.building_width_max_factor, d.building_width_max_factor);
        assert_eq!(s.tile_count_min, d.tile_count_min);
        assert!(s.tile_count_max > s.tile_count_min);
        assert_eq!(s.window_chance, 1.0);
        assert_eq!(s.building_shrink_factor, d.building_shrink_factor);
    }

    #[test]
    fn test_timeline_exit_clamped_to_cycle() {
        let t = TimelineSettings {
            cycle_length: 200.0,
            exit_start: 265.0,
            exit_end: 340.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.exit_end, 200.0);
        assert_eq!(t.exit_start, 200.0);
    }
}
