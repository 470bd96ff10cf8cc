//! Looping timeline for the postcard
//!
//! Every building runs the same sequence inside one cycle:
//! - entrance: body and shadow grow from the ground with an overshoot
//! - tile reveal: tiles pop in, staggered across the building, then pulse colors
//! - window reveal: windows pop in after the last tile, silhouettes slide up
//! - exit: every building slides off-canvas at the same fixed frames
//!
//! Random delays and durations are drawn once in [`Timeline::setup`]; each
//! frame is then a pure function of the wrapped frame number.

use crate::config::TimelineSettings;
use crate::math::{Rect, SketchRng, Vec2};
use crate::scene::{Building, Postcard, Tajimi};
use super::easing::{ease, progress, sine_pulse, Easing};

// Extra distance past the visible edge so shadows leave too
const EXIT_MARGIN: f32 = 16.0;

/// A time window in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub delay: f32,
    pub duration: f32,
}

impl Phase {
    pub const fn new(delay: f32, duration: f32) -> Self {
        Self { delay, duration }
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    /// Progress through this window, clamped to [0, 1]
    pub fn progress(&self, frame: f32) -> f32 {
        progress(frame, self.delay, self.duration)
    }
}

/// Where a building is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingPhase {
    Pending,
    Entrance,
    TileReveal,
    WindowReveal,
    Resting,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTrack {
    pub reveal: Phase,
    /// Color cycle; `duration` is the pulse period, repeated after `delay`
    pub cycle: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTrack {
    pub reveal: Phase,
    /// Silhouette offset before the reveal, zero for windows without one
    pub silhouette_rest: f32,
}

/// Animation record for one building and its children
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingTrack {
    pub entrance: Phase,
    pub exit: Phase,
    /// Horizontal end position of the exit slide
    pub exit_offset: f32,
    /// Frame at which the last tile has been revealed
    pub tiles_end: f32,
    /// Frame at which the last window has been revealed
    pub windows_end: f32,
    pub tiles: Vec<TileTrack>,
    pub windows: Vec<WindowTrack>,
}

impl BuildingTrack {
    /// Body scale at `frame`: 0 before the entrance, overshooting on the way,
    /// exactly 1 once it completes
    pub fn entrance_scale(&self, frame: f32) -> f32 {
        ease(self.entrance.progress(frame), Easing::EaseOutBack)
    }

    pub fn exit_translation(&self, frame: f32) -> f32 {
        self.exit_offset * ease(self.exit.progress(frame), Easing::EaseInBack)
    }

    pub fn phase_at(&self, frame: f32) -> BuildingPhase {
        if frame >= self.exit.delay {
            BuildingPhase::Exit
        } else if frame < self.entrance.delay {
            BuildingPhase::Pending
        } else if frame < self.entrance.end() {
            BuildingPhase::Entrance
        } else if frame < self.tiles_end {
            BuildingPhase::TileReveal
        } else if frame < self.windows_end {
            BuildingPhase::WindowReveal
        } else {
            BuildingPhase::Resting
        }
    }

    fn setup(
        index: usize,
        building: &Building,
        visible: Rect,
        settings: &TimelineSettings,
        rng: &mut SketchRng,
    ) -> Self {
        let budget = settings.entrance_budget;
        let duration = rng
            .range(settings.building_duration_min, settings.building_duration_max)
            .min(budget);
        let delay = rng.range(0.0, budget - duration);
        let entrance = Phase::new(delay, duration);

        let exit = Phase::new(settings.exit_start, settings.exit_end - settings.exit_start);
        let exit_offset = exit_offset(building, visible);

        let tile_count = building.tiles.len().max(1) as f32;
        let building_stagger = index as f32 * settings.tile_building_stagger;
        let tiles: Vec<TileTrack> = (0..building.tiles.len())
            .map(|i| {
                let reveal = Phase::new(
                    entrance.end() + i as f32 / tile_count * settings.tile_reveal_span + building_stagger,
                    settings.tile_reveal_duration,
                );
                let cycle_duration = rng.range(settings.tile_cycle_min, settings.tile_cycle_max);
                let cycle_delay = reveal.end() + rng.range(0.0, settings.tile_cycle_delay_span);
                TileTrack {
                    reveal,
                    cycle: Phase::new(cycle_delay, cycle_duration),
                }
            })
            .collect();

        let tiles_end = tiles
            .iter()
            .map(|t| t.reveal.end())
            .fold(entrance.end(), f32::max);

        let window_count = building.windows.len().max(1) as f32;
        let windows: Vec<WindowTrack> = building
            .windows
            .iter()
            .enumerate()
            .map(|(k, window)| WindowTrack {
                reveal: Phase::new(
                    tiles_end + k as f32 / window_count * settings.window_reveal_span,
                    settings.window_reveal_duration,
                ),
                silhouette_rest: if window.silhouette.is_some() {
                    window.glass.height()
                } else {
                    0.0
                },
            })
            .collect();

        let windows_end = windows
            .iter()
            .map(|w| w.reveal.end())
            .fold(tiles_end, f32::max);

        Self {
            entrance,
            exit,
            exit_offset,
            tiles_end,
            windows_end,
            tiles,
            windows,
        }
    }

    fn apply(&self, frame: f32, building: &mut Building) {
        building.pose.scale = self.entrance_scale(frame);
        building.pose.offset = Vec2::new(self.exit_translation(frame), 0.0);

        for (track, tile) in self.tiles.iter().zip(building.tiles.iter_mut()) {
            tile.scale = ease(track.reveal.progress(frame), Easing::EaseOutCirc);
            tile.fill = tile.current_color.mix(&tile.next_color, color_progress(&track.cycle, frame));
        }

        for (track, window) in self.windows.iter().zip(building.windows.iter_mut()) {
            let p = track.reveal.progress(frame);
            window.scale = ease(p, Easing::EaseOutBack);
            window.silhouette_offset = track.silhouette_rest * (1.0 - ease(p, Easing::EaseOutCubic));
        }
    }
}

/// Pulse progress of a repeating color cycle; 0 before it starts
fn color_progress(cycle: &Phase, frame: f32) -> f32 {
    if frame < cycle.delay || cycle.duration <= 0.0 {
        return 0.0;
    }
    let t = ((frame - cycle.delay) % cycle.duration) / cycle.duration;
    sine_pulse(t)
}

/// Slide distance that carries the building past the visible edge it leans toward
fn exit_offset(building: &Building, visible: Rect) -> f32 {
    let bounds = building.bounds();
    if bounds.center().x < visible.center().x {
        -(bounds.max_x() - visible.min_x() + EXIT_MARGIN)
    } else {
        visible.max_x() - bounds.min_x() + EXIT_MARGIN
    }
}

/// Per-element animation records for one composition
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    settings: TimelineSettings,
    buildings: Vec<BuildingTrack>,
}

impl Timeline {
    /// Draw every building's, tile's and window's timing once
    pub fn setup(tajimi: &Tajimi, settings: &TimelineSettings, rng: &mut SketchRng) -> Self {
        let buildings = tajimi
            .buildings
            .iter()
            .enumerate()
            .map(|(i, b)| BuildingTrack::setup(i, b, tajimi.target, settings, rng))
            .collect();

        Self {
            settings: *settings,
            buildings,
        }
    }

    pub fn tracks(&self) -> &[BuildingTrack] {
        &self.buildings
    }

    pub fn cycle_length(&self) -> f32 {
        self.settings.cycle_length
    }

    /// Position of a global frame inside the loop
    pub fn local_frame(&self, frame: u64) -> f32 {
        (frame as f64 % self.settings.cycle_length as f64) as f32
    }

    /// Write the display state of `frame` into the composition
    pub fn apply(&self, frame: u64, postcard: &mut Postcard) {
        let local = self.local_frame(frame);
        for (track, building) in self.buildings.iter().zip(postcard.tajimi.buildings.iter_mut()) {
            track.apply(local, building);
        }
    }
}
