//! Explicit owner of everything one running postcard needs between frames

use log::info;
use crate::config::Settings;
use crate::math::SketchRng;
use crate::scene::{Postcard, Shape};
use super::timeline::Timeline;

/// Current composition, its timeline, the frame counter and play state.
///
/// Regeneration discards the composition and timeline wholesale; nothing is
/// updated incrementally.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    settings: Settings,
    rng: SketchRng,
    postcard: Postcard,
    timeline: Timeline,
    frame: u64,
    playing: bool,
}

impl AnimationSession {
    /// Sanitize `settings`, compose a postcard and set up its timeline
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut rng = SketchRng::new(seed);
        let (postcard, timeline) = compose(&settings, &mut rng);

        let mut session = Self {
            settings,
            rng,
            postcard,
            timeline,
            frame: 0,
            playing: true,
        };
        session.apply_frame();
        session
    }

    /// Rebuild from scratch with a child seed drawn from the current source,
    /// so [`Self::seed`] always names the postcard on screen
    pub fn regenerate(&mut self) {
        let seed = self.rng.next_u64();
        self.regenerate_with_seed(seed);
    }

    /// Rebuild from scratch with a fresh random source
    pub fn regenerate_with_seed(&mut self, seed: u64) {
        self.rng = SketchRng::new(seed);
        let (postcard, timeline) = compose(&self.settings, &mut self.rng);
        self.postcard = postcard;
        self.timeline = timeline;
        self.frame = 0;
        info!(
            "regenerated postcard with {} buildings, seed {}",
            self.postcard.tajimi.buildings.len(),
            seed
        );
        self.apply_frame();
    }

    /// Replace the settings and rebuild
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        self.regenerate();
    }

    /// Draw new tile colors from the current palette, keeping the layout
    pub fn recolor_tiles(&mut self) {
        self.postcard.recolor_tiles(&self.settings, &mut self.rng);
        self.apply_frame();
    }

    /// Apply the current frame, then advance the counter if playing.
    /// Returns the frame that was applied.
    pub fn tick(&mut self) -> u64 {
        let applied = self.frame;
        self.apply_frame();
        if self.playing {
            self.frame = self.frame.wrapping_add(1);
        }
        applied
    }

    /// Jump to `frame` and apply it
    pub fn seek(&mut self, frame: u64) {
        self.frame = frame;
        self.apply_frame();
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Position of the current frame inside the animation loop
    pub fn local_frame(&self) -> f32 {
        self.timeline.local_frame(self.frame)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn postcard(&self) -> &Postcard {
        &self.postcard
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Shape tree of the current frame
    pub fn shapes(&self) -> Shape {
        self.postcard.to_shape(&self.settings)
    }

    fn apply_frame(&mut self) {
        self.timeline.apply(self.frame, &mut self.postcard);
    }
}

fn compose(settings: &Settings, rng: &mut SketchRng) -> (Postcard, Timeline) {
    let postcard = Postcard::generate(settings, rng);
    let timeline = Timeline::setup(&postcard.tajimi, &settings.timeline, rng);
    (postcard, timeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_postcard() {
        let a = AnimationSession::new(Settings::default(), 99);
        let b = AnimationSession::new(Settings::default(), 99);
        assert_eq!(a.postcard(), b.postcard());
        assert_eq!(a.timeline(), b.timeline());
    }

    #[test]
    fn test_tick_advances_only_while_playing() {
        let mut session = AnimationSession::new(Settings::default(), 1);
        assert_eq!(session.tick(), 0);
        assert_eq!(session.tick(), 1);
        assert_eq!(session.frame(), 2);

        session.pause();
        assert_eq!(session.tick(), 2);
        assert_eq!(session.frame(), 2);

        session.toggle();
        assert!(session.is_playing());
        session.tick();
        assert_eq!(session.frame(), 3);
    }

    #[test]
    fn test_local_frame_wraps() {
        let mut session = AnimationSession::new(Settings::default(), 1);
        session.seek(340 + 17);
        assert_eq!(session.local_frame(), 17.0);
    }

    #[test]
    fn test_regenerate_resets_and_changes_layout() {
        let mut session = AnimationSession::new(Settings::default(), 5);
        let first = session.postcard().clone();
        session.seek(120);
        session.regenerate();
        assert_eq!(session.frame(), 0);
        assert_ne!(session.postcard(), &first);
        assert!(!session.postcard().tajimi.buildings.is_empty());
    }

    #[test]
    fn test_regenerate_with_seed_is_reproducible() {
        let mut session = AnimationSession::new(Settings::default(), 5);
        session.regenerate_with_seed(1234);
        let a = session.postcard().clone();
        session.regenerate();
        session.regenerate_with_seed(1234);
        assert_eq!(session.postcard(), &a);
        assert_eq!(session.seed(), 1234);
    }

    #[test]
    fn test_seed_rebuilds_current_postcard() {
        let mut session = AnimationSession::new(Settings::default(), 5);
        session.regenerate();
        session.regenerate();
        let shown = session.postcard().clone();
        let timeline = session.timeline().clone();
        assert_ne!(session.seed(), 5);

        session.regenerate_with_seed(session.seed());
        assert_eq!(session.postcard(), &shown);
        assert_eq!(session.timeline(), &timeline);
    }

    #[test]
    fn test_set_settings_sanitizes() {
        let mut session = AnimationSession::new(Settings::default(), 5);
        session.set_settings(Settings {
            window_grid_cols: 0,
            building_height_min_factor: 0.9,
            building_height_max_factor: 0.2,
            ..Settings::default()
        });
        assert_eq!(session.settings().building_height_min_factor, 0.2);
        for building in &session.postcard().tajimi.buildings {
            assert!(building.windows.is_empty());
        }
    }

    #[test]
    fn test_shapes_follow_frame() {
        let mut session = AnimationSession::new(Settings::default(), 8);
        session.seek(0);
        let start = session.shapes();
        session.seek(200);
        let later = session.shapes();
        assert!(later.primitive_count() > start.primitive_count());
        assert!(later.is_finite());
    }

    #[test]
    fn test_recolor_changes_tiles_only() {
        let mut session = AnimationSession::new(Settings::default(), 8);
        let before = session.postcard().clone();
        session.recolor_tiles();
        let after = session.postcard();
        assert_eq!(before.tajimi.buildings.len(), after.tajimi.buildings.len());
        for (a, b) in before.tajimi.buildings.iter().zip(&after.tajimi.buildings) {
            assert_eq!(a.body, b.body);
            assert_eq!(a.windows, b.windows);
        }
    }
}
