//! Animation module for the postcard timeline
//!
//! Handles the looping build-up and exit of the street,
//! with per-element easing and staggered timing.

mod easing;
mod timeline;
mod session;

pub use easing::{Easing, ease, progress, sine_pulse};
pub use timeline::{BuildingPhase, BuildingTrack, Phase, TileTrack, Timeline, WindowTrack};
pub use session::AnimationSession;
