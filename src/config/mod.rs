//! Postcard settings, loaded from YAML and sanitized before use

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Settings, MAX_TILE_COUNT, TimelineSettings, WindowPreset};
