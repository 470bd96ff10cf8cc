//! Colors and palettes

pub mod color;
pub mod palette;

pub use color::{Color, ColorError};
pub use palette::Palette;
