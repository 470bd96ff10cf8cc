//! Procedural layout of the postcard.
//!
//! The postcard holds a street ("tajimi"), the street holds buildings, and each
//! building holds a tile grid and a window grid. Everything is rebuilt from
//! scratch on every generation; only per-frame display fields change afterwards.

pub mod shape;
pub mod grid;
pub mod tiles;
pub mod window;
pub mod building;
pub mod tajimi;
pub mod postcard;

pub use shape::{Shadow, Shape, Style};
pub use grid::grid;
pub use tiles::{generate_tiles, Tile};
pub use window::{generate_window_grid, Silhouette, Window, WindowVariant};
pub use building::{Building, BuildingPose};
pub use tajimi::Tajimi;
pub use postcard::Postcard;
