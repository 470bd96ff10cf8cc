pub mod vec2;
pub mod rect;
pub mod random;

pub use vec2::{Vec2, arc_through};
pub use rect::Rect;
pub use random::SketchRng;
