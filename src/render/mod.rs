pub mod canvas;

pub use canvas::{corner_radius, fit_view, CanvasRenderer, ViewFit};
