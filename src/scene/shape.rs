//! Renderer-neutral shape tree.
//!
//! Generators describe geometry; `to_shapes` methods turn the current
//! (possibly animated) state into this tree, which a renderer rasterizes or an
//! exporter walks.

use crate::math::{Rect, Vec2};
use crate::style::Color;

/// Drop shadow behind a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
    pub offset: Vec2,
}

/// Fill/stroke styling shared by every primitive
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    pub shadow: Option<Shadow>,
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Default::default()
        }
    }

    pub fn stroked(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_shadow(mut self, color: Color, blur: f32, offset: Vec2) -> Self {
        self.shadow = Some(Shadow { color, blur, offset });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        radius: f32,
        style: Style,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: Style,
    },
    /// Closed polygon
    Polygon {
        points: Vec<Vec2>,
        style: Style,
    },
    Line {
        from: Vec2,
        to: Vec2,
        style: Style,
    },
    /// Children drawn in order, optionally clipped to a rounded rectangle
    Group {
        clip: Option<(Rect, f32)>,
        children: Vec<Shape>,
    },
}

impl Shape {
    pub fn rect(rect: Rect, radius: f32, style: Style) -> Self {
        Shape::Rect { rect, radius, style }
    }

    pub fn group(children: Vec<Shape>) -> Self {
        Shape::Group { clip: None, children }
    }

    pub fn clipped(clip: Rect, radius: f32, children: Vec<Shape>) -> Self {
        Shape::Group {
            clip: Some((clip, radius)),
            children,
        }
    }

    /// Move the whole subtree by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Shape::Rect { rect, .. } => *rect = rect.translate(offset),
            Shape::Circle { center, .. } => *center = *center + offset,
            Shape::Polygon { points, .. } => {
                for p in points.iter_mut() {
                    *p = *p + offset;
                }
            }
            Shape::Line { from, to, .. } => {
                *from = *from + offset;
                *to = *to + offset;
            }
            Shape::Group { clip, children } => {
                if let Some((rect, _)) = clip {
                    *rect = rect.translate(offset);
                }
                for child in children.iter_mut() {
                    child.translate(offset);
                }
            }
        }
    }

    /// Number of primitives (groups excluded) in this subtree
    pub fn primitive_count(&self) -> usize {
        match self {
            Shape::Group { children, .. } => children.iter().map(|c| c.primitive_count()).sum(),
            _ => 1,
        }
    }

    /// Every coordinate in the subtree is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Shape::Rect { rect, radius, .. } => {
                rect.origin.is_finite() && rect.size.is_finite() && radius.is_finite()
            }
            Shape::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Shape::Polygon { points, .. } => points.iter().all(|p| p.is_finite()),
            Shape::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            Shape::Group { clip, children } => {
                clip.map_or(true, |(r, _)| r.origin.is_finite() && r.size.is_finite())
                    && children.iter().all(|c| c.is_finite())
            }
        }
    }
}
