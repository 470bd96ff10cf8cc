use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::math::{Rect, Vec2};
use crate::scene::{Shape, Style};
use crate::style::Color;

/// Draws a shape tree onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self { ctx, width, height }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Clear the canvas to `background`, fit `view` into it and draw `shape`
    pub fn render(&self, shape: &Shape, view: Rect, background: Color) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (self.width as f64, self.height as f64);

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.set_fill_style_str(&background.to_hex());
        ctx.fill_rect(0.0, 0.0, w, h);

        let fit = fit_view(view, self.width, self.height);
        ctx.set_transform(fit.scale, 0.0, 0.0, fit.scale, fit.offset_x, fit.offset_y)?;
        ctx.set_line_join("round");
        self.draw(shape)
    }

    fn draw(&self, shape: &Shape) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match shape {
            Shape::Rect { rect, radius, style } => {
                if !rect.is_drawable() {
                    return Ok(());
                }
                self.trace_rect(*rect, *radius)?;
                self.paint(style);
            }
            Shape::Circle { center, radius, style } => {
                if *radius <= 0.0 {
                    return Ok(());
                }
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                self.paint(style);
            }
            Shape::Polygon { points, style } => {
                if points.len() < 2 {
                    return Ok(());
                }
                self.trace_polyline(points);
                ctx.close_path();
                self.paint(style);
            }
            Shape::Line { from, to, style } => {
                self.trace_polyline(&[*from, *to]);
                self.paint(&Style { fill: None, ..*style });
            }
            Shape::Group { clip, children } => {
                if let Some((rect, radius)) = clip {
                    ctx.save();
                    self.trace_rect(*rect, *radius)?;
                    ctx.clip();
                }
                for child in children {
                    self.draw(child)?;
                }
                if clip.is_some() {
                    ctx.restore();
                }
            }
        }
        Ok(())
    }

    fn trace_rect(&self, rect: Rect, radius: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = corner_radius(rect, radius) as f64;
        let (x0, y0) = (rect.min_x() as f64, rect.min_y() as f64);
        let (x1, y1) = (rect.max_x() as f64, rect.max_y() as f64);

        ctx.begin_path();
        if r <= 0.0 {
            ctx.rect(x0, y0, x1 - x0, y1 - y0);
            return Ok(());
        }
        ctx.move_to(x0 + r, y0);
        ctx.arc_to(x1, y0, x1, y1, r)?;
        ctx.arc_to(x1, y1, x0, y1, r)?;
        ctx.arc_to(x0, y1, x0, y0, r)?;
        ctx.arc_to(x0, y0, x1, y0, r)?;
        ctx.close_path();
        Ok(())
    }

    fn trace_polyline(&self, points: &[Vec2]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(p.x as f64, p.y as f64);
            } else {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
    }

    /// Fill then stroke the current path. The shadow only applies to the fill.
    fn paint(&self, style: &Style) {
        let ctx = &self.ctx;

        if let Some(fill) = style.fill {
            if let Some(shadow) = style.shadow {
                ctx.set_shadow_color(&shadow.color.to_hex());
                ctx.set_shadow_blur(shadow.blur as f64);
                ctx.set_shadow_offset_x(shadow.offset.x as f64);
                ctx.set_shadow_offset_y(shadow.offset.y as f64);
            }
            ctx.set_fill_style_str(&fill.to_hex());
            ctx.fill();
            if style.shadow.is_some() {
                ctx.set_shadow_color("rgba(0, 0, 0, 0)");
                ctx.set_shadow_blur(0.0);
                ctx.set_shadow_offset_x(0.0);
                ctx.set_shadow_offset_y(0.0);
            }
        }

        if let Some(stroke) = style.stroke {
            if style.stroke_width > 0.0 {
                ctx.set_line_width(style.stroke_width as f64);
                ctx.set_stroke_style_str(&stroke.to_hex());
                ctx.stroke();
            }
        }
    }
}

/// Uniform scale and centering offset mapping a view rectangle onto a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub fn fit_view(view: Rect, width: u32, height: u32) -> ViewFit {
    let (w, h) = (width as f64, height as f64);
    let (vw, vh) = (view.width() as f64, view.height() as f64);
    if vw <= 0.0 || vh <= 0.0 || w <= 0.0 || h <= 0.0 {
        return ViewFit {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
    }

    let scale = (w / vw).min(h / vh);
    ViewFit {
        scale,
        offset_x: (w - vw * scale) / 2.0 - view.min_x() as f64 * scale,
        offset_y: (h - vh * scale) / 2.0 - view.min_y() as f64 * scale,
    }
}

/// Corner radius clamped so opposite corners never overlap
pub fn corner_radius(rect: Rect, radius: f32) -> f32 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    radius.min(rect.width().min(rect.height()) / 2.0).max(0.0)
}
