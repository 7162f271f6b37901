// Renderer struct that draws onto a canvas through its 2d context.
// The canvas element itself belongs to the page; only the draw calls are ours.

use crate::color::Color;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use web_sys::CanvasRenderingContext2d;

pub struct CanvasRenderer {
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasRenderer { context }
    }
}

impl Surface for CanvasRenderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        // arc only throws for a negative radius
        if self
            .context
            .arc(center[0], center[1], radius.max(0.0), 0.0, PI * 2.0)
            .is_err()
        {
            return;
        }
        self.context.set_fill_style(&color.to_rgba(alpha).into());
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style(&color.to_rgba(alpha).into());
        self.context.set_line_width(width);
        self.context.stroke();
    }
}
