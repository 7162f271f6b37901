use crate::color::Color;
use vecmath::Vector2;

/// A 2D drawing target the particle field renders onto.
///
/// Draw calls are best-effort and never report failure.
pub trait Surface {
    /// Clears the region `[0, width] x [0, height]`.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64);

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64);
}
