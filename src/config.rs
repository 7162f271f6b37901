// Tunable constants for a particle field. The defaults are what the
// portfolio page ships with.

use crate::color::Color;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Upper bound on particle count regardless of surface width.
    pub max_particles: u32,
    /// One particle per this many pixels of surface width.
    pub width_per_particle: u32,
    /// Initial velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    pub size_range: Range<f64>,
    pub opacity_range: Range<f64>,
    /// Each particle picks one of these with equal probability.
    pub palette: [Color; 2],
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    /// Particles closer than this get a connecting line.
    pub link_distance: f64,
    /// Line opacity at distance zero.
    pub link_opacity: f64,
    pub link_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: 100,
            width_per_particle: 15,
            max_speed: 0.25,
            size_range: 1.0..3.0,
            opacity_range: 0.2..0.7,
            palette: [Color::from_u32(0x64ffda), Color::from_u32(0xf57dff)],
            attraction_radius: 100.0,
            attraction_strength: 0.0001,
            link_distance: 80.0,
            link_opacity: 0.1,
            link_width: 0.5,
        }
    }
}

impl FieldConfig {
    pub fn with_max_particles(mut self, max_particles: u32) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_palette(mut self, palette: [Color; 2]) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }
}
