// ParticleField owns a set of drifting particles on a fixed-size surface.
// Each frame they move, get pulled gently toward the pointer, bounce off the
// edges, and are drawn with faint lines connecting close neighbours.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::Rng;
use vecmath::{vec2_len, vec2_scale, vec2_sub, Vector2};

/// Number of particles spawned for a surface `width` pixels wide.
pub fn particle_count_for_width(width: u32, config: &FieldConfig) -> usize {
    if config.width_per_particle == 0 {
        return config.max_particles as usize;
    }
    config.max_particles.min(width / config.width_per_particle) as usize
}

/// Velocity change for a particle `delta` away from the pointer
/// (`delta` points from the particle to the pointer).
pub fn attraction_impulse(delta: Vector2<f64>, config: &FieldConfig) -> Vector2<f64> {
    let distance = vec2_len(delta);
    if distance >= config.attraction_radius {
        return [0.0, 0.0];
    }
    let force = (config.attraction_radius - distance) / config.attraction_radius;
    vec2_scale(delta, force * config.attraction_strength)
}

/// Opacity of the line between two particles `distance` apart, or `None`
/// when they are too far apart to be connected.
pub fn link_opacity(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance >= config.link_distance {
        None
    } else {
        Some(config.link_opacity * (1.0 - distance / config.link_distance))
    }
}

pub struct ParticleField<R = StdRng> {
    config: FieldConfig,
    rng: R,
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    pointer: Option<Vector2<f64>>,
}

impl<R: Rng> ParticleField<R> {
    /// Creates an empty field. Nothing is spawned until `initialize`.
    pub fn new(config: FieldConfig, rng: R) -> Self {
        ParticleField {
            config,
            rng,
            width: 0,
            height: 0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    /// Replaces every particle with a fresh random set sized for the surface.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let count = particle_count_for_width(width, &self.config);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(
                &mut self.rng,
                width as f64,
                height as f64,
                &self.config,
            ));
        }
        self.particles = particles;
    }

    /// Previous positions are not carried over; the set is rebuilt from scratch.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.initialize(width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn step(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;
        for particle in &mut self.particles {
            particle.advance();
            if let Some(pointer) = self.pointer {
                let to_pointer = vec2_sub(pointer, particle.pos);
                particle.push(attraction_impulse(to_pointer, &self.config));
            }
            particle.bounce(width, height);
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width as f64, self.height as f64);

        for (i, particle) in self.particles.iter().enumerate() {
            surface.fill_circle(particle.pos, particle.size, particle.color, particle.opacity);

            for (j, other) in self.particles.iter().enumerate() {
                if i == j {
                    continue;
                }
                let distance = vec2_len(vec2_sub(particle.pos, other.pos));
                if let Some(alpha) = link_opacity(distance, &self.config) {
                    surface.stroke_line(
                        particle.pos,
                        other.pos,
                        particle.color,
                        alpha,
                        self.config.link_width,
                    );
                }
            }
        }
    }
}

impl<R> ParticleField<R> {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
