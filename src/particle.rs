// Simple particle struct to keep track of individual position, velocity,
// and the visual attributes fixed when it is spawned

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::{vec2_add, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
            color,
        }
    }

    /// Spawns a particle somewhere on a `width` x `height` surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
        let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
        let size = lerp(&config.size_range, rng.gen::<f64>());
        let opacity = lerp(&config.opacity_range, rng.gen::<f64>());
        let color = if rng.gen_bool(0.5) {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity, color)
    }

    pub fn advance(&mut self) {
        self.pos = vec2_add(self.pos, self.vel);
    }

    pub fn push(&mut self, impulse: Vector2<f64>) {
        self.vel = vec2_add(self.vel, impulse);
    }

    // Reflects off the edges of a `width` x `height` box, then pulls the
    // position back inside in case the last move overshot.
    pub fn bounce(&mut self, width: f64, height: f64) {
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
        self.pos[0] = self.pos[0].max(0.0).min(width);
        self.pos[1] = self.pos[1].max(0.0).min(height);
    }
}

fn lerp(range: &std::ops::Range<f64>, t: f64) -> f64 {
    range.start + t * (range.end - range.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(pos: Vector2<f64>, vel: Vector2<f64>) -> Particle {
        Particle::new(pos, vel, 1.0, 0.5, Color::rgb(255, 255, 255))
    }

    #[test]
    fn random_particles_respect_config_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 640.0, 480.0, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 480.0);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.size >= 1.0 && p.size <= 3.0);
            assert!(p.opacity >= 0.2 && p.opacity <= 0.7);
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn both_palette_colors_get_used() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let picks: Vec<Color> = (0..200)
            .map(|_| Particle::random(&mut rng, 100.0, 100.0, &config).color)
            .collect();
        assert!(picks.contains(&config.palette[0]));
        assert!(picks.contains(&config.palette[1]));
    }

    #[test]
    fn bounce_reflects_each_axis_independently() {
        let mut p = still([-1.0, 50.0], [-0.2, 0.1]);
        p.bounce(100.0, 100.0);
        assert_eq!(p.vel, [0.2, 0.1]);
        assert_eq!(p.pos, [0.0, 50.0]);

        let mut p = still([120.0, 130.0], [0.3, 0.4]);
        p.bounce(100.0, 100.0);
        assert_eq!(p.vel, [-0.3, -0.4]);
        assert_eq!(p.pos, [100.0, 100.0]);
    }

    #[test]
    fn bounce_leaves_edge_positions_alone() {
        let mut p = still([100.0, 0.0], [0.1, -0.1]);
        p.bounce(100.0, 100.0);
        assert_eq!(p.vel, [0.1, -0.1]);
        assert_eq!(p.pos, [100.0, 0.0]);
    }
}
