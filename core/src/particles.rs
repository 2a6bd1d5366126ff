use rand::Rng;

pub const PARTICLE_COUNT: usize = 30;
pub const FADE_FRAMES: f64 = 50.0;
pub const FADE_PEAK_OPACITY: f64 = 0.3;
pub const GLOW_BLUR: f64 = 3.0;
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

const SIZE_RANGE: (f64, f64) = (0.5, 2.0);
const SPEED_SPREAD: f64 = 0.3;
const OPACITY_RANGE: (f64, f64) = (0.1, 0.4);
const LIFE_RANGE: (f64, f64) = (100.0, 300.0);
const ACCENT_RGB: &str = "217, 176, 140";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub size: f64,
    pub opacity: f64,
    pub life: f64,
    pub age: u32,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            size: rng.random_range(SIZE_RANGE.0..SIZE_RANGE.1),
            speed_x: (rng.random::<f64>() - 0.5) * SPEED_SPREAD,
            speed_y: (rng.random::<f64>() - 0.5) * SPEED_SPREAD,
            opacity: rng.random_range(OPACITY_RANGE.0..OPACITY_RANGE.1),
            life: rng.random_range(LIFE_RANGE.0..LIFE_RANGE.1),
            age: 0,
        }
    }

    fn out_of_bounds(&self, width: f64, height: f64) -> bool {
        self.x < 0.0 || self.x > width || self.y < 0.0 || self.y > height
    }

    fn expired(&self) -> bool {
        f64::from(self.age) >= self.life
    }

    fn fade(&mut self) {
        let age = f64::from(self.age);
        if age < FADE_FRAMES {
            self.opacity = age / FADE_FRAMES * FADE_PEAK_OPACITY;
        } else if age > self.life - FADE_FRAMES {
            self.opacity = (self.life - age) / FADE_FRAMES * FADE_PEAK_OPACITY;
        }
    }

    pub fn fill_style(&self) -> String {
        format!("rgba({ACCENT_RGB}, {})", self.opacity)
    }

    pub fn glow_color(&self) -> String {
        format!("rgba({ACCENT_RGB}, {})", self.opacity * 0.5)
    }
}

/// Fixed pool of drifting dots. The pool never grows or shrinks; particles
/// that drift off the canvas or outlive their lifetime are respawned in place.
pub struct ParticleField<R> {
    rng: R,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(mut rng: R, width: f64, height: f64) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(&mut rng, width, height))
            .collect();
        Self {
            rng,
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advances every particle by one frame.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.x += particle.speed_x;
            particle.y += particle.speed_y;
            particle.age += 1;
            particle.fade();
            if particle.out_of_bounds(width, height) || particle.expired() {
                *particle = Particle::spawn(&mut self.rng, width, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fade_in_ramps_from_zero() {
        let mut particle = Particle {
            x: 10.0,
            y: 10.0,
            speed_x: 0.0,
            speed_y: 0.0,
            size: 1.0,
            opacity: 0.35,
            life: 200.0,
            age: 25,
        };
        particle.fade();
        assert!((particle.opacity - 0.15).abs() < 1e-9);
        particle.age = 100;
        particle.opacity = 0.35;
        particle.fade();
        assert_eq!(particle.opacity, 0.35);
        particle.age = 175;
        particle.fade();
        assert!((particle.opacity - 0.15).abs() < 1e-9);
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, 320.0, 180.0);
            assert!((0.0..320.0).contains(&p.x));
            assert!((0.0..180.0).contains(&p.y));
            assert!((0.5..2.0).contains(&p.size));
            assert!((0.1..0.4).contains(&p.opacity));
            assert!((100.0..300.0).contains(&p.life));
            assert!(p.speed_x.abs() <= 0.15 && p.speed_y.abs() <= 0.15);
            assert_eq!(p.age, 0);
        }
    }

    #[test]
    fn colours_scale_with_opacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::spawn(&mut rng, 10.0, 10.0);
        p.opacity = 0.2;
        assert_eq!(p.fill_style(), "rgba(217, 176, 140, 0.2)");
        assert_eq!(p.glow_color(), "rgba(217, 176, 140, 0.1)");
    }
}
