use rand::Rng;

use crate::TICK_RATE_MS;

/// How far outside the canvas a particle may drift before it is dropped.
const CULL_MARGIN: f64 = 2.0;

/// One fragment of a popped target, in canvas units (+y up).
#[derive(Debug, Clone)]
pub struct BurstParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl BurstParticle {
    fn new(x: f64, y: f64) -> Self {
        let mut rng = rand::thread_rng();
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = rng.gen_range(0.6..1.8);

        Self {
            x,
            y,
            vel_x: angle.cos() * speed,
            vel_y: angle.sin() * speed,
            color_index: rng.gen_range(0..3),
            age: 0.0,
            max_age: rng.gen_range(0.6..1.2),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y -= 2.5 * dt;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Cosmetic particle burst emitted where a target pops. Advanced once per
/// tick; never touches scores or the session.
#[derive(Debug, Clone, Default)]
pub struct Burst {
    pub particles: Vec<BurstParticle>,
}

impl Burst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatters a handful of fragments from the given canvas position.
    pub fn emit(&mut self, x: f64, y: f64) {
        let count = rand::thread_rng().gen_range(12..=18);
        for _ in 0..count {
            self.particles.push(BurstParticle::new(x, y));
        }
    }

    /// One fixed animation step per tick.
    pub fn on_tick(&mut self) {
        let dt = TICK_RATE_MS as f64 / 1000.0;
        self.particles.retain_mut(|particle| {
            let alive = particle.update(dt);
            let off_canvas = particle.x.abs() > CULL_MARGIN + 2.0
                || particle.y.abs() > CULL_MARGIN + 1.0;
            alive && !off_canvas
        });
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
