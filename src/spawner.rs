use glam::Vec3;
use rand::Rng;

use crate::scene::BASE_RADIUS;
use crate::tier::TierParams;

/// A live target. Exactly one exists at a time; hitting it makes the
/// caller spawn a replacement somewhere else in the tier's volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec3,
    pub scale: f32,
}

impl Target {
    pub fn radius(&self) -> f32 {
        BASE_RADIUS * self.scale
    }
}

/// Draws a fresh target inside the tier's spawn volume: x and y centered
/// on the origin, z strictly into the scene.
pub fn spawn_target_with<R: Rng>(params: &TierParams, rng: &mut R) -> Target {
    let x = (rng.gen::<f32>() - 0.5) * params.x_range;
    let y = (rng.gen::<f32>() - 0.5) * params.y_range;
    let z = -rng.gen::<f32>() * params.z_range;
    Target {
        position: Vec3::new(x, y, z),
        scale: params.scale,
    }
}

pub fn spawn_target(params: &TierParams) -> Target {
    spawn_target_with(params, &mut rand::thread_rng())
}
