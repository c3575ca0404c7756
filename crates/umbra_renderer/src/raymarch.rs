//! Sphere-traced ray marching over the scene's signed distance fields.

use serde::{Deserialize, Serialize};
use umbra_core::{Color, ObjectId, Scene};
use umbra_math::{Ray, Vec3};

use crate::renderer::ConfigError;
use crate::shading::Shader;

/// Step size for the finite-difference normal.
pub const NORMAL_EPSILON: f32 = 0.01;

/// Offset along the normal for marched shadow rays.
pub const MARCH_SHADOW_BIAS: f32 = 0.05;

/// Termination bounds for a march.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    pub max_steps: u32,
    /// Distance below which the march reports a hit
    pub hit_threshold: f32,
    /// Field value above which the march gives up
    pub max_distance: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 500,
            hit_threshold: 1e-4,
            max_distance: 1000.0,
        }
    }
}

impl MarchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        for (name, value) in [
            ("hit_threshold", self.hit_threshold),
            ("max_distance", self.max_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMarchBound { name, value });
            }
        }
        Ok(())
    }
}

/// Result of marching one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    Hit {
        point: Vec3,
        object: ObjectId,
        steps: u32,
    },
    Miss {
        steps: u32,
    },
}

/// Minimum signed distance over the non-emitter objects, with the object
/// that produced it. `None` for a scene with no surfaces.
pub fn scene_sdf(scene: &Scene, p: Vec3) -> Option<(f32, ObjectId)> {
    let mut nearest: Option<(f32, ObjectId)> = None;
    for (id, object) in scene.surfaces() {
        let d = object.signed_distance(p);
        match nearest {
            Some((best, _)) if best <= d => {}
            _ => nearest = Some((d, id)),
        }
    }
    nearest
}

/// Global distance at `p`, `+inf` for an empty scene.
pub fn scene_distance(scene: &Scene, p: Vec3) -> f32 {
    scene_sdf(scene, p).map_or(f32::INFINITY, |(d, _)| d)
}

/// March `ray` until it hits, escapes past `max_distance`, travels further
/// than `limit`, or runs out of steps.
pub fn march(scene: &Scene, ray: &Ray, config: &MarchConfig, limit: f32) -> MarchOutcome {
    let direction = ray.unit_direction();
    if direction == Vec3::ZERO {
        return MarchOutcome::Miss { steps: 0 };
    }

    let mut point = ray.origin();
    let mut travelled = 0.0;

    for step in 0..config.max_steps {
        let Some((d, object)) = scene_sdf(scene, point) else {
            return MarchOutcome::Miss { steps: step };
        };

        if d < config.hit_threshold {
            return MarchOutcome::Hit {
                point,
                object,
                steps: step + 1,
            };
        }
        if d > config.max_distance || travelled > limit {
            return MarchOutcome::Miss { steps: step + 1 };
        }

        point += d * direction;
        travelled += d;
    }

    MarchOutcome::Miss {
        steps: config.max_steps,
    }
}

/// Surface normal by backward differences of the global field.
pub fn estimate_normal(scene: &Scene, p: Vec3) -> Vec3 {
    let d = scene_distance(scene, p);
    Vec3::new(
        d - scene_distance(scene, p - Vec3::X * NORMAL_EPSILON),
        d - scene_distance(scene, p - Vec3::Y * NORMAL_EPSILON),
        d - scene_distance(scene, p - Vec3::Z * NORMAL_EPSILON),
    )
    .normalize_or_zero()
}

/// Whether the field blocks the path from a surface point to a light.
pub fn march_occluded(scene: &Scene, point: Vec3, normal: Vec3, light: Vec3, config: &MarchConfig) -> bool {
    let origin = point + MARCH_SHADOW_BIAS * normal;
    let to_light = light - origin;
    let distance = to_light.length();
    if distance <= config.hit_threshold {
        return false;
    }

    match march(scene, &Ray::new(origin, to_light), config, distance) {
        MarchOutcome::Hit { point: hit, .. } => (hit - origin).length() < distance,
        MarchOutcome::Miss { .. } => false,
    }
}

/// Colour of a primary ray under ray marching.
///
/// Materials are used untextured.
pub fn march_color(scene: &Scene, ray: &Ray, shader: &Shader, config: &MarchConfig) -> Color {
    match march(scene, ray, config, config.max_distance) {
        MarchOutcome::Hit { point, object, .. } => match scene.object(object) {
            Some(object) => {
                let material = object.material();
                let normal = estimate_normal(scene, point);
                shader.shade(point, normal, material.diffuse, material.specular, material.shininess)
            }
            None => scene.background,
        },
        MarchOutcome::Miss { .. } => scene.background,
    }
}
