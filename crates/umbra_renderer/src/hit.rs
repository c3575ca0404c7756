//! Nearest-hit search over the scene arena.
//!
//! No acceleration structure: every query is a linear scan that shrinks the
//! search interval as closer hits are found.

use umbra_core::{ObjectId, Scene, SceneObject, SurfaceHit};
use umbra_math::{Interval, Ray, Vec3};

/// Lower bound of the ray parameter for every hit search.
pub const HIT_T_MIN: f32 = 0.001;

/// Offset along the normal for shadow ray origins.
pub const SHADOW_BIAS: f32 = 0.01;

/// The nearest intersection found by a scan.
#[derive(Debug, Clone, Copy)]
pub struct ClosestHit<'a> {
    pub id: ObjectId,
    pub object: &'a SceneObject,
    pub hit: SurfaceHit,
}

/// Nearest intersection by ray parameter among `objects`.
///
/// Only strictly closer hits replace the current one, so the first object
/// found wins an exact tie.
pub fn closest_hit<'a>(
    objects: impl Iterator<Item = (ObjectId, &'a SceneObject)>,
    ray: &Ray,
    ray_t: Interval,
) -> Option<ClosestHit<'a>> {
    let mut closest: Option<ClosestHit<'a>> = None;
    let mut closest_so_far = ray_t.max;

    for (id, object) in objects {
        if let Some(hit) = object.intersect(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = hit.t;
            closest = Some(ClosestHit { id, object, hit });
        }
    }

    closest
}

/// Nearest non-emitter hit, for the analytic integrators.
pub fn closest_surface<'a>(scene: &'a Scene, ray: &Ray) -> Option<ClosestHit<'a>> {
    closest_hit(scene.surfaces(), ray, Interval::forward(HIT_T_MIN))
}

/// Nearest hit including emitters, for the path tracer.
pub fn closest_object<'a>(scene: &'a Scene, ray: &Ray) -> Option<ClosestHit<'a>> {
    closest_hit(scene.objects(), ray, Interval::forward(HIT_T_MIN))
}

/// Whether non-emitter geometry lies between a surface point and a light.
pub fn occluded(scene: &Scene, point: Vec3, normal: Vec3, light: Vec3) -> bool {
    let origin = point + SHADOW_BIAS * normal;
    let to_light = light - origin;
    let distance = to_light.length();
    if distance <= HIT_T_MIN {
        return false;
    }

    let ray = Ray::new(origin, to_light / distance);
    closest_hit(scene.surfaces(), &ray, Interval::new(HIT_T_MIN, distance)).is_some()
}
