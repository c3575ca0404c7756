//! Phong shading with hard shadows.

use umbra_core::{Color, Scene};
use umbra_math::Vec3;

use crate::hit::occluded;
use crate::raymarch::{march_occluded, MarchConfig};

/// How shadow rays are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occlusion {
    /// Shadows disabled
    None,
    /// Analytic intersection against the scene surfaces
    Analytic,
    /// Marching the global distance field
    Marched(MarchConfig),
}

/// Local illumination for one view point.
pub struct Shader<'a> {
    scene: &'a Scene,
    eye: Vec3,
    occlusion: Occlusion,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, eye: Vec3, occlusion: Occlusion) -> Self {
        Self {
            scene,
            eye,
            occlusion,
        }
    }

    /// Shaded colour at a surface point, each channel clamped to 1.
    ///
    /// A zero normal or a light sitting on the point contributes nothing.
    pub fn shade(
        &self,
        point: Vec3,
        normal: Vec3,
        diffuse: Color,
        specular: Color,
        shininess: f32,
    ) -> Color {
        let mut color = self.scene.ambient.contribution();

        let n = normal.normalize_or_zero();
        if n == Vec3::ZERO {
            return color.min(Color::ONE);
        }
        let view = (self.eye - point).normalize_or_zero();

        for light in self.scene.point_lights() {
            let Some((l, distance_sq)) = toward(point, light.position) else {
                continue;
            };
            if self.shadowed(point, n, light.position) {
                continue;
            }

            let (lambert, highlight) = phong_terms(n, l, view, shininess);
            color += (diffuse * lambert + specular * highlight) * (light.intensity / distance_sq);
        }

        for cone in self.scene.cone_lights() {
            let Some((l, distance_sq)) = toward(point, cone.position) else {
                continue;
            };
            let cos_angle = (-l).dot(cone.direction());
            if cos_angle < cone.cos_cutoff() || self.shadowed(point, n, cone.position) {
                continue;
            }

            let falloff = cos_angle.max(0.0).powf(cone.falloff_exponent);
            let (lambert, highlight) = phong_terms(n, l, view, shininess);
            color += (diffuse * lambert + specular * highlight)
                * (falloff * cone.intensity / distance_sq);
        }

        color.min(Color::ONE)
    }

    fn shadowed(&self, point: Vec3, normal: Vec3, light: Vec3) -> bool {
        match &self.occlusion {
            Occlusion::None => false,
            Occlusion::Analytic => occluded(self.scene, point, normal, light),
            Occlusion::Marched(config) => march_occluded(self.scene, point, normal, light, config),
        }
    }
}

/// Unit vector and squared distance from `point` to `light`.
fn toward(point: Vec3, light: Vec3) -> Option<(Vec3, f32)> {
    let to_light = light - point;
    let distance_sq = to_light.length_squared();
    if distance_sq == 0.0 {
        return None;
    }
    Some((to_light / distance_sq.sqrt(), distance_sq))
}

/// Lambertian and half-vector specular terms.
fn phong_terms(n: Vec3, l: Vec3, view: Vec3, shininess: f32) -> (f32, f32) {
    let lambert = n.dot(l).max(0.0);
    let half = (l + view).normalize_or_zero();
    let highlight = if half == Vec3::ZERO {
        0.0
    } else {
        n.dot(half).max(0.0).powf(shininess)
    };
    (lambert, highlight)
}
