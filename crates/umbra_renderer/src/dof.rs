//! Depth of field layered on the ray tracer.

use std::num::NonZeroU32;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use umbra_core::{Color, Scene};
use umbra_math::{Ray, Vec3};

use crate::camera::Camera;
use crate::raytrace::ray_color;
use crate::renderer::ConfigError;
use crate::sampling::gen_f32;
use crate::shading::Shader;

/// Thin-lens settings.
///
/// Each pixel averages `samples` rays cast from random points of a circular
/// aperture around the eye towards the pixel's focal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthOfField {
    /// Distance along the primary ray to the plane of perfect focus
    pub focal_distance: f32,
    /// Aperture radius; zero degenerates to a pinhole camera
    pub aperture_size: f32,
    pub samples: NonZeroU32,
}

impl DepthOfField {
    pub fn new(focal_distance: f32, aperture_size: f32, samples: NonZeroU32) -> Self {
        Self {
            focal_distance,
            aperture_size,
            samples,
        }
    }

    /// Build from a raw sample count, rejecting zero.
    pub fn try_new(focal_distance: f32, aperture_size: f32, samples: u32) -> Result<Self, ConfigError> {
        let samples = NonZeroU32::new(samples).ok_or(ConfigError::ZeroDofSamples)?;
        let dof = Self::new(focal_distance, aperture_size, samples);
        dof.validate()?;
        Ok(dof)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.focal_distance.is_finite() || self.focal_distance <= 0.0 {
            return Err(ConfigError::NonPositiveFocalDistance(self.focal_distance));
        }
        if !self.aperture_size.is_finite() || self.aperture_size < 0.0 {
            return Err(ConfigError::NegativeAperture(self.aperture_size));
        }
        Ok(())
    }

    /// Averaged colour for the pixel at `(u, v)`.
    pub fn sample(
        &self,
        scene: &Scene,
        camera: &dyn Camera,
        u: f32,
        v: f32,
        shader: &Shader,
        rng: &mut dyn RngCore,
    ) -> Color {
        let primary = camera.generate_ray(u, v);
        let focal_point = primary.origin() + primary.unit_direction() * self.focal_distance;
        let eye = camera.position();

        let mut color = Color::ZERO;
        for _ in 0..self.samples.get() {
            let aperture_point = eye + self.aperture_offset(rng);
            let ray = Ray::new(aperture_point, focal_point - aperture_point);
            color += ray_color(scene, &ray, shader);
        }

        color / self.samples.get() as f32
    }

    /// Random offset on the aperture disc in the world xy plane.
    /// The disc does not follow the camera orientation.
    fn aperture_offset(&self, rng: &mut dyn RngCore) -> Vec3 {
        let radius = gen_f32(rng) * self.aperture_size;
        let angle = (gen_f32(rng) * 360.0).to_radians();
        let (sin, cos) = angle.sin_cos();
        Vec3::new(radius * cos, radius * sin, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PinholeCamera;
    use crate::shading::Occlusion;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use umbra_core::{colors, Material, PointLight, Sphere};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 5.0, Material::new(colors::RED, 100.0)));
        scene.add_object(Sphere::new(Vec3::new(3.0, 1.0, -4.0), 1.0, Material::new(colors::AQUAMARINE, 50.0)));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), 500.0));
        scene
    }

    #[test]
    fn test_zero_aperture_matches_pinhole() {
        let scene = scene();
        let camera = PinholeCamera::new();
        let shader = Shader::new(&scene, camera.position(), Occlusion::Analytic);
        let mut rng = StdRng::seed_from_u64(7);

        for samples in [1, 4, 9] {
            let dof = DepthOfField::try_new(12.0, 0.0, samples).unwrap();
            for (u, v) in [(0.5, 0.5), (0.8, 0.3), (0.1, 0.9)] {
                let pinhole = ray_color(&scene, &camera.generate_ray(u, v), &shader);
                let blurred = dof.sample(&scene, &camera, u, v, &shader, &mut rng);
                assert!((pinhole - blurred).abs().max_element() < 1e-4);
            }
        }
    }

    #[test]
    fn test_aperture_offsets_within_radius() {
        let dof = DepthOfField::try_new(10.0, 0.5, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let offset = dof.aperture_offset(&mut rng);
            assert!(offset.length() <= 0.5 + 1e-6);
            // World xy, whatever the camera looks at
            assert_eq!(offset.z, 0.0);
        }
    }

    #[test]
    fn test_seeded_samples_are_reproducible() {
        let scene = scene();
        let camera = PinholeCamera::new();
        let shader = Shader::new(&scene, camera.position(), Occlusion::Analytic);
        let dof = DepthOfField::try_new(14.0, 0.4, 8).unwrap();

        let a = dof.sample(&scene, &camera, 0.7, 0.4, &shader, &mut StdRng::seed_from_u64(3));
        let b = dof.sample(&scene, &camera, 0.7, 0.4, &shader, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        assert_eq!(DepthOfField::try_new(10.0, 0.1, 0), Err(ConfigError::ZeroDofSamples));
        assert!(matches!(
            DepthOfField::try_new(0.0, 0.1, 4),
            Err(ConfigError::NonPositiveFocalDistance(_))
        ));
        assert!(matches!(
            DepthOfField::try_new(10.0, -0.1, 4),
            Err(ConfigError::NegativeAperture(_))
        ));
    }

    #[test]
    fn test_zero_samples_rejected_when_deserialised() {
        let json = r#"{ "focal_distance": 10.0, "aperture_size": 0.1, "samples": 0 }"#;
        assert!(serde_json::from_str::<DepthOfField>(json).is_err());

        let json = r#"{ "focal_distance": 10.0, "aperture_size": 0.1, "samples": 4 }"#;
        let dof: DepthOfField = serde_json::from_str(json).unwrap();
        assert_eq!(dof.samples.get(), 4);
    }
}
