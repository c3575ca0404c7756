//! Simplified stochastic path tracer.
//!
//! Each bounce adds the local Phong colour of the surface it lands on and
//! continues in a direction drawn uniformly from the cube `[-1, 1]^3`.
//! Luminaires are only seen directly: a primary ray that hits one returns
//! white, later bounces that hit one stop without adding anything.

use rand::RngCore;
use umbra_core::{colors, Color, Scene};
use umbra_math::Ray;

use crate::hit::closest_object;
use crate::raytrace::shade_hit;
use crate::sampling::random_in_cube;
use crate::shading::Shader;

/// Offset along the new direction for bounce ray origins.
pub const BOUNCE_BIAS: f32 = 0.01;

/// Why a path stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Background,
    Emitter,
    MaxDepth,
}

/// One traced path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Raw sum of every contribution along the path
    pub color: Color,
    /// Bounces taken before terminating
    pub depth: u32,
    pub termination: Termination,
}

/// Trace one path starting with `ray`.
pub fn trace_path(
    scene: &Scene,
    ray: &Ray,
    shader: &Shader,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> PathSample {
    let mut color = Color::ZERO;
    let mut ray = *ray;
    let mut depth = 0;

    loop {
        if depth >= max_depth {
            return PathSample {
                color,
                depth,
                termination: Termination::MaxDepth,
            };
        }

        let Some(hit) = closest_object(scene, &ray) else {
            return PathSample {
                color: color + scene.background,
                depth,
                termination: Termination::Background,
            };
        };

        if hit.object.is_emitter() {
            if depth == 0 {
                color += colors::WHITE;
            }
            return PathSample {
                color,
                depth,
                termination: Termination::Emitter,
            };
        }

        color += shade_hit(scene, &hit, shader);

        let direction = random_in_cube(rng);
        ray = Ray::new(hit.hit.point + BOUNCE_BIAS * direction, direction);
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::Occlusion;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::hit::closest_surface;
    use umbra_core::{Luminaire, Material, Plane, PointLight, Sphere, Texture};
    use umbra_math::Vec3;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 10.0);

    /// Inside a large sphere most bounces land on its inner wall.
    fn enclosed_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::ZERO, 50.0, Material::new(colors::LIGHT_CORAL, 10.0)));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 10.0, 0.0), 500.0));
        scene
    }

    #[test]
    fn test_depth_never_exceeds_max() {
        let scene = enclosed_scene();
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let mut rng = StdRng::seed_from_u64(11);

        for max_depth in [0, 1, 3, 10] {
            for _ in 0..20 {
                let ray = Ray::new(Vec3::ZERO, random_in_cube(&mut rng));
                let sample = trace_path(&scene, &ray, &shader, max_depth, &mut rng);
                assert!(sample.depth <= max_depth);
                if sample.termination == Termination::MaxDepth {
                    assert_eq!(sample.depth, max_depth);
                }
            }
        }
    }

    #[test]
    fn test_zero_depth_contributes_nothing() {
        let scene = enclosed_scene();
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let mut rng = StdRng::seed_from_u64(1);

        let sample = trace_path(&scene, &Ray::new(Vec3::ZERO, Vec3::X), &shader, 0, &mut rng);
        assert_eq!(sample.color, Color::ZERO);
    }

    #[test]
    fn test_primary_emitter_hit_is_white() {
        let mut scene = Scene::new().with_background(Color::new(0.0, 0.0, 1.0));
        scene.add_object(Luminaire::new(Vec3::new(0.0, 0.0, -10.0), 10.0, 3.0));
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let mut rng = StdRng::seed_from_u64(1);

        let sample = trace_path(&scene, &Ray::new(EYE, Vec3::NEG_Z), &shader, 10, &mut rng);
        assert_eq!(sample.color, colors::WHITE);
        assert_eq!(sample.depth, 0);
        assert_eq!(sample.termination, Termination::Emitter);
    }

    #[test]
    fn test_miss_adds_background() {
        let scene = Scene::new().with_background(Color::new(0.1, 0.2, 0.3));
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let mut rng = StdRng::seed_from_u64(1);

        let sample = trace_path(&scene, &Ray::new(EYE, Vec3::NEG_Z), &shader, 10, &mut rng);
        assert_eq!(sample.color, Color::new(0.1, 0.2, 0.3));
        assert_eq!(sample.termination, Termination::Background);
    }

    #[test]
    fn test_bounce_accumulates_raw_sum() {
        // Floor patch under the camera, open sky with a black background
        let mut scene = Scene::new();
        scene.add_object(Plane::new(
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::Y,
            100.0,
            100.0,
            Material::new(colors::GREY, 10.0),
        ));
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let ray = Ray::new(EYE, Vec3::new(0.0, -1.0, -1.0));

        let first = trace_path(&scene, &ray, &shader, 1, &mut StdRng::seed_from_u64(9));
        let deeper = trace_path(&scene, &ray, &shader, 10, &mut StdRng::seed_from_u64(9));

        // Only ambient reaches the floor, and later bounces never subtract
        assert!((first.color - scene.ambient.contribution()).abs().max_element() < 1e-6);
        assert!(deeper.color.min_element() >= first.color.min_element());
    }

    fn floor(material: Material) -> Plane {
        Plane::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y, 100.0, 100.0, material)
    }

    #[test]
    fn test_bounce_into_emitter_adds_nothing() {
        // Every bounce off the floor lands on the surrounding luminaire
        let mut scene = Scene::new();
        scene.add_object(floor(Material::new(colors::GREY, 10.0)));
        scene.add_object(Luminaire::new(Vec3::ZERO, 10.0, 1000.0));
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let ray = Ray::new(EYE, Vec3::new(0.0, -1.0, -1.0));

        for seed in 0..8 {
            let sample = trace_path(&scene, &ray, &shader, 10, &mut StdRng::seed_from_u64(seed));
            assert_eq!(sample.termination, Termination::Emitter);
            assert_eq!(sample.depth, 1);
            assert!((sample.color - scene.ambient.contribution()).abs().max_element() < 1e-6);
        }
    }

    #[test]
    fn test_bounce_colour_uses_plane_texture() {
        let mut scene = Scene::new();
        let green = scene.textures_mut().insert(Texture::solid_color(colors::PALE_GREEN));
        let material = Material::new(colors::RED, 10.0)
            .with_specular(Color::ZERO)
            .with_texture(green);
        scene.add_object(floor(material).textured());
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, -5.0), 100.0));
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let ray = Ray::new(EYE, Vec3::new(0.0, -1.0, -1.0));

        let sample = trace_path(&scene, &ray, &shader, 1, &mut StdRng::seed_from_u64(3));
        let hit = closest_surface(&scene, &ray).unwrap();
        let textured = shader.shade(hit.hit.point, hit.hit.normal, colors::PALE_GREEN, Color::ZERO, 10.0);
        let plain = shader.shade(hit.hit.point, hit.hit.normal, colors::RED, Color::ZERO, 10.0);

        assert_eq!(sample.color, textured);
        assert!(sample.color.y > plain.y);
    }

    #[test]
    fn test_same_seed_same_path() {
        let scene = enclosed_scene();
        let shader = Shader::new(&scene, EYE, Occlusion::None);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        let a = trace_path(&scene, &ray, &shader, 5, &mut StdRng::seed_from_u64(4));
        let b = trace_path(&scene, &ray, &shader, 5, &mut StdRng::seed_from_u64(4));
        assert_eq!(a, b);
    }
}
