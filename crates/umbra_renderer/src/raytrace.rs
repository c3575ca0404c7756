//! Whitted-style ray tracing: one primary ray, local Phong shading.

use umbra_core::{Color, Scene, SceneObject};
use umbra_math::Ray;

use crate::hit::{closest_surface, ClosestHit};
use crate::shading::Shader;

/// Colour seen along `ray`, or the scene background on a miss.
pub fn ray_color(scene: &Scene, ray: &Ray, shader: &Shader) -> Color {
    match closest_surface(scene, ray) {
        Some(hit) => shade_hit(scene, &hit, shader),
        None => scene.background,
    }
}

/// Phong colour at a hit, using the texture for textured planes.
pub fn shade_hit(scene: &Scene, hit: &ClosestHit, shader: &Shader) -> Color {
    let material = hit.object.material();
    let diffuse = surface_diffuse(scene, hit);
    shader.shade(
        hit.hit.point,
        hit.hit.normal,
        diffuse,
        material.specular,
        material.shininess,
    )
}

/// Diffuse colour at a hit point.
pub fn surface_diffuse(scene: &Scene, hit: &ClosestHit) -> Color {
    match (hit.object, scene.surface_texture(hit.id)) {
        (SceneObject::Plane(plane), Some(texture)) => {
            let (u, v) = plane.texture_coords(hit.hit.point);
            texture.lookup(u, v)
        }
        _ => hit.object.material().diffuse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::Occlusion;
    use umbra_core::{colors, Material, Plane, PointLight, Sphere, Texture};
    use umbra_math::Vec3;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 10.0);

    #[test]
    fn test_miss_returns_background_exactly() {
        let mut scene = Scene::new().with_background(Color::new(0.1, 0.2, 0.3));
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 5.0, Material::default()));
        let shader = Shader::new(&scene, EYE, Occlusion::Analytic);

        let up = Ray::new(EYE, Vec3::Y);
        assert_eq!(ray_color(&scene, &up, &shader), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_hit_uses_material() {
        let mut scene = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 5.0, Material::new(colors::RED, 100.0)));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 0.0, 5.0), 100.0));
        let shader = Shader::new(&scene, EYE, Occlusion::Analytic);

        let color = ray_color(&scene, &Ray::new(EYE, Vec3::NEG_Z), &shader);
        assert!(color.x > color.y);
        assert_eq!(color.y, color.z);
    }

    #[test]
    fn test_textured_plane_uses_texture() {
        let mut scene = Scene::new();
        let green = scene.textures_mut().insert(Texture::solid_color(colors::PALE_GREEN));
        let floor = Plane::new(
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::Y,
            100.0,
            100.0,
            Material::new(colors::RED, 10.0).with_texture(green),
        );
        scene.add_object(floor.clone().textured());
        let shader = Shader::new(&scene, EYE, Occlusion::None);

        let ray = Ray::new(EYE, Vec3::new(0.0, -1.0, -1.0));
        let hit = closest_surface(&scene, &ray).unwrap();
        assert_eq!(surface_diffuse(&scene, &hit), colors::PALE_GREEN);
        assert!(ray_color(&scene, &ray, &shader).is_finite());

        // Same plane with texturing off keeps its own diffuse colour
        let mut plain = Scene::new();
        plain.textures_mut().insert(Texture::solid_color(colors::PALE_GREEN));
        plain.add_object(floor);
        let hit = closest_surface(&plain, &ray).unwrap();
        assert_eq!(surface_diffuse(&plain, &hit), colors::RED);
    }
}
