//! Sphere primitive and the emissive luminaire built on it.

use umbra_math::{Interval, Ray, Vec3};

use crate::material::{colors, Material};
use crate::object::{Intersect, SignedDistance, SurfaceHit};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 || self.radius == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(SurfaceHit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
        })
    }
}

impl SignedDistance for Sphere {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - self.radius
    }
}

/// Default luminaire radius.
pub const LUMINAIRE_RADIUS: f32 = 3.0;

/// An emissive sphere.
///
/// The path tracer treats it as a light source; the ray tracer, the ray
/// marcher and shadow rays skip it.
#[derive(Debug, Clone)]
pub struct Luminaire {
    pub sphere: Sphere,
    pub intensity: f32,
}

impl Luminaire {
    pub fn new(center: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            sphere: Sphere::new(center, radius, Material::new(colors::WHITE, 0.0)),
            intensity: intensity.max(0.0),
        }
    }
}

impl Intersect for Luminaire {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        self.sphere.intersect(ray, ray_t)
    }
}

impl SignedDistance for Luminaire {
    fn signed_distance(&self, p: Vec3) -> f32 {
        self.sphere.signed_distance(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::default())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray, Interval::forward(0.001)).unwrap();
        assert!((hit.t - 0.5).abs() < 0.001); // Should hit at t=0.5
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_ray_at_center_hits_with_outward_unit_normal() {
        let center = Vec3::new(2.0, -3.0, -10.0);
        let sphere = unit_sphere_at(center, 5.0);
        let origins = [
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(20.0, 4.0, -10.0),
            Vec3::new(-7.0, -30.0, 1.0),
        ];

        for origin in origins {
            // Unnormalized direction on purpose
            let ray = Ray::new(origin, (center - origin) * 3.0);
            let hit = sphere.intersect(&ray, Interval::forward(0.001)).unwrap();

            assert!((hit.normal.length() - 1.0).abs() < 1e-4);
            assert!(hit.normal.dot(hit.point - center) > 0.0);
            assert!(hit.normal.dot(origin - hit.point) > 0.0);
        }
    }

    #[test]
    fn test_sdf_exact() {
        let sphere = unit_sphere_at(Vec3::ZERO, 5.0);
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(3.0, 4.0, 12.0),
            Vec3::new(-1.5, 0.25, 2.0),
        ];
        for p in points {
            assert_eq!(sphere.signed_distance(p), p.length() - 5.0);
        }
    }

    #[test]
    fn test_luminaire_clamps_intensity() {
        let lum = Luminaire::new(Vec3::ZERO, -4.0, LUMINAIRE_RADIUS);
        assert_eq!(lum.intensity, 0.0);
        assert_eq!(lum.sphere.radius, LUMINAIRE_RADIUS);
    }
}
