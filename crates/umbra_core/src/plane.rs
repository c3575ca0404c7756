//! Finite plane patch with optional planar texture mapping.

use umbra_math::{Interval, Ray, Vec3};

use crate::material::Material;
use crate::object::{Intersect, SignedDistance, SurfaceHit};

/// World units per texture repeat are `1 / TEXTURE_SCALE`.
pub const TEXTURE_SCALE: f32 = 0.2;

const PARALLEL_EPSILON: f32 = 1e-6;

/// A rectangular patch of a plane.
///
/// `width` runs along the first basis axis and `height` along the second
/// (see [`Plane::basis`]). The signed distance ignores the patch bounds and
/// describes the infinite plane.
#[derive(Debug, Clone)]
pub struct Plane {
    pub position: Vec3,
    normal: Vec3,
    pub width: f32,
    pub height: f32,
    /// Whether the material's texture is applied
    pub textured: bool,
    pub material: Material,
}

impl Plane {
    pub fn new(position: Vec3, normal: Vec3, width: f32, height: f32, material: Material) -> Self {
        Self {
            position,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
            width: width.max(0.0),
            height: height.max(0.0),
            textured: false,
            material,
        }
    }

    /// Enable texture lookup for this plane.
    pub fn textured(mut self) -> Self {
        self.textured = true;
        self
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Two unit axes spanning the plane.
    ///
    /// The first is the largest of `n × X`, `n × Y`, `n × Z` (the smaller
    /// ones can vanish when `n` is close to a world axis), the second is
    /// `n × u`.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let n = self.normal;
        let x = n.cross(Vec3::X);
        let y = n.cross(Vec3::Y);
        let z = n.cross(Vec3::Z);

        let max_xy = if x.length_squared() < y.length_squared() { y } else { x };
        let u = if max_xy.length_squared() < z.length_squared() { z } else { max_xy };
        let u = u.normalize();
        (u, n.cross(u))
    }

    /// Texture coordinates of a point on the plane.
    pub fn texture_coords(&self, point: Vec3) -> (f32, f32) {
        let (u_axis, v_axis) = self.basis();
        (
            u_axis.dot(point) * TEXTURE_SCALE,
            v_axis.dot(point) * TEXTURE_SCALE,
        )
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let point = ray.at(t);
        let (u_axis, v_axis) = self.basis();
        let local = point - self.position;
        if local.dot(u_axis).abs() > self.width / 2.0 || local.dot(v_axis).abs() > self.height / 2.0 {
            return None;
        }

        Some(SurfaceHit {
            t,
            point,
            normal: self.normal,
        })
    }
}

impl SignedDistance for Plane {
    fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.position).dot(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        // Floor below the camera, facing up
        Plane::new(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            20.0,
            10.0,
            Material::default(),
        )
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let normals = [
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::new(0.3, 0.0, 0.7),
            Vec3::new(-1.0, 2.0, 0.5),
        ];
        for n in normals {
            let plane = Plane::new(Vec3::ZERO, n, 1.0, 1.0, Material::default());
            let (u, v) = plane.basis();
            assert!((u.length() - 1.0).abs() < 1e-5);
            assert!((v.length() - 1.0).abs() < 1e-5);
            assert!(u.dot(v).abs() < 1e-5);
            assert!(u.dot(plane.normal()).abs() < 1e-5);
            assert!(v.dot(plane.normal()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_floor_basis_axes() {
        // For an upward plane Y x X = -Z has the same length as Y x Z = X
        // and wins the tie, so width runs along z and height along x
        let (u, v) = floor().basis();
        assert!(u.y.abs() < 1e-6 && v.y.abs() < 1e-6);
        assert!((u.z.abs() - 1.0).abs() < 1e-6);
        assert!((v.x.abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hit_inside_patch() {
        let ray = Ray::new(Vec3::new(3.0, 5.0, 2.0), Vec3::NEG_Y);
        let hit = floor().intersect(&ray, Interval::forward(0.001)).unwrap();

        assert!((hit.t - 7.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(3.0, -2.0, 2.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_miss_outside_patch() {
        // z = 11 is beyond the 20-wide patch, x = 6 beyond the 10-high one
        let wide = Ray::new(Vec3::new(0.0, 5.0, 11.0), Vec3::NEG_Y);
        let deep = Ray::new(Vec3::new(6.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(floor().intersect(&wide, Interval::forward(0.001)).is_none());
        assert!(floor().intersect(&deep, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_parallel_and_behind_miss() {
        let parallel = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(floor().intersect(&parallel, Interval::forward(0.001)).is_none());
        assert!(floor().intersect(&away, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_signed_distance() {
        let plane = floor();
        assert!((plane.signed_distance(Vec3::new(4.0, 3.0, -8.0)) - 5.0).abs() < 1e-6);
        assert!((plane.signed_distance(Vec3::new(0.0, -4.0, 0.0)) + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_texture_coords_scale() {
        let plane = floor();
        let (u_axis, v_axis) = plane.basis();
        let p = Vec3::new(5.0, -2.0, 10.0);
        let (u, v) = plane.texture_coords(p);
        assert!((u - u_axis.dot(p) * 0.2).abs() < 1e-6);
        assert!((v - v_axis.dot(p) * 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_normal_falls_back() {
        let plane = Plane::new(Vec3::ZERO, Vec3::ZERO, 1.0, 1.0, Material::default());
        assert_eq!(plane.normal(), Vec3::Y);
    }
}
