// Re-export glam for convenience
pub use glam::*;

// Umbra math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// GLSL-style `mod`: `x - y * floor(x / y)`, applied per component.
///
/// Unlike `%` the result takes the sign of `y`, which is what periodic
/// tiling of a distance field needs.
#[inline]
pub fn glsl_mod(x: Vec3, y: Vec3) -> Vec3 {
    x - y * (x / y).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_glsl_mod_positive() {
        let r = glsl_mod(Vec3::new(5.0, 22.0, 0.5), Vec3::splat(21.0));
        assert_eq!(r, Vec3::new(5.0, 1.0, 0.5));
    }

    #[test]
    fn test_glsl_mod_negative_wraps_up() {
        // -1 mod 21 is 20 in GLSL, not -1 as with `%`
        let r = glsl_mod(Vec3::new(-1.0, -22.0, -21.0), Vec3::splat(21.0));
        assert!((r.x - 20.0).abs() < 1e-5);
        assert!((r.y - 20.0).abs() < 1e-5);
        assert!(r.z.abs() < 1e-5);
    }
}
