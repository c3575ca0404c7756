//! Camera for ray generation.

use umbra_core::CameraDescription;
use umbra_math::{Ray, Vec3};

/// Anything that can turn normalised image coordinates into primary rays.
///
/// `(u, v)` run over `[0, 1]`, with `(0, 0)` at the top-left of the image.
pub trait Camera: Send + Sync {
    fn generate_ray(&self, u: f32, v: f32) -> Ray;

    /// Eye position, used as the view point for specular highlights.
    fn position(&self) -> Vec3;
}

/// A pinhole camera shooting rays through a rectangular view plane.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // View plane, in world units
    view_width: f32,
    view_height: f32,
    view_distance: f32,

    // Cached computed values (set by initialize())
    upper_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl PinholeCamera {
    /// Create a camera at `(0, 0, 10)` looking down -Z through a 6 x 4
    /// view plane five units ahead.
    pub fn new() -> Self {
        let defaults = CameraDescription::default();
        let mut camera = Self {
            look_from: defaults.position,
            look_at: defaults.look_at,
            vup: defaults.up,
            view_width: defaults.view_width,
            view_height: defaults.view_height,
            view_distance: defaults.view_distance,
            upper_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialize();
        self
    }

    /// Set the view plane size and its distance from the eye.
    pub fn with_view_plane(mut self, width: f32, height: f32, distance: f32) -> Self {
        self.view_width = width;
        self.view_height = height;
        self.view_distance = distance;
        self.initialize();
        self
    }

    /// Recompute the cached view plane from the current settings.
    pub fn initialize(&mut self) {
        let w = (self.look_from - self.look_at).try_normalize().unwrap_or(Vec3::Z);
        let u = self.vup.cross(w).try_normalize().unwrap_or(Vec3::X);
        let v = w.cross(u);

        self.horizontal = self.view_width * u;
        // Image rows run downwards
        self.vertical = -self.view_height * v;

        let center = self.look_from - self.view_distance * w;
        self.upper_left = center - self.horizontal / 2.0 - self.vertical / 2.0;
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CameraDescription> for PinholeCamera {
    fn from(desc: &CameraDescription) -> Self {
        PinholeCamera::new()
            .with_position(desc.position, desc.look_at, desc.up)
            .with_view_plane(desc.view_width, desc.view_height, desc.view_distance)
    }
}

impl Camera for PinholeCamera {
    fn generate_ray(&self, u: f32, v: f32) -> Ray {
        let target = self.upper_left + u * self.horizontal + v * self.vertical;
        Ray::new(self.look_from, target - self.look_from)
    }

    fn position(&self) -> Vec3 {
        self.look_from
    }
}
