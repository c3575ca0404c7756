//! Torus family: distance-field-only primitives.
//!
//! Each variant builds on the previous one by inserting a domain transform
//! before the torus is evaluated:
//!
//! - [`Torus`]: rotate, eval
//! - [`TwistedTorus`]: rotate, twist, eval
//! - [`TwistedRepeatedTorus`]: rotate, repeat, twist, eval
//!
//! The twist angle is taken from the world-space height of the query point,
//! so stacked lattice cells twist progressively. The order is part of the
//! look of a scene and must not change.

use umbra_math::{glsl_mod, Quat, Vec2, Vec3};

use crate::material::Material;
use crate::object::SignedDistance;

pub const DEFAULT_ROTATION_DEGREES: f32 = 45.0;
pub const DEFAULT_ROTATION_AXIS: Vec3 = Vec3::new(-0.7, -0.3, 0.0);
pub const DEFAULT_TWIST: f32 = 0.2;
pub const DEFAULT_REPEAT_PERIOD: Vec3 = Vec3::splat(21.0);

/// Placement and radii shared by every torus variant.
#[derive(Debug, Clone)]
pub struct TorusShape {
    pub position: Vec3,
    /// Distance from the centre to the middle of the tube
    pub major_radius: f32,
    /// Tube radius
    pub minor_radius: f32,
    rotation_degrees: f32,
    rotation_axis: Vec3,
    pub material: Material,
}

impl TorusShape {
    pub fn new(position: Vec3, major_radius: f32, minor_radius: f32, material: Material) -> Self {
        Self {
            position,
            major_radius,
            minor_radius,
            rotation_degrees: DEFAULT_ROTATION_DEGREES,
            rotation_axis: DEFAULT_ROTATION_AXIS.normalize(),
            material,
        }
    }

    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation_degrees = degrees;
    }

    /// Set the rotation axis. Zero-length axes are ignored.
    pub fn set_rotation_axis(&mut self, axis: Vec3) {
        if let Some(axis) = axis.try_normalize() {
            self.rotation_axis = axis;
        }
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    /// World point to object space: inverse of translate-then-rotate.
    fn to_object_space(&self, p: Vec3) -> Vec3 {
        let rotation = Quat::from_axis_angle(self.rotation_axis, self.rotation_degrees.to_radians());
        rotation.inverse() * (p - self.position)
    }

    /// Distance to a torus lying in the object's xz plane.
    fn eval(&self, p: Vec3) -> f32 {
        let q = Vec2::new(Vec2::new(p.x, p.z).length() - self.major_radius, p.y);
        q.length() - self.minor_radius
    }
}

/// Rotate the xz plane of `p` by `k * height`.
///
/// The result is `(rotated.x, rotated.z, p.y)`; the swap of the last two
/// components is what gives the twisted variants their orientation.
fn twist(p: Vec3, height: f32, k: f32) -> Vec3 {
    let (s, c) = (k * height).sin_cos();
    Vec3::new(c * p.x + s * p.z, -s * p.x + c * p.z, p.y)
}

/// Tile space with the given period, centring each cell on the origin.
fn repeat(p: Vec3, period: Vec3) -> Vec3 {
    glsl_mod(p + 0.5 * period, period) - 0.5 * period
}

/// A rotated torus.
#[derive(Debug, Clone)]
pub struct Torus {
    pub shape: TorusShape,
}

impl Torus {
    pub fn new(position: Vec3, major_radius: f32, minor_radius: f32, material: Material) -> Self {
        Self {
            shape: TorusShape::new(position, major_radius, minor_radius, material),
        }
    }
}

impl SignedDistance for Torus {
    fn signed_distance(&self, p: Vec3) -> f32 {
        let p = self.shape.to_object_space(p);
        self.shape.eval(p)
    }
}

/// A torus whose cross-section twists along its local y axis.
#[derive(Debug, Clone)]
pub struct TwistedTorus {
    pub shape: TorusShape,
    /// Twist rate in radians per unit of y
    pub twist: f32,
}

impl TwistedTorus {
    pub fn new(position: Vec3, major_radius: f32, minor_radius: f32, material: Material) -> Self {
        Self {
            shape: TorusShape::new(position, major_radius, minor_radius, material),
            twist: DEFAULT_TWIST,
        }
    }

    pub fn with_twist(mut self, twist: f32) -> Self {
        self.twist = twist;
        self
    }
}

impl SignedDistance for TwistedTorus {
    fn signed_distance(&self, p: Vec3) -> f32 {
        let local = self.shape.to_object_space(p);
        let local = twist(local, p.y, self.twist);
        self.shape.eval(local)
    }
}

/// A twisted torus tiled infinitely through space.
#[derive(Debug, Clone)]
pub struct TwistedRepeatedTorus {
    pub shape: TorusShape,
    pub twist: f32,
    repeat_period: Vec3,
}

impl TwistedRepeatedTorus {
    pub fn new(position: Vec3, major_radius: f32, minor_radius: f32, material: Material) -> Self {
        Self {
            shape: TorusShape::new(position, major_radius, minor_radius, material),
            twist: DEFAULT_TWIST,
            repeat_period: DEFAULT_REPEAT_PERIOD,
        }
    }

    pub fn with_twist(mut self, twist: f32) -> Self {
        self.twist = twist;
        self
    }

    /// Set the tiling period. Components must be positive; others keep
    /// their previous value.
    pub fn with_repeat_period(mut self, period: Vec3) -> Self {
        let keep = self.repeat_period;
        self.repeat_period = Vec3::select(period.cmpgt(Vec3::ZERO), period, keep);
        self
    }

    pub fn repeat_period(&self) -> Vec3 {
        self.repeat_period
    }
}

impl SignedDistance for TwistedRepeatedTorus {
    fn signed_distance(&self, p: Vec3) -> f32 {
        let local = self.shape.to_object_space(p);
        let local = repeat(local, self.repeat_period);
        let local = twist(local, p.y, self.twist);
        self.shape.eval(local)
    }
}
