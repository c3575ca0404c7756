//! Light sources for Phong shading.
//!
//! Luminaires are not here: they are scene objects (see
//! [`crate::sphere::Luminaire`]) because the path tracer has to hit them.

use umbra_math::Vec3;

use crate::material::{colors, Color};

/// Ambient intensity used when a scene doesn't specify one.
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.03;

/// An omnidirectional light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity: intensity.max(0.0),
        }
    }
}

/// Flat colour added to every shaded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity: intensity.max(0.0),
        }
    }

    /// Contribution added before any light is evaluated.
    pub fn contribution(&self) -> Color {
        self.color * self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(colors::WHITE, DEFAULT_AMBIENT_INTENSITY)
    }
}

/// A spot light.
///
/// Points within `cutoff_degrees` of `direction` are lit, weighted by
/// `cos(angle)^falloff_exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeLight {
    pub position: Vec3,
    direction: Vec3,
    pub intensity: f32,
    /// Half-angle of the cone
    pub cutoff_degrees: f32,
    pub falloff_exponent: f32,
}

impl ConeLight {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        intensity: f32,
        cutoff_degrees: f32,
        falloff_exponent: f32,
    ) -> Self {
        Self {
            position,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Y),
            intensity: intensity.max(0.0),
            cutoff_degrees: cutoff_degrees.clamp(0.0, 180.0),
            falloff_exponent: falloff_exponent.max(0.0),
        }
    }

    /// Unit direction the cone points along.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Cosine of the cut-off half-angle.
    pub fn cos_cutoff(&self) -> f32 {
        self.cutoff_degrees.to_radians().cos()
    }
}
