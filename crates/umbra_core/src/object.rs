//! Scene object variants and the capabilities they expose.
//!
//! A closed set of variants replaces a class hierarchy: integrators match on
//! the variant to find textured planes and emitters, and ask for a
//! capability ([`Intersect`] or [`SignedDistance`]) instead of relying on a
//! default that silently misses.

use std::fmt;

use umbra_math::{Interval, Ray, Vec3};

use crate::material::Material;
use crate::plane::Plane;
use crate::sphere::{Luminaire, Sphere};
use crate::torus::{Torus, TwistedRepeatedTorus, TwistedTorus};

/// Result of an analytic ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the intersection
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal (outward for closed surfaces)
    pub normal: Vec3,
}

/// Objects with a closed-form ray intersection.
pub trait Intersect {
    /// Nearest intersection whose ray parameter lies strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;
}

/// Objects with a signed distance function (negative inside).
pub trait SignedDistance {
    fn signed_distance(&self, p: Vec3) -> f32;
}

/// The variant tag of a [`SceneObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Sphere,
    Plane,
    Torus,
    TwistedTorus,
    TwistedRepeatedTorus,
    Luminaire,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Sphere => "sphere",
            ObjectKind::Plane => "plane",
            ObjectKind::Torus => "torus",
            ObjectKind::TwistedTorus => "twisted torus",
            ObjectKind::TwistedRepeatedTorus => "twisted repeated torus",
            ObjectKind::Luminaire => "luminaire",
        };
        f.write_str(name)
    }
}

/// Geometric query an integrator depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Intersect,
    SignedDistance,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Intersect => f.write_str("analytic intersection"),
            Capability::SignedDistance => f.write_str("signed distance"),
        }
    }
}

/// A renderable scene object.
#[derive(Debug, Clone)]
pub enum SceneObject {
    Sphere(Sphere),
    Plane(Plane),
    Torus(Torus),
    TwistedTorus(TwistedTorus),
    TwistedRepeatedTorus(TwistedRepeatedTorus),
    Luminaire(Luminaire),
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Sphere(_) => ObjectKind::Sphere,
            SceneObject::Plane(_) => ObjectKind::Plane,
            SceneObject::Torus(_) => ObjectKind::Torus,
            SceneObject::TwistedTorus(_) => ObjectKind::TwistedTorus,
            SceneObject::TwistedRepeatedTorus(_) => ObjectKind::TwistedRepeatedTorus,
            SceneObject::Luminaire(_) => ObjectKind::Luminaire,
        }
    }

    /// Surface material.
    pub fn material(&self) -> &Material {
        match self {
            SceneObject::Sphere(s) => &s.material,
            SceneObject::Plane(p) => &p.material,
            SceneObject::Torus(t) => &t.shape.material,
            SceneObject::TwistedTorus(t) => &t.shape.material,
            SceneObject::TwistedRepeatedTorus(t) => &t.shape.material,
            SceneObject::Luminaire(l) => &l.sphere.material,
        }
    }

    /// Reference position of the object.
    pub fn position(&self) -> Vec3 {
        match self {
            SceneObject::Sphere(s) => s.center,
            SceneObject::Plane(p) => p.position,
            SceneObject::Torus(t) => t.shape.position,
            SceneObject::TwistedTorus(t) => t.shape.position,
            SceneObject::TwistedRepeatedTorus(t) => t.shape.position,
            SceneObject::Luminaire(l) => l.sphere.center,
        }
    }

    /// Whether the path tracer treats this object as a light emitter.
    pub fn is_emitter(&self) -> bool {
        matches!(self, SceneObject::Luminaire(_))
    }

    /// The analytic intersection capability, if this variant has one.
    pub fn as_intersect(&self) -> Option<&dyn Intersect> {
        match self {
            SceneObject::Sphere(s) => Some(s),
            SceneObject::Plane(p) => Some(p),
            SceneObject::Luminaire(l) => Some(l),
            SceneObject::Torus(_)
            | SceneObject::TwistedTorus(_)
            | SceneObject::TwistedRepeatedTorus(_) => None,
        }
    }

    /// The signed distance capability. Every shipped variant has one.
    pub fn as_signed_distance(&self) -> Option<&dyn SignedDistance> {
        match self {
            SceneObject::Sphere(s) => Some(s),
            SceneObject::Plane(p) => Some(p),
            SceneObject::Torus(t) => Some(t),
            SceneObject::TwistedTorus(t) => Some(t),
            SceneObject::TwistedRepeatedTorus(t) => Some(t),
            SceneObject::Luminaire(l) => Some(l),
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Intersect => self.as_intersect().is_some(),
            Capability::SignedDistance => self.as_signed_distance().is_some(),
        }
    }

    /// Signed distance at `p`, or `+inf` for a variant without a distance
    /// field so it can never win a nearest-surface query.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.as_signed_distance()
            .map_or(f32::INFINITY, |sdf| sdf.signed_distance(p))
    }

    /// Analytic intersection, `None` for a miss or a variant without one.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        self.as_intersect()
            .and_then(|object| object.intersect(ray, ray_t))
    }
}

impl From<Sphere> for SceneObject {
    fn from(s: Sphere) -> Self {
        SceneObject::Sphere(s)
    }
}

impl From<Plane> for SceneObject {
    fn from(p: Plane) -> Self {
        SceneObject::Plane(p)
    }
}

impl From<Torus> for SceneObject {
    fn from(t: Torus) -> Self {
        SceneObject::Torus(t)
    }
}

impl From<TwistedTorus> for SceneObject {
    fn from(t: TwistedTorus) -> Self {
        SceneObject::TwistedTorus(t)
    }
}

impl From<TwistedRepeatedTorus> for SceneObject {
    fn from(t: TwistedRepeatedTorus) -> Self {
        SceneObject::TwistedRepeatedTorus(t)
    }
}

impl From<Luminaire> for SceneObject {
    fn from(l: Luminaire) -> Self {
        SceneObject::Luminaire(l)
    }
}
