//! The scene arena.
//!
//! A [`Scene`] owns every object, light and texture for the lifetime of a
//! render. Everything else refers to its entities by index ([`ObjectId`],
//! [`TextureId`]), and renderers only ever borrow it immutably.

use std::fmt;

use thiserror::Error;

use crate::light::{AmbientLight, ConeLight, PointLight};
use crate::material::{colors, Color};
use crate::object::{Capability, ObjectKind, SceneObject};
use crate::texture::{Texture, TextureCache, TextureId};

/// Index of an object in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while assembling or checking a scene.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("object {object} ({kind}) has no {capability}")]
    MissingCapability {
        object: ObjectId,
        kind: ObjectKind,
        capability: Capability,
    },

    #[error("object {object} refers to unknown texture {texture}")]
    UnknownTexture { object: ObjectId, texture: usize },
}

/// Scene objects, lights and textures.
pub struct Scene {
    objects: Vec<SceneObject>,
    point_lights: Vec<PointLight>,
    cone_lights: Vec<ConeLight>,

    /// The single ambient term
    pub ambient: AmbientLight,

    /// Colour returned for rays that hit nothing
    pub background: Color,

    textures: TextureCache,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default ambient light and a black background.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            point_lights: Vec::new(),
            cone_lights: Vec::new(),
            ambient: AmbientLight::default(),
            background: colors::BLACK,
            textures: TextureCache::new(),
        }
    }

    pub fn with_ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add an object and return its id.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(object.into());
        id
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_cone_light(&mut self, light: ConeLight) {
        self.cone_lights.push(light);
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Objects in insertion order with their ids.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    /// Objects that take part in shading and occlusion (everything but emitters).
    pub fn surfaces(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.objects().filter(|(_, object)| !object.is_emitter())
    }

    /// Ids of the emissive objects.
    pub fn emitters(&self) -> Vec<ObjectId> {
        self.objects()
            .filter(|(_, object)| object.is_emitter())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn cone_lights(&self) -> &[ConeLight] {
        &self.cone_lights
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    /// Texture to sample at a hit on `id`, if any.
    ///
    /// Only textured planes with a resolvable texture qualify; every other
    /// surface shades with its material colour.
    pub fn surface_texture(&self, id: ObjectId) -> Option<&Texture> {
        match self.object(id)? {
            SceneObject::Plane(plane) if plane.textured => {
                plane.material.texture.and_then(|t| self.texture(t))
            }
            _ => None,
        }
    }

    /// Check that every object an integrator will query supports `capability`.
    ///
    /// Emitters are included: the path tracer intersects them.
    pub fn require(&self, capability: Capability) -> Result<(), SceneError> {
        for (id, object) in self.objects() {
            if !object.supports(capability) {
                return Err(SceneError::MissingCapability {
                    object: id,
                    kind: object.kind(),
                    capability,
                });
            }
        }
        Ok(())
    }

    /// Check that every texture reference resolves.
    pub fn check_textures(&self) -> Result<(), SceneError> {
        for (id, object) in self.objects() {
            if let Some(texture) = object.material().texture {
                if self.texture(texture).is_none() {
                    return Err(SceneError::UnknownTexture {
                        object: id,
                        texture: texture.0,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::plane::Plane;
    use crate::sphere::{Luminaire, Sphere};
    use crate::torus::Torus;
    use umbra_math::Vec3;

    fn sphere(z: f32) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, Material::default())
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add_object(sphere(-5.0));
        let b = scene.add_object(Luminaire::new(Vec3::ZERO, 10.0, 3.0));

        assert_eq!(a, ObjectId(0));
        assert_eq!(b, ObjectId(1));
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.emitters(), vec![b]);
        assert_eq!(scene.surfaces().map(|(id, _)| id).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_require_intersect_rejects_torus() {
        let mut scene = Scene::new();
        scene.add_object(sphere(-5.0));
        let torus = scene.add_object(Torus::new(Vec3::ZERO, 4.0, 2.0, Material::default()));

        assert_eq!(
            scene.require(Capability::Intersect),
            Err(SceneError::MissingCapability {
                object: torus,
                kind: ObjectKind::Torus,
                capability: Capability::Intersect,
            })
        );
        assert!(scene.require(Capability::SignedDistance).is_ok());
    }

    #[test]
    fn test_surface_texture_only_for_textured_planes() {
        let mut scene = Scene::new();
        let tex = scene.textures_mut().insert(Texture::solid_color(colors::RED));

        let textured = scene.add_object(
            Plane::new(Vec3::ZERO, Vec3::Y, 10.0, 10.0, Material::default().with_texture(tex)).textured(),
        );
        let flag_off = scene.add_object(Plane::new(
            Vec3::ZERO,
            Vec3::Y,
            10.0,
            10.0,
            Material::default().with_texture(tex),
        ));
        let ball = scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Material::default().with_texture(tex)));

        assert!(scene.surface_texture(textured).is_some());
        assert!(scene.surface_texture(flag_off).is_none());
        assert!(scene.surface_texture(ball).is_none());
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let mut scene = Scene::new();
        let plane = scene.add_object(
            Plane::new(Vec3::ZERO, Vec3::Y, 10.0, 10.0, Material::default().with_texture(TextureId(9)))
                .textured(),
        );

        assert!(scene.surface_texture(plane).is_none());
        assert!(matches!(
            scene.check_textures(),
            Err(SceneError::UnknownTexture { texture: 9, .. })
        ));
    }
}
