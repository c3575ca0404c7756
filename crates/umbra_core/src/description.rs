//! JSON scene descriptions.
//!
//! A [`SceneDescription`] is the serialisable form of a scene. Building it
//! produces a [`Scene`] arena plus the camera settings, loading every
//! texture on the way. Textures that fail to load are reported back and the
//! affected surfaces keep their plain diffuse colour.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 10], "look_at": [0, 0, -1] },
//!   "objects": [
//!     { "type": "sphere", "center": [0, 0, -10], "radius": 5,
//!       "material": { "diffuse": [1, 0, 0] } }
//!   ],
//!   "lights": [ { "type": "point", "position": [0, 5, 0], "intensity": 500 } ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use umbra_math::Vec3;

use crate::light::{AmbientLight, ConeLight, PointLight, DEFAULT_AMBIENT_INTENSITY};
use crate::material::{colors, Color, Material};
use crate::object::SceneObject;
use crate::plane::Plane;
use crate::scene::Scene;
use crate::sphere::{Luminaire, Sphere, LUMINAIRE_RADIUS};
use crate::texture::{TextureCache, TextureError};
use crate::torus::{
    Torus, TorusShape, TwistedRepeatedTorus, TwistedTorus, DEFAULT_REPEAT_PERIOD,
    DEFAULT_ROTATION_AXIS, DEFAULT_ROTATION_DEGREES, DEFAULT_TWIST,
};

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

/// A texture that could not be loaded while building a scene.
#[derive(Debug)]
pub struct TextureFailure {
    pub path: String,
    pub error: TextureError,
}

/// Pinhole camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Size of the view plane in world units
    pub view_width: f32,
    pub view_height: f32,
    /// Distance from the eye to the view plane
    pub view_distance: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            view_width: 6.0,
            view_height: 4.0,
            view_distance: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
    /// Texture path, relative to the scene file
    pub texture: Option<String>,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        let material = Material::default();
        Self {
            diffuse: material.diffuse,
            specular: material.specular,
            shininess: material.shininess,
            texture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientDescription {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientDescription {
    fn default() -> Self {
        Self {
            color: colors::WHITE,
            intensity: DEFAULT_AMBIENT_INTENSITY,
        }
    }
}

/// Fields shared by the torus family. `twist` is read by the twisted
/// variants and `repeat_period` by the repeated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusDescription {
    pub position: Vec3,
    pub major_radius: f32,
    pub minor_radius: f32,
    pub rotation_degrees: f32,
    pub rotation_axis: Vec3,
    pub twist: f32,
    pub repeat_period: Vec3,
    pub material: MaterialDescription,
}

impl Default for TorusDescription {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            major_radius: 5.0,
            minor_radius: 2.0,
            rotation_degrees: DEFAULT_ROTATION_DEGREES,
            rotation_axis: DEFAULT_ROTATION_AXIS,
            twist: DEFAULT_TWIST,
            repeat_period: DEFAULT_REPEAT_PERIOD,
            material: MaterialDescription::default(),
        }
    }
}

fn default_plane_extent() -> f32 {
    20.0
}

fn default_luminaire_radius() -> f32 {
    LUMINAIRE_RADIUS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        material: MaterialDescription,
    },
    Plane {
        position: Vec3,
        normal: Vec3,
        #[serde(default = "default_plane_extent")]
        width: f32,
        #[serde(default = "default_plane_extent")]
        height: f32,
        #[serde(default)]
        textured: bool,
        #[serde(default)]
        material: MaterialDescription,
    },
    Torus(TorusDescription),
    TwistedTorus(TorusDescription),
    TwistedRepeatedTorus(TorusDescription),
    Luminaire {
        center: Vec3,
        intensity: f32,
        #[serde(default = "default_luminaire_radius")]
        radius: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Point {
        position: Vec3,
        intensity: f32,
    },
    Cone {
        position: Vec3,
        direction: Vec3,
        intensity: f32,
        cutoff_degrees: f32,
        falloff_exponent: f32,
    },
}

/// Serialisable scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub camera: CameraDescription,
    pub background: Color,
    pub ambient: AmbientDescription,
    pub objects: Vec<ObjectDescription>,
    pub lights: Vec<LightDescription>,
}

/// Output of [`SceneDescription::build`].
pub struct BuiltScene {
    pub scene: Scene,
    pub camera: CameraDescription,
    /// Textures that could not be loaded; their surfaces render untextured
    pub texture_failures: Vec<TextureFailure>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DescriptionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the scene arena. Relative texture paths resolve against `base_dir`.
    pub fn build(&self, base_dir: Option<&Path>) -> BuiltScene {
        let mut scene = Scene::new()
            .with_background(self.background)
            .with_ambient(AmbientLight::new(self.ambient.color, self.ambient.intensity));
        if let Some(dir) = base_dir {
            scene.textures_mut().set_base_dir(dir);
        }

        let mut texture_failures = Vec::new();
        for object in &self.objects {
            let object = build_object(object, scene.textures_mut(), &mut texture_failures);
            scene.add_object(object);
        }

        for light in &self.lights {
            match *light {
                LightDescription::Point { position, intensity } => {
                    scene.add_point_light(PointLight::new(position, intensity));
                }
                LightDescription::Cone {
                    position,
                    direction,
                    intensity,
                    cutoff_degrees,
                    falloff_exponent,
                } => {
                    scene.add_cone_light(ConeLight::new(
                        position,
                        direction,
                        intensity,
                        cutoff_degrees,
                        falloff_exponent,
                    ));
                }
            }
        }

        log::info!(
            "Built scene '{}': {} objects ({} emitters), {} point lights, {} cone lights",
            self.name,
            scene.object_count(),
            scene.emitters().len(),
            scene.point_lights().len(),
            scene.cone_lights().len()
        );

        BuiltScene {
            scene,
            camera: self.camera.clone(),
            texture_failures,
        }
    }
}

fn build_material(
    desc: &MaterialDescription,
    textures: &mut TextureCache,
    failures: &mut Vec<TextureFailure>,
) -> Material {
    let mut material = Material::new(desc.diffuse, desc.shininess).with_specular(desc.specular);
    if let Some(path) = &desc.texture {
        match textures.load(path) {
            Ok(id) => material = material.with_texture(id),
            Err(error) => {
                log::warn!("Texture '{}' unavailable, using diffuse colour: {}", path, error);
                failures.push(TextureFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    material
}

fn build_torus_shape(
    desc: &TorusDescription,
    textures: &mut TextureCache,
    failures: &mut Vec<TextureFailure>,
) -> TorusShape {
    let material = build_material(&desc.material, textures, failures);
    let mut shape = TorusShape::new(desc.position, desc.major_radius, desc.minor_radius, material);
    shape.set_rotation_degrees(desc.rotation_degrees);
    shape.set_rotation_axis(desc.rotation_axis);
    shape
}

fn build_object(
    desc: &ObjectDescription,
    textures: &mut TextureCache,
    failures: &mut Vec<TextureFailure>,
) -> SceneObject {
    match desc {
        ObjectDescription::Sphere {
            center,
            radius,
            material,
        } => Sphere::new(*center, *radius, build_material(material, textures, failures)).into(),
        ObjectDescription::Plane {
            position,
            normal,
            width,
            height,
            textured,
            material,
        } => {
            let material = build_material(material, textures, failures);
            let mut plane = Plane::new(*position, *normal, *width, *height, material);
            plane.textured = *textured;
            plane.into()
        }
        ObjectDescription::Torus(t) => Torus {
            shape: build_torus_shape(t, textures, failures),
        }
        .into(),
        ObjectDescription::TwistedTorus(t) => TwistedTorus {
            shape: build_torus_shape(t, textures, failures),
            twist: t.twist,
        }
        .into(),
        ObjectDescription::TwistedRepeatedTorus(t) => {
            let shape = build_torus_shape(t, textures, failures);
            let mut torus = TwistedRepeatedTorus::new(
                shape.position,
                shape.major_radius,
                shape.minor_radius,
                shape.material.clone(),
            )
            .with_twist(t.twist)
            .with_repeat_period(t.repeat_period);
            torus.shape = shape;
            torus.into()
        }
        ObjectDescription::Luminaire {
            center,
            intensity,
            radius,
        } => Luminaire::new(*center, *intensity, *radius).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    const SCENE: &str = r#"{
        "name": "test",
        "background": [0.1, 0.2, 0.3],
        "objects": [
            { "type": "sphere", "center": [0, 0, -10], "radius": 5,
              "material": { "diffuse": [1, 0, 0], "shininess": 500 } },
            { "type": "plane", "position": [0, -5, 0], "normal": [0, 1, 0],
              "textured": true, "material": { "texture": "no-such-texture.jpg" } },
            { "type": "twisted_repeated_torus", "position": [-4, -1.5, -25],
              "major_radius": 4, "minor_radius": 2, "twist": 0.35 },
            { "type": "luminaire", "center": [10, -5, -25], "intensity": 10 }
        ],
        "lights": [
            { "type": "point", "position": [0, 0, 5], "intensity": 500 },
            { "type": "cone", "position": [0, -20, -25], "direction": [0, -1, 0],
              "intensity": 500, "cutoff_degrees": 40, "falloff_exponent": 40 }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let _ = env_logger::builder().is_test(true).try_init();

        let desc = SceneDescription::from_json(SCENE).unwrap();
        assert_eq!(desc.objects.len(), 4);
        assert_eq!(desc.camera, CameraDescription::default());

        let built = desc.build(Some(&std::env::temp_dir()));
        let scene = &built.scene;

        let kinds: Vec<ObjectKind> = scene.objects().map(|(_, o)| o.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ObjectKind::Sphere,
                ObjectKind::Plane,
                ObjectKind::TwistedRepeatedTorus,
                ObjectKind::Luminaire
            ]
        );
        assert_eq!(scene.point_lights().len(), 1);
        assert_eq!(scene.cone_lights().len(), 1);
        assert_eq!(scene.background, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(scene.emitters().len(), 1);
    }

    #[test]
    fn test_missing_texture_is_reported_and_surface_untextured() {
        let built = SceneDescription::from_json(SCENE)
            .unwrap()
            .build(Some(&std::env::temp_dir()));

        assert_eq!(built.texture_failures.len(), 1);
        assert_eq!(built.texture_failures[0].path, "no-such-texture.jpg");

        let (plane_id, plane) = built.scene.objects().nth(1).unwrap();
        assert!(plane.material().texture.is_none());
        assert!(built.scene.surface_texture(plane_id).is_none());
        assert!(built.scene.check_textures().is_ok());
    }

    #[test]
    fn test_torus_fields_carried_over() {
        let built = SceneDescription::from_json(SCENE).unwrap().build(None);
        let (_, object) = built.scene.objects().nth(2).unwrap();
        match object {
            SceneObject::TwistedRepeatedTorus(t) => {
                assert_eq!(t.twist, 0.35);
                assert_eq!(t.shape.major_radius, 4.0);
                assert_eq!(t.shape.rotation_degrees(), DEFAULT_ROTATION_DEGREES);
                assert_eq!(t.repeat_period(), DEFAULT_REPEAT_PERIOD);
            }
            other => panic!("unexpected object {:?}", other.kind()),
        };
    }

    #[test]
    fn test_json_round_trip_preserves_description() {
        let desc = SceneDescription::from_json(SCENE).unwrap();
        let again = SceneDescription::from_json(&desc.to_json().unwrap()).unwrap();
        assert_eq!(desc, again);
    }

    #[test]
    fn test_rejects_unknown_object_type() {
        let err = SceneDescription::from_json(r#"{ "objects": [ { "type": "mesh" } ] }"#);
        assert!(matches!(err, Err(DescriptionError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneDescription::load("/definitely/not/here.json");
        assert!(matches!(err, Err(DescriptionError::Io { .. })));
    }
}
