//! Umbra Core - Scene data for the umbra renderer.
//!
//! This crate provides:
//!
//! - **Primitives**: spheres, plane patches, luminaires and the torus family
//! - **Materials and textures**: Phong materials, image textures with a cache
//! - **Lights**: point, cone and ambient lights
//! - **Scene arena**: [`Scene`] owns everything and hands out ids
//! - **Descriptions**: JSON scene files via [`SceneDescription`]
//!
//! # Example
//!
//! ```ignore
//! use umbra_core::SceneDescription;
//!
//! let built = SceneDescription::load("scenes/trace.json")?.build(None);
//! println!("{} objects", built.scene.object_count());
//! ```

pub mod description;
pub mod light;
pub mod material;
pub mod object;
pub mod plane;
pub mod scene;
pub mod sphere;
pub mod texture;
pub mod torus;

// Re-export commonly used types
pub use description::{BuiltScene, CameraDescription, DescriptionError, SceneDescription};
pub use light::{AmbientLight, ConeLight, PointLight};
pub use material::{colors, Color, Material};
pub use object::{Capability, Intersect, ObjectKind, SceneObject, SignedDistance, SurfaceHit};
pub use plane::Plane;
pub use scene::{ObjectId, Scene, SceneError};
pub use sphere::{Luminaire, Sphere};
pub use texture::{Texture, TextureCache, TextureError, TextureId};
pub use torus::{Torus, TwistedRepeatedTorus, TwistedTorus};
