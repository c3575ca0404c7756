//! Umbra Renderer - CPU integrators over an umbra scene.
//!
//! Three interchangeable ways to colour a pixel:
//! - ray tracing with Phong shading, hard shadows and optional depth of field
//! - a simplified path tracer that sees luminaires directly
//! - sphere-traced ray marching over signed distance fields
//!
//! Rendering is either sequential ([`render`]) or split into buckets on the
//! rayon pool ([`render_parallel`]); both produce identical images.

mod bucket;
mod camera;
mod dof;
mod hit;
mod pathtrace;
mod raymarch;
mod raytrace;
mod renderer;
mod sampling;
mod shading;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult};
pub use camera::{Camera, PinholeCamera};
pub use dof::DepthOfField;
pub use hit::{closest_hit, closest_object, closest_surface, occluded, ClosestHit};
pub use pathtrace::{trace_path, PathSample, Termination};
pub use raymarch::{estimate_normal, march, march_color, scene_sdf, MarchConfig, MarchOutcome};
pub use raytrace::ray_color;
pub use renderer::{
    color_to_rgba, render, Algorithm, ConfigError, ImageBuffer, RenderConfig, RenderContext,
    RenderError, DEFAULT_BUCKET_SIZE,
};
pub use sampling::{gen_f32, random_in_cube};
pub use shading::{Occlusion, Shader};

/// Re-export common math types from umbra_math
pub use umbra_math::{Interval, Ray, Vec3};
