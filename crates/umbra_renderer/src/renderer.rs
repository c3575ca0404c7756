//! Render configuration and the per-pixel render loop.
//!
//! Implements three interchangeable integrators over one scene:
//! - Ray tracing with Phong shading and hard shadows, optionally with depth of field
//! - Simplified path tracing with luminaires
//! - Ray marching over signed distance fields

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use umbra_core::{Capability, Color, Scene, SceneError};
use umbra_math::Interval;

use crate::camera::Camera;
use crate::dof::DepthOfField;
use crate::pathtrace::trace_path;
use crate::raymarch::{march_color, MarchConfig};
use crate::raytrace::ray_color;
use crate::sampling::pixel_rng;
use crate::shading::{Occlusion, Shader};

/// Default tile edge for the bucket renderer.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Errors detected before any pixel is rendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("focal distance must be positive, got {0}")]
    NonPositiveFocalDistance(f32),

    #[error("aperture size must be non-negative, got {0}")]
    NegativeAperture(f32),

    #[error("depth of field needs at least one sample")]
    ZeroDofSamples,

    #[error("march bound {name} must be finite and positive, got {value}")]
    InvalidMarchBound { name: &'static str, value: f32 },

    #[error("march step count must be non-zero")]
    ZeroSteps,

    #[error("path tracing needs at least one sample per pixel")]
    ZeroPathSamples,

    #[error("bucket size must be non-zero")]
    ZeroBucketSize,
}

/// Reasons a render cannot start.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scene cannot be rendered: {0}")]
    Scene(#[from] SceneError),
}

/// Integration algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    RayTrace,
    PathTrace,
    RayMarch,
}

impl Algorithm {
    /// What every scene object must support for this algorithm.
    pub fn required_capability(self) -> Capability {
        match self {
            Algorithm::RayTrace | Algorithm::PathTrace => Capability::Intersect,
            Algorithm::RayMarch => Capability::SignedDistance,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::RayTrace => "ray trace",
            Algorithm::PathTrace => "path trace",
            Algorithm::RayMarch => "ray march",
        };
        f.write_str(name)
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub algorithm: Algorithm,
    /// Hard shadows for the ray tracer and ray marcher
    pub shadows: bool,
    /// Maximum path tracing bounces
    pub max_path_depth: u32,
    /// Paths averaged per pixel
    pub path_samples: u32,
    /// Thin-lens blur, ray tracing only
    pub depth_of_field: Option<DepthOfField>,
    pub march: MarchConfig,
    /// Base seed for the per-pixel generators
    pub seed: u64,
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            algorithm: Algorithm::default(),
            shadows: true,
            max_path_depth: 10,
            path_samples: 1,
            depth_of_field: None,
            march: MarchConfig::default(),
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn with_depth_of_field(mut self, dof: DepthOfField) -> Self {
        self.depth_of_field = Some(dof);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.path_samples == 0 {
            return Err(ConfigError::ZeroPathSamples);
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::ZeroBucketSize);
        }
        if let Some(dof) = &self.depth_of_field {
            dof.validate()?;
        }
        self.march.validate()
    }

    fn occlusion(&self) -> Occlusion {
        match (self.shadows, self.algorithm) {
            (false, _) => Occlusion::None,
            (true, Algorithm::RayMarch) => Occlusion::Marched(self.march),
            (true, _) => Occlusion::Analytic,
        }
    }
}

/// A validated scene, camera and configuration, ready to render pixels.
pub struct RenderContext<'a> {
    scene: &'a Scene,
    camera: &'a dyn Camera,
    config: &'a RenderConfig,
    shader: Shader<'a>,
}

impl<'a> RenderContext<'a> {
    /// Validate the configuration and check that every object supports
    /// what the chosen algorithm needs.
    pub fn new(scene: &'a Scene, camera: &'a dyn Camera, config: &'a RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        scene.require(config.algorithm.required_capability())?;

        if let Err(err) = scene.check_textures() {
            log::warn!("{}; affected surfaces render untextured", err);
        }
        if config.depth_of_field.is_some() && config.algorithm != Algorithm::RayTrace {
            log::warn!("Depth of field only applies to ray tracing, ignoring it for {}", config.algorithm);
        }

        Ok(Self {
            scene,
            camera,
            config,
            shader: Shader::new(scene, camera.position(), config.occlusion()),
        })
    }

    /// Colour of pixel `(x, y)`, row 0 at the top.
    pub fn render_pixel(&self, x: u32, y: u32) -> Color {
        let config = self.config;
        let u = (x as f32 + 0.5) / config.width as f32;
        let v = (y as f32 + 0.5) / config.height as f32;
        let mut rng = pixel_rng(config.seed, x, y);

        match config.algorithm {
            Algorithm::RayTrace => match &config.depth_of_field {
                Some(dof) => dof.sample(self.scene, self.camera, u, v, &self.shader, &mut rng),
                None => ray_color(self.scene, &self.camera.generate_ray(u, v), &self.shader),
            },
            Algorithm::PathTrace => {
                let ray = self.camera.generate_ray(u, v);
                let mut color = Color::ZERO;
                for _ in 0..config.path_samples {
                    color += trace_path(self.scene, &ray, &self.shader, config.max_path_depth, &mut rng).color;
                }
                color / config.path_samples as f32
            }
            Algorithm::RayMarch => {
                let ray = self.camera.generate_ray(u, v);
                march_color(self.scene, &ray, &self.shader, &config.march)
            }
        }
    }
}

/// Convert a colour to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Render the entire scene row by row on the calling thread.
pub fn render(scene: &Scene, camera: &dyn Camera, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    let context = RenderContext::new(scene, camera, config)?;
    log::info!("Rendering {}x{} ({})", config.width, config.height, config.algorithm);
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.width, config.height);
    for y in 0..config.height {
        for x in 0..config.width {
            image.set(x, y, context.render_pixel(x, y));
        }
    }

    log::info!("Render time: {:.2?}", start.elapsed());
    Ok(image)
}
