//! Command line arguments.
//!
//! Flags are the last configuration layer: they override the JSON render
//! configuration, which overrides [`RenderConfig::default`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use umbra_renderer::{Algorithm, ConfigError, DepthOfField, RenderConfig};

/// Depth of field used when `--dof` is given without a configured lens.
pub const DEFAULT_FOCAL_DISTANCE: f32 = 37.0;
pub const DEFAULT_APERTURE: f32 = 0.3;
pub const DEFAULT_DOF_SAMPLES: u32 = 180;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmArg {
    /// Ray tracing with Phong shading
    Trace,
    /// Simplified path tracing with luminaires
    Path,
    /// Sphere tracing over signed distance fields
    March,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Trace => Algorithm::RayTrace,
            AlgorithmArg::Path => Algorithm::PathTrace,
            AlgorithmArg::March => Algorithm::RayMarch,
        }
    }
}

/// Offline CPU renderer: ray tracing, path tracing and ray marching.
#[derive(Parser, Debug, Clone)]
#[command(name = "umbra", version, about)]
pub struct Args {
    /// Scene description (JSON). A built-in demo scene is used when omitted
    #[arg(long, short, value_name = "PATH")]
    pub scene: Option<PathBuf>,

    /// Render configuration (JSON), applied before the flags below
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output PNG
    #[arg(long, short, value_name = "PATH", default_value = "render.png")]
    pub output: PathBuf,

    /// Write the scene description being rendered to a JSON file
    #[arg(long, value_name = "PATH")]
    pub write_scene: Option<PathBuf>,

    #[arg(long, short, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Enable hard shadows
    #[arg(long, conflicts_with = "no_shadows")]
    pub shadows: bool,

    /// Disable hard shadows
    #[arg(long)]
    pub no_shadows: bool,

    /// Maximum path tracing bounces
    #[arg(long, value_name = "N")]
    pub max_depth: Option<u32>,

    /// Paths averaged per pixel
    #[arg(long, value_name = "N")]
    pub path_samples: Option<u32>,

    /// Enable depth of field (ray tracing only)
    #[arg(long)]
    pub dof: bool,

    #[arg(long, value_name = "DISTANCE")]
    pub focal_distance: Option<f32>,

    /// Aperture radius
    #[arg(long, value_name = "RADIUS")]
    pub aperture: Option<f32>,

    #[arg(long, value_name = "N")]
    pub dof_samples: Option<u32>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Bucket edge in pixels
    #[arg(long, value_name = "PIXELS")]
    pub bucket_size: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j', value_name = "N")]
    pub threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    pub sequential: bool,
}

impl Args {
    fn wants_dof(&self) -> bool {
        self.dof || self.focal_distance.is_some() || self.aperture.is_some() || self.dof_samples.is_some()
    }

    /// Apply the flags on top of `config`.
    pub fn apply_to(&self, mut config: RenderConfig) -> Result<RenderConfig, ConfigError> {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.shadows {
            config.shadows = true;
        }
        if self.no_shadows {
            config.shadows = false;
        }
        if let Some(depth) = self.max_depth {
            config.max_path_depth = depth;
        }
        if let Some(samples) = self.path_samples {
            config.path_samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.bucket_size {
            config.bucket_size = size;
        }

        if self.wants_dof() {
            let base = config.depth_of_field;
            let dof = DepthOfField::try_new(
                self.focal_distance
                    .or(base.map(|d| d.focal_distance))
                    .unwrap_or(DEFAULT_FOCAL_DISTANCE),
                self.aperture
                    .or(base.map(|d| d.aperture_size))
                    .unwrap_or(DEFAULT_APERTURE),
                self.dof_samples
                    .or(base.map(|d| d.samples.get()))
                    .unwrap_or(DEFAULT_DOF_SAMPLES),
            )?;
            config.depth_of_field = Some(dof);
        }

        config.validate()?;
        Ok(config)
    }
}
