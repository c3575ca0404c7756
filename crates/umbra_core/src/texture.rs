//! Texture loading and storage for textured surfaces.
//!
//! Textures live in an arena owned by the scene. Materials refer to them by
//! [`TextureId`], so a surface never dereferences a texture that failed to
//! load: it simply has no id and shades with its intrinsic colour.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::material::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture has no pixels: {0}")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Index of a texture in a [`TextureCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// A decoded texture.
///
/// Pixels are stored as RGB colours in the 0-1 range, row-major with row 0
/// at the top of the image.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// Fails when the image has no pixels or the buffer does not match the
    /// dimensions.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::LoadError(format!(
                "{}: expected {} pixels, got {}",
                path,
                width as usize * height as usize,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a solid colour texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Nearest-pixel lookup at normalized coordinates, wrapping outside [0, 1).
    ///
    /// Column is `round(u * width - 0.5) mod width`, row likewise with `v`.
    pub fn lookup(&self, u: f32, v: f32) -> Color {
        let i = wrap_index(u, self.width);
        let j = wrap_index(v, self.height);
        self.color_at(i, j)
    }

    /// Get pixel at integer coordinates.
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Map a normalized coordinate to a pixel index with Euclidean wrapping.
fn wrap_index(coord: f32, extent: u32) -> u32 {
    let scaled = (coord * extent as f32 - 0.5).round();
    if !scaled.is_finite() {
        return 0;
    }
    (scaled as i64).rem_euclid(extent as i64) as u32
}

/// Arena of loaded textures.
///
/// Textures are loaded once per path and addressed by [`TextureId`].
#[derive(Default)]
pub struct TextureCache {
    textures: Vec<Texture>,

    /// Ids by the path they were requested with
    by_path: HashMap<String, TextureId>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Default::default()
        }
    }

    /// Set the base directory for resolving relative paths.
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = Some(base_dir.into());
    }

    /// Load a texture from file, reusing the id if the path was loaded before.
    pub fn load(&mut self, path: &str) -> TextureResult<TextureId> {
        if let Some(id) = self.by_path.get(path) {
            return Ok(*id);
        }

        let full_path = self.resolve_path(path);
        let texture = load_texture_file(&full_path)?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        let id = self.insert(texture);
        self.by_path.insert(path.to_string(), id);
        Ok(id)
    }

    /// Add an already decoded texture.
    pub fn insert(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.textures.len());
        self.textures.push(texture);
        id
    }

    /// Get a texture by id.
    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0)
    }

    /// Get the number of textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Decode an image file into a texture.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => TextureError::Io(io),
        other => TextureError::ImageError(other),
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels: Vec<Color> = rgb
        .pixels()
        .map(|p| {
            Color::new(
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
            )
        })
        .collect();

    Texture::new(width, height, pixels, path.to_string_lossy())
}
