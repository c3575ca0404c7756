//! Phong surface description shared by every scene object.

use umbra_math::Vec3;

use crate::texture::TextureId;

/// Colour type alias (RGB channels, 0-1 at output, unbounded while accumulating).
pub type Color = Vec3;

/// Named colours used by the demo scenes and defaults.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::ZERO;
    pub const WHITE: Color = Color::ONE;
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);
    pub const LIGHT_GREY: Color = Color::new(0.827, 0.827, 0.827);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const AQUAMARINE: Color = Color::new(0.498, 1.0, 0.831);
    pub const PALE_GREEN: Color = Color::new(0.596, 0.984, 0.596);
    pub const LIGHT_CORAL: Color = Color::new(0.941, 0.502, 0.502);
    pub const DARK_OLIVE_GREEN: Color = Color::new(0.333, 0.420, 0.184);
}

/// Surface material for Phong shading.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse (Lambertian) colour
    pub diffuse: Color,

    /// Specular highlight colour
    pub specular: Color,

    /// Specular exponent
    pub shininess: f32,

    /// Diffuse texture, looked up only by textured planes
    pub texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: colors::GREY,
            specular: colors::LIGHT_GREY,
            shininess: 100.0,
            texture: None,
        }
    }
}

impl Material {
    /// Create a material with a diffuse colour and specular exponent.
    pub fn new(diffuse: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            shininess,
            ..Default::default()
        }
    }

    /// Replace the specular colour.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    /// Attach a texture.
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }
}
