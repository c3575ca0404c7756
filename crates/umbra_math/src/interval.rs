/// A closed range of scalars `[min, max]`.
///
/// Used both for ray-parameter search windows and for clamping colour
/// channels at the final pixel write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The range used for primary and secondary hit searches.
    ///
    /// The lower bound keeps a ray from re-hitting the surface it left.
    pub fn forward(min: f32) -> Interval {
        Interval::new(min, f32::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Returns a copy with `max` replaced, used to shrink the search range
    /// as closer hits are found.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// The representable colour range.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
