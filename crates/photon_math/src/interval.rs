/// A closed range of scalars.
///
/// Used for the forward hit range of a ray cast and for the rectangle the
/// light is allowed to be dragged within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// Unlike `f32::clamp` this never panics on an inverted interval; the
    /// upper bound wins.
    pub fn clamp(&self, x: f32) -> f32 {
        x.max(self.min).min(self.max)
    }
}
