use crate::Vec3;

/// A ray in 3D space: an origin and a direction.
///
/// The direction is not normalized on construction. Primary rays keep their
/// image-plane length so hit distances can be turned back into points with
/// [`Ray::at`]; bounced rays are normalized by [`crate::reflect`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
