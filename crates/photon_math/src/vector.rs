//! Small vector helpers shared by the renderer and the interaction layer.

use crate::Vec3;

/// Gated squared distance between two points.
///
/// Returns `None` as soon as the partial sum over the axes seen so far exceeds
/// `sq_radius`, so most far-away points are rejected after a single axis.
/// Otherwise returns the full squared distance.
#[inline]
pub fn gated_sq_dist(a: Vec3, b: Vec3, sq_radius: f32) -> Option<f32> {
    let c = a.x - b.x;
    let mut d = c * c;
    if d > sq_radius {
        return None;
    }
    let c = a.y - b.y;
    d += c * c;
    if d > sq_radius {
        return None;
    }
    let c = a.z - b.z;
    d += c * c;
    if d > sq_radius {
        return None;
    }
    Some(d)
}

/// Mirror `direction` about the surface normal `n`.
///
/// The result is normalized: r' = normalize(r - 2 (r . n) n)
#[inline]
pub fn reflect(direction: Vec3, n: Vec3) -> Vec3 {
    (direction - n * (2.0 * direction.dot(n))).normalize()
}
