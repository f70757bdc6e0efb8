//! Ray-object intersection and closest-hit selection.

use photon_core::{Geometry, ObjectId, Plane, Scene, Sphere};
use photon_math::{Interval, Ray, Vec3};

/// Farthest distance a cast can report.
pub const MAX_DISTANCE: f32 = 999_999.9;

/// `C` below this means the ray starts inside the sphere.
const INSIDE_EPSILON: f32 = 1e-5;

/// Record of the closest forward hit of a cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Object that was hit
    pub id: ObjectId,
    /// Ray parameter of the hit, in units of the ray direction's length
    pub distance: f32,
    /// World-space hit point, `origin + distance * direction`
    pub point: Vec3,
}

/// Trait for geometry that can be tested against a ray.
pub trait Intersect {
    /// Candidate ray parameter of the intersection.
    ///
    /// `None` means the ray cannot hit this object at all (it misses the
    /// sphere or runs parallel to the plane). A returned value may still be
    /// behind the origin; [`raytrace`] discards those.
    fn intersect(&self, ray: &Ray) -> Option<f32>;
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        // Sphere center in the ray origin's frame
        let s = self.center - ray.origin;
        let r = ray.direction;

        // A t^2 + B t + C = 0
        let a = r.dot(r);
        let b = -2.0 * s.dot(r);
        let c = s.dot(s) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant <= 0.0 {
            return None;
        }

        // From inside take the far root (the exit), otherwise the near one
        let sign = if c < -INSIDE_EPSILON { 1.0 } else { -1.0 };
        Some((-b + sign * discriminant.sqrt()) / (2.0 * a))
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let along = ray.direction[self.axis];
        if along.abs() <= f32::MIN_POSITIVE {
            return None;
        }
        Some((self.distance - ray.origin[self.axis]) / along)
    }
}

impl Intersect for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
        }
    }
}

/// Cast a ray against the whole scene and return the closest forward hit.
///
/// Objects are tested spheres first, then planes. A later object only wins
/// with a strictly smaller distance, so ties go to the earlier object.
pub fn raytrace(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut closest_so_far = MAX_DISTANCE;
    let mut nearest = None;

    for object in scene.objects() {
        let Some(t) = object.geometry.intersect(ray) else {
            continue;
        };
        if Interval::new(0.0, closest_so_far).surrounds(t) {
            closest_so_far = t;
            nearest = Some(object.id);
        }
    }

    nearest.map(|id| Hit {
        id,
        distance: closest_so_far,
        point: ray.at(closest_so_far),
    })
}
