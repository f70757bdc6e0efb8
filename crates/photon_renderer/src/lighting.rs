//! Direct lighting: surface normals, diffuse + ambient, shadow rays.

use photon_core::{Color, Geometry, ObjectId, Plane, Scene, SceneObject, Sphere};
use photon_math::{Ray, Vec3};

use crate::raytrace;

/// Trait for geometry with a well-defined normal at a surface point.
pub trait SurfaceNormal {
    /// Unit normal at `point`.
    ///
    /// `reference` picks the side for one-sided surfaces: plane normals point
    /// toward it. Sphere normals always point outward.
    fn normal_at(&self, point: Vec3, reference: Vec3) -> Vec3;
}

impl SurfaceNormal for Sphere {
    fn normal_at(&self, point: Vec3, _reference: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}

impl SurfaceNormal for Plane {
    fn normal_at(&self, _point: Vec3, reference: Vec3) -> Vec3 {
        let mut n = Vec3::ZERO;
        n[self.axis] = reference[self.axis] - self.distance;
        // a reference lying on the plane has no side
        n.normalize_or_zero()
    }
}

impl SurfaceNormal for Geometry {
    fn normal_at(&self, point: Vec3, reference: Vec3) -> Vec3 {
        match self {
            Geometry::Sphere(sphere) => sphere.normal_at(point, reference),
            Geometry::Plane(plane) => plane.normal_at(point, reference),
        }
    }
}

/// Normal of the object `id` at `point`, zero for an unknown handle.
pub fn surface_normal(scene: &Scene, id: ObjectId, point: Vec3, reference: Vec3) -> Vec3 {
    scene
        .object(id)
        .map(|object| object.geometry.normal_at(point, reference))
        .unwrap_or(Vec3::ZERO)
}

/// Lambert cosine between `normal` and the direction from `point` to the light.
#[inline]
pub fn light_diffuse(normal: Vec3, point: Vec3, light: Vec3) -> f32 {
    normal.dot((light - point).normalize())
}

/// Diffuse intensity of `object` at `point`, floored at `ambient` and capped at 1.
pub fn light_object(object: &SceneObject, point: Vec3, light: Vec3, ambient: f32) -> f32 {
    let n = object.geometry.normal_at(point, light);
    light_diffuse(n, point, light).max(ambient).min(1.0)
}

/// Shade a visible point with the point light.
///
/// A ray is cast from the light toward the point. If it first hits some
/// other object the point is in shadow and only `ambient` is used. The gray
/// intensity is then clipped by the object's material filter.
pub fn direct_lighting(scene: &Scene, id: ObjectId, point: Vec3, ambient: f32) -> Color {
    let Some(object) = scene.object(id) else {
        return Color::ZERO;
    };

    let light = scene.light.position;
    let shadow_ray = Ray::new(light, point - light);

    let intensity = match raytrace(scene, &shadow_ray) {
        Some(blocker) if blocker.id != id => ambient,
        _ => light_object(object, point, light, ambient),
    };

    object.material.filter(Color::splat(intensity))
}
