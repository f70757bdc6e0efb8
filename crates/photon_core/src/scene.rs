//! Scene model for the photon renderer.
//!
//! A scene is a handful of spheres and axis-aligned planes lit by a single
//! point light. Geometry is value data owned by [`Scene`]; the renderer only
//! reads it. Spheres and the light are mutable so they can be dragged around.

use photon_math::Vec3;

/// Color type alias (RGB values typically 0-1, but never clamped here)
pub type Color = Vec3;

/// The two kinds of geometry a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Sphere,
    Plane,
}

/// Stable handle of a scene object: its kind plus its index within that kind.
///
/// Handles are assigned when the scene is built and never change, so they can
/// key per-object storage such as photon buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub kind: ObjectKind,
    pub index: usize,
}

impl ObjectId {
    pub const fn sphere(index: usize) -> Self {
        Self {
            kind: ObjectKind::Sphere,
            index,
        }
    }

    pub const fn plane(index: usize) -> Self {
        Self {
            kind: ObjectKind::Plane,
            index,
        }
    }
}

/// A sphere: center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

/// An axis-aligned plane: every point whose `axis` component equals `distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// 0 = X, 1 = Y, 2 = Z
    pub axis: usize,
    /// Signed distance from the origin along `axis`
    pub distance: f32,
}

impl Plane {
    pub fn new(axis: usize, distance: f32) -> Self {
        debug_assert!(axis < 3, "plane axis out of range: {axis}");
        Self {
            axis: axis.min(2),
            distance,
        }
    }
}

/// Closed union of the supported geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
}

/// Surface response of an object.
///
/// `filter` is the RGB mask incoming light is clipped against (a red wall
/// absorbs green and blue). A `mirror` surface reflects primary rays instead
/// of being shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub filter: Color,
    pub mirror: bool,
}

impl Material {
    /// Passes all light through.
    pub const WHITE: Material = Material::diffuse(Vec3::ONE);
    /// Green-only wall.
    pub const GREEN: Material = Material::diffuse(Vec3::new(0.0, 1.0, 0.0));
    /// Red-only wall.
    pub const RED: Material = Material::diffuse(Vec3::new(1.0, 0.0, 0.0));
    /// Perfect mirror with a white filter.
    pub const MIRROR: Material = Material {
        filter: Vec3::ONE,
        mirror: true,
    };

    pub const fn diffuse(filter: Color) -> Self {
        Self {
            filter,
            mirror: false,
        }
    }

    /// Channel-wise minimum of the incoming light and the material mask.
    #[inline]
    pub fn filter(&self, rgb: Color) -> Color {
        rgb.min(self.filter)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
}

impl Light {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// One object of the scene with its handle and material.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub geometry: Geometry,
    pub material: Material,
}

/// The complete scene.
///
/// Objects are stored spheres first, then planes, each in ascending index
/// order. Ray casts iterate them in this order, which is what breaks ties
/// between equally distant hits.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
    sphere_count: usize,
    pub light: Light,
}

impl Scene {
    /// Build a scene. Handles are assigned from the position in each list.
    pub fn new(
        spheres: Vec<(Sphere, Material)>,
        planes: Vec<(Plane, Material)>,
        light: Light,
    ) -> Self {
        let sphere_count = spheres.len();
        let mut objects = Vec::with_capacity(spheres.len() + planes.len());

        for (index, (sphere, material)) in spheres.into_iter().enumerate() {
            objects.push(SceneObject {
                id: ObjectId::sphere(index),
                geometry: Geometry::Sphere(sphere),
                material,
            });
        }
        for (index, (plane, material)) in planes.into_iter().enumerate() {
            objects.push(SceneObject {
                id: ObjectId::plane(index),
                geometry: Geometry::Plane(plane),
                material,
            });
        }

        Self {
            objects,
            sphere_count,
            light,
        }
    }

    /// The box the interactive view starts with: two spheres (the second a
    /// mirror) inside five walls, green on the right and red on the left.
    pub fn cornell_box() -> Self {
        Self::new(
            vec![
                (Sphere::new(Vec3::new(1.0, 0.0, 4.0), 0.5), Material::WHITE),
                (Sphere::new(Vec3::new(-0.6, -1.0, 4.5), 0.5), Material::MIRROR),
            ],
            vec![
                (Plane::new(0, 1.5), Material::GREEN),
                (Plane::new(1, -1.5), Material::WHITE),
                (Plane::new(0, -1.5), Material::RED),
                (Plane::new(1, 1.5), Material::WHITE),
                (Plane::new(2, 5.0), Material::WHITE),
            ],
            Light::new(Vec3::new(0.0, 1.2, 3.75)),
        )
    }

    /// All objects, spheres first.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up an object by handle.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        let slot = match id.kind {
            ObjectKind::Sphere if id.index < self.sphere_count => id.index,
            ObjectKind::Plane => self.sphere_count + id.index,
            ObjectKind::Sphere => return None,
        };
        self.objects.get(slot)
    }

    /// Material of an object; unknown handles pass light through.
    pub fn material(&self, id: ObjectId) -> Material {
        self.object(id).map(|o| o.material).unwrap_or_default()
    }

    pub fn sphere_count(&self) -> usize {
        self.sphere_count
    }

    pub fn sphere(&self, index: usize) -> Option<&Sphere> {
        match self.objects[..self.sphere_count].get(index)?.geometry {
            Geometry::Sphere(ref sphere) => Some(sphere),
            Geometry::Plane(_) => None,
        }
    }

    pub fn sphere_mut(&mut self, index: usize) -> Option<&mut Sphere> {
        match self.objects[..self.sphere_count].get_mut(index)?.geometry {
            Geometry::Sphere(ref mut sphere) => Some(sphere),
            Geometry::Plane(_) => None,
        }
    }

    /// Iterate over the spheres in index order.
    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> + '_ {
        self.objects[..self.sphere_count]
            .iter()
            .filter_map(|o| match &o.geometry {
                Geometry::Sphere(sphere) => Some(sphere),
                Geometry::Plane(_) => None,
            })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::cornell_box()
    }
}
