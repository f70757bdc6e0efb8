//! Photon emission, per-object storage and radius gathering.
//!
//! Photons are shot from a point light spread over a small half-sphere,
//! bounced through the scene and stored on every surface they hit. Each
//! stored photon is paired with a "shadow photon" of negative energy placed
//! on the next surface along the same direction, which darkens regions the
//! light cannot see directly when photons are gathered.

use std::collections::HashMap;

use photon_core::{Color, ObjectId, Scene};
use photon_math::{gated_sq_dist, reflect, Ray, Vec2, Vec3};
use rand::{Rng, RngCore};

use crate::{raytrace, surface_normal};

/// Photon mapping configuration.
#[derive(Debug, Clone)]
pub struct PhotonConfig {
    /// Photons emitted per pass
    pub photon_count: usize,
    /// Emission multiplier used by the scatter view
    pub scatter_multiplier: usize,
    /// Bounces traced per photon
    pub max_bounces: u32,
    /// Squared gather radius around a shaded point
    pub sq_radius: f32,
    /// Number of photons integrated at the brightest pixel
    pub exposure: f32,
    /// Energy of a shadow photon (negative)
    pub shadow_energy: f32,
    /// Offset past a hit before tracing the shadow photon
    pub shadow_bump: f32,
    /// Radius of the emitter spread around the light
    pub emitter_radius: f32,
    /// Emitter origins outside |x|, |y| of this are discarded
    pub emitter_bounds: Vec2,
}

impl Default for PhotonConfig {
    fn default() -> Self {
        Self {
            photon_count: 1000,
            scatter_multiplier: 3,
            max_bounces: 4,
            sq_radius: 0.7,
            exposure: 50.0,
            shadow_energy: -0.25,
            shadow_bump: 1e-5,
            emitter_radius: 0.75,
            emitter_bounds: Vec2::new(1.5, 1.2),
        }
    }
}

impl PhotonConfig {
    /// Set the number of photons per pass.
    pub fn with_photon_count(mut self, photon_count: usize) -> Self {
        self.photon_count = photon_count;
        self
    }

    /// Number of photons to emit for one pass.
    pub fn emission_count(&self, scatter_view: bool) -> usize {
        if scatter_view {
            self.photon_count * self.scatter_multiplier
        } else {
            self.photon_count
        }
    }
}

/// A stored photon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    /// Where the photon landed
    pub location: Vec3,
    /// Direction it was travelling when it landed (unit length)
    pub direction: Vec3,
    /// Carried RGB energy; negative for shadow photons
    pub energy: Color,
}

/// Counters of one emission pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub emitted: usize,
    pub discarded: usize,
    pub stored: usize,
    pub shadows: usize,
}

/// Photons bucketed by the object they landed on.
#[derive(Debug, Clone)]
pub struct PhotonMap {
    config: PhotonConfig,
    buckets: HashMap<ObjectId, Vec<Photon>>,
}

impl PhotonMap {
    /// Create an empty photon map.
    pub fn new(config: PhotonConfig) -> Self {
        Self {
            config,
            buckets: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PhotonConfig {
        &self.config
    }

    /// Drop every stored photon, keeping bucket allocations.
    pub fn clear(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
    }

    /// Append a photon to the bucket of `id`.
    pub fn store(&mut self, id: ObjectId, photon: Photon) {
        self.buckets.entry(id).or_default().push(photon);
    }

    /// Photons stored on one object, in storage order.
    pub fn photons(&self, id: ObjectId) -> &[Photon] {
        self.buckets.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of photons stored on one object.
    pub fn count(&self, id: ObjectId) -> usize {
        self.photons(id).len()
    }

    /// Number of photons stored over all objects.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Rebuild the map from scratch by emitting `count` photons.
    ///
    /// `on_photon` sees every lit photon as it is stored (shadow photons are
    /// not reported), which is how the scatter view draws the pass.
    pub fn emit<F>(
        &mut self,
        scene: &Scene,
        count: usize,
        rng: &mut dyn RngCore,
        mut on_photon: F,
    ) -> EmitStats
    where
        F: FnMut(&Photon),
    {
        self.clear();

        let mut stats = EmitStats {
            emitted: count,
            ..Default::default()
        };
        let light = scene.light.position;
        let max_bounces = self.config.max_bounces;

        for _ in 0..count {
            let mut bounces: u32 = 1;
            let mut rgb = Color::ONE;
            let direction = random_direction(rng);
            let origin = self.emitter_origin(light, rng);

            if self.outside_emitter(scene, origin) {
                bounces = max_bounces + 1;
                stats.discarded += 1;
            }

            let mut ray = Ray::new(origin, direction);
            let mut hit = raytrace(scene, &ray);

            while let Some(h) = hit {
                if bounces > max_bounces {
                    break;
                }

                let material = scene.material(h.id);
                rgb = material.filter(rgb) * (1.0 / (bounces as f32).sqrt());

                let photon = Photon {
                    location: h.point,
                    direction: ray.direction,
                    energy: rgb,
                };
                self.store(h.id, photon);
                on_photon(&photon);
                stats.stored += 1;

                if self.shadow_photon(scene, &ray, h.point) {
                    stats.shadows += 1;
                }

                // normal faces where the photon came from
                let n = surface_normal(scene, h.id, h.point, ray.origin);
                ray = Ray::new(h.point, reflect(ray.direction, n));
                hit = raytrace(scene, &ray);
                bounces += 1;
            }
        }

        log::info!(
            "Emitted {} photons: {} stored, {} shadow, {} discarded at the emitter",
            stats.emitted,
            stats.stored,
            stats.shadows,
            stats.discarded
        );

        stats
    }

    /// Store a negative-energy photon on the next surface past `point`.
    ///
    /// Returns false when nothing lies beyond the point.
    fn shadow_photon(&mut self, scene: &Scene, ray: &Ray, point: Vec3) -> bool {
        let bumped = point + ray.direction * self.config.shadow_bump;
        let beyond = Ray::new(bumped, ray.direction);

        match raytrace(scene, &beyond) {
            Some(shadow) => {
                self.store(
                    shadow.id,
                    Photon {
                        location: shadow.point,
                        direction: ray.direction,
                        energy: Color::splat(self.config.shadow_energy),
                    },
                );
                true
            }
            None => false,
        }
    }

    /// Random emission origin on a half-sphere below the light.
    fn emitter_origin(&self, light: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let mut origin = light;
        while origin.y >= light.y {
            origin = light + random_direction(rng) * self.config.emitter_radius;
        }
        origin
    }

    /// Origins outside the room or inside the first sphere emit nothing.
    fn outside_emitter(&self, scene: &Scene, origin: Vec3) -> bool {
        let bounds = self.config.emitter_bounds;
        if origin.x.abs() > bounds.x || origin.y.abs() > bounds.y {
            return true;
        }
        scene
            .sphere(0)
            .is_some_and(|s| gated_sq_dist(origin, s.center, s.radius * s.radius).is_some())
    }

    /// Photon energy gathered around `point` on object `id`.
    ///
    /// Every photon of that object within the gather radius contributes its
    /// energy weighted by how squarely it hit the surface and by how close it
    /// landed. Shadow photons subtract through the same sum.
    pub fn gather(&self, scene: &Scene, point: Vec3, id: ObjectId) -> Color {
        let n = surface_normal(scene, id, point, Vec3::ZERO);
        let mut energy = Color::ZERO;

        for photon in self.photons(id) {
            let Some(sq_dist) = gated_sq_dist(point, photon.location, self.config.sq_radius)
            else {
                continue;
            };
            let mut weight = (-n.dot(photon.direction)).max(0.0);
            weight *= (1.0 - sq_dist.sqrt()) / self.config.exposure;
            energy += photon.energy * weight;
        }

        energy
    }
}

impl Default for PhotonMap {
    fn default() -> Self {
        Self::new(PhotonConfig::default())
    }
}

/// Normalized direction from a point drawn uniformly in the [-1, 1) cube.
fn random_direction(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.length_squared() > 1e-12 {
            return v.normalize();
        }
    }
}
