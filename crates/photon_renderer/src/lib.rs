//! Photon Renderer - CPU ray tracing with stochastic photon mapping.
//!
//! Two lighting paths share one intersection engine:
//! - direct diffuse + ambient shading with a shadow ray to the point light
//! - density estimation over photons emitted from the light and bounced
//!   through the scene
//!
//! Frames are produced progressively by [`RenderCursor`], coarse cells first.

mod intersect;
mod lighting;
mod photon_map;
mod renderer;
mod scheduler;

pub use intersect::{raytrace, Hit, Intersect, MAX_DISTANCE};
pub use lighting::{direct_lighting, light_diffuse, light_object, surface_normal, SurfaceNormal};
pub use photon_map::{EmitStats, Photon, PhotonConfig, PhotonMap};
pub use renderer::{
    color_to_rgb, compute_pixel_color, primary_ray, render_tick, Lighting, RenderConfig,
};
pub use scheduler::{needs_drawing, Cell, RenderCursor};

/// Re-export Vec3 and common types from the math and core crates
pub use photon_core::{Color, ObjectId, Scene};
pub use photon_math::{Ray, Vec3};
