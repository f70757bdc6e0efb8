//! Photon Core - scene model and drawing-surface interface.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Plane`, `Light`, `Material`
//! - **Drawing surface**: the `DrawSurface` trait the renderer draws through
//! - **Assets**: `AssetCache` holding the interface icons and their gray variants
//!
//! # Example
//!
//! ```ignore
//! use photon_core::{ObjectId, Scene};
//!
//! let mut scene = Scene::default();
//! if let Some(sphere) = scene.sphere_mut(0) {
//!     sphere.center.x += 0.1;
//! }
//! assert!(scene.object(ObjectId::plane(4)).is_some());
//! ```

pub mod asset;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use asset::{AssetCache, AssetError, AssetResult, GRAY_PREFIX};
pub use scene::{
    Color, Geometry, Light, Material, ObjectId, ObjectKind, Plane, Scene, SceneObject, Sphere,
};
pub use surface::{channel_to_u8, rgb_to_u8, DrawSurface, SurfaceError, SurfaceResult};
