// Re-export glam for convenience
pub use glam::*;

// Photon math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{gated_sq_dist, reflect};
