//! Photon Viewport - interaction and per-frame driving of the renderer.
//!
//! [`App`] owns the scene, the photon map and the render cursor. A host
//! calls [`App::setup`] once, then [`App::tick`] every frame, and forwards
//! pointer and key input as [`InputEvent`]s. All drawing goes through a
//! [`photon_core::DrawSurface`]; [`RasterCanvas`] is an in-memory one.

mod app;
mod canvas;
mod controller;
mod mode;

pub use app::{App, AppConfig, InputEvent, ICON_NAMES, PANEL_HEIGHT};
pub use canvas::{RasterCanvas, TextLabel};
pub use controller::{Controller, ControllerConfig, DragTarget};
pub use mode::Mode;
