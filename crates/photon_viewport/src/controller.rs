//! Pointer interaction: picking and dragging spheres or the light.

use photon_core::Scene;
use photon_math::{gated_sq_dist, Interval, Vec2, Vec3};

use crate::Mode;

/// Interaction tuning.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Screen pixels per world unit when dragging
    pub drag_scale: f32,
    /// Allowed light x after a drag
    pub light_x: Interval,
    /// Allowed light y after a drag
    pub light_y: Interval,
    /// Right edge of each mode button zone in the panel
    pub button_edges: [f32; 3],
    /// Height of the image area; presses below it hit the panel
    pub image_size: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            drag_scale: 130.0,
            light_x: Interval::new(-1.4, 1.4),
            light_y: Interval::new(-0.4, 1.2),
            button_edges: [230.0, 283.0, 513.0],
            image_size: 512,
        }
    }
}

impl ControllerConfig {
    pub fn with_image_size(mut self, image_size: u32) -> Self {
        self.image_size = image_size;
        self
    }
}

/// What a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Sphere(usize),
    Light,
}

/// Tracks the pointer between press, drag and release.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    last_pointer: Option<Vec2>,
    target: Option<DragTarget>,
    dragging: bool,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            last_pointer: None,
            target: None,
            dragging: false,
        }
    }

    /// Target of the next drag, `None` until the first press.
    pub fn target(&self) -> Option<DragTarget> {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pick the drag target under the pointer.
    ///
    /// The pointer is lifted onto the plane at the spheres' average depth.
    /// A sphere is picked when its squared distance to that point is within
    /// the radius (not the radius squared). Anything else grabs the light.
    pub fn pick(&self, scene: &Scene, x: f32, y: f32) -> DragTarget {
        let half = self.config.image_size as f32 / 2.0;
        let s = self.config.drag_scale;

        let count = scene.sphere_count().max(1) as f32;
        let depth = scene.spheres().map(|sphere| sphere.center.z).sum::<f32>() / count;
        let pointer = Vec3::new((x - half) / s, -(y - half) / s, depth);

        scene
            .spheres()
            .position(|sphere| gated_sq_dist(pointer, sphere.center, sphere.radius).is_some())
            .map_or(DragTarget::Light, DragTarget::Sphere)
    }

    /// Pointer went down at (`x`, `y`).
    ///
    /// Returns the mode to switch to when the press lands on the panel.
    pub fn pointer_pressed(&mut self, scene: &Scene, x: f32, y: f32) -> Option<Mode> {
        let target = self.pick(scene, x, y);
        log::debug!("Pointer pressed at ({x}, {y}), target {target:?}");
        self.target = Some(target);

        if y > self.config.image_size as f32 {
            Mode::from_button_x(x, &self.config.button_edges)
        } else {
            None
        }
    }

    /// Pointer moved to (`x`, `y`) with the button held.
    ///
    /// Returns true if the scene changed. The first drag after a press only
    /// records the position.
    pub fn pointer_dragged(&mut self, scene: &mut Scene, x: f32, y: f32) -> bool {
        let pointer = Vec2::new(x, y);
        let moved = match (self.last_pointer, self.target) {
            (Some(last), Some(target)) => {
                self.apply_drag(scene, target, (pointer - last) / self.config.drag_scale);
                true
            }
            _ => false,
        };

        self.last_pointer = Some(pointer);
        self.dragging = true;
        moved
    }

    /// Pointer went up.
    pub fn pointer_released(&mut self) {
        self.last_pointer = None;
        self.dragging = false;
    }

    fn apply_drag(&self, scene: &mut Scene, target: DragTarget, delta: Vec2) {
        match target {
            DragTarget::Sphere(index) => {
                if let Some(sphere) = scene.sphere_mut(index) {
                    sphere.center.x += delta.x;
                    sphere.center.y -= delta.y;
                }
            }
            DragTarget::Light => {
                let light = &mut scene.light.position;
                light.x = self.config.light_x.clamp(light.x + delta.x);
                light.y = self.config.light_y.clamp(light.y - delta.y);
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
