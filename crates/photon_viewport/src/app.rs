//! Application state and the per-frame driver.
//!
//! The host owns the window and the event loop. It calls [`App::setup`]
//! once, [`App::tick`] every frame and [`App::handle_event`] for input.

use photon_core::{DrawSurface, Scene, SurfaceResult, GRAY_PREFIX};
use photon_renderer::{
    color_to_rgb, render_tick, EmitStats, Lighting, Photon, PhotonConfig, PhotonMap, RenderConfig,
    RenderCursor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Controller, ControllerConfig, Mode};

/// Height of the interface strip below the image.
pub const PANEL_HEIGHT: u32 = 48;

/// Button icons, in mode order.
pub const ICON_NAMES: [&str; 3] = ["1_32.png", "2_32.png", "3_32.png"];

const PANEL_BACKGROUND: [f32; 3] = [221.0, 221.0, 204.0];
const DIMMED_TEXT: f32 = 160.0;
const BUTTON_X: [i32; 3] = [198, 240, 282];
const BUTTON_SIZE: i32 = 33;

/// Everything needed to start an [`App`].
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub photons: PhotonConfig,
    pub controller: ControllerConfig,
    pub mode: Mode,
    /// Fixed RNG seed; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Set the image size for rendering and picking alike.
    pub fn with_image_size(mut self, image_size: u32) -> Self {
        self.render = self.render.with_image_size(image_size);
        self.controller = self.controller.with_image_size(self.render.image_size);
        self
    }

    pub fn with_photon_count(mut self, photon_count: usize) -> Self {
        self.photons = self.photons.with_photon_count(photon_count);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Input the host forwards to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { x: f32, y: f32 },
    PointerDragged { x: f32, y: f32 },
    PointerReleased,
    /// A key that may select a mode ('1', '2', '3')
    ModeKey(char),
}

/// The interactive renderer.
pub struct App {
    scene: Scene,
    mode: Mode,
    photons: PhotonMap,
    cursor: RenderCursor,
    controller: Controller,
    config: RenderConfig,
    rng: StdRng,
    /// The scatter view needs a fresh pass
    scatter_pending: bool,
}

impl App {
    /// App over the default box scene.
    pub fn new(config: AppConfig) -> Self {
        Self::with_scene(config, Scene::cornell_box())
    }

    pub fn with_scene(config: AppConfig, scene: Scene) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            scene,
            mode: config.mode,
            photons: PhotonMap::new(config.photons),
            cursor: RenderCursor::new(config.render.image_size),
            controller: Controller::new(config.controller),
            config: config.render,
            rng,
            scatter_pending: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn photons(&self) -> &PhotonMap {
        &self.photons
    }

    pub fn cursor(&self) -> &RenderCursor {
        &self.cursor
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lighting used for the raytraced views in the current mode.
    pub fn lighting(&self) -> Lighting<'_> {
        lighting_for(self.mode, &self.photons)
    }

    /// True when the current view has nothing left to draw.
    pub fn is_idle(&self) -> bool {
        if self.mode.is_scatter_view() {
            !self.scatter_pending
        } else {
            self.cursor.is_finished()
        }
    }

    /// Emit the first photon pass, start a frame and draw the panel.
    pub fn setup(&mut self, surface: &mut dyn DrawSurface) -> SurfaceResult<()> {
        self.emit_photons();
        self.reset_render();
        self.draw_interface(surface)
    }

    /// Do one frame's worth of work. Returns the number of cells or photons drawn.
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) -> usize {
        if self.mode.is_scatter_view() {
            return self.scatter_tick(surface);
        }
        if self.cursor.is_finished() {
            return 0;
        }

        render_tick(
            &mut self.cursor,
            &self.scene,
            lighting_for(self.mode, &self.photons),
            &self.config,
            self.controller.is_dragging(),
            surface,
        )
    }

    /// React to one input event.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        surface: &mut dyn DrawSurface,
    ) -> SurfaceResult<()> {
        match event {
            InputEvent::PointerPressed { x, y } => {
                if let Some(mode) = self.controller.pointer_pressed(&self.scene, x, y) {
                    self.switch_mode(mode, surface)?;
                }
            }
            InputEvent::PointerDragged { x, y } => {
                if self.controller.pointer_dragged(&mut self.scene, x, y) {
                    self.reset_render();
                }
            }
            InputEvent::PointerReleased => self.controller.pointer_released(),
            InputEvent::ModeKey(key) => {
                if let Some(mode) = Mode::from_key(key) {
                    self.switch_mode(mode, surface)?;
                }
            }
        }
        Ok(())
    }

    /// Change the view, restart rendering and redraw the panel.
    pub fn switch_mode(&mut self, mode: Mode, surface: &mut dyn DrawSurface) -> SurfaceResult<()> {
        log::info!("Switching to {} view", mode.label());
        self.mode = mode;
        self.reset_render();
        self.draw_interface(surface)
    }

    /// Restart the frame from the coarsest level.
    ///
    /// The photon-lit view re-emits photons so the map follows the scene.
    pub fn reset_render(&mut self) {
        log::debug!("Render reset in {:?}", self.mode);
        self.cursor.reset();
        self.scatter_pending = true;
        if self.mode.lights_with_photons() {
            self.emit_photons();
        }
    }

    /// Rebuild the photon map with one regular pass.
    pub fn emit_photons(&mut self) -> EmitStats {
        let count = self.photons.config().emission_count(false);
        self.photons.emit(&self.scene, count, &mut self.rng, |_| {})
    }

    /// Draw the strip below the image: labels and the three mode buttons.
    ///
    /// The active mode's icon is drawn in color, the others in gray.
    pub fn draw_interface(&self, surface: &mut dyn DrawSurface) -> SurfaceResult<()> {
        let size = self.config.image_size as i32;

        let [r, g, b] = PANEL_BACKGROUND;
        surface.set_stroke_color(r, g, b);
        surface.set_fill_color(r, g, b);
        surface.fill_and_stroke_rect(0, size, size, PANEL_HEIGHT as i32);

        let raytrace_text = if self.mode.is_scatter_view() { DIMMED_TEXT } else { 0.0 };
        surface.set_fill_gray(raytrace_text);
        surface.draw_text(Mode::Raytrace.label(), 64, size + 28);

        let photon_text = if self.mode == Mode::Raytrace { DIMMED_TEXT } else { 0.0 };
        surface.set_fill_gray(photon_text);
        surface.draw_text(Mode::PhotonLitRaytrace.label(), 368, size + 28);

        surface.set_stroke_gray(0.0);
        surface.set_fill_gray(255.0);
        for ((mode, x), icon) in Mode::ALL.into_iter().zip(BUTTON_X).zip(ICON_NAMES) {
            surface.fill_and_stroke_rect(x, size + 7, BUTTON_SIZE, BUTTON_SIZE);
            let name = if mode == self.mode {
                icon.to_string()
            } else {
                format!("{GRAY_PREFIX}{icon}")
            };
            surface.draw_image_asset(&name, x + 1, size + 8)?;
        }

        Ok(())
    }

    /// Black out the image and draw a fresh, denser photon pass as points.
    fn scatter_tick(&mut self, surface: &mut dyn DrawSurface) -> usize {
        if !self.scatter_pending {
            return 0;
        }
        self.scatter_pending = false;

        let size = self.config.image_size as i32;
        surface.set_stroke_gray(0.0);
        surface.set_fill_gray(0.0);
        surface.fill_and_stroke_rect(0, 0, size - 1, size - 1);

        let count = self.photons.config().emission_count(true);
        let stats = self.photons.emit(&self.scene, count, &mut self.rng, |photon| {
            draw_photon(surface, size, photon)
        });
        stats.stored
    }
}

fn lighting_for(mode: Mode, photons: &PhotonMap) -> Lighting<'_> {
    if mode.lights_with_photons() {
        Lighting::Photons(photons)
    } else {
        Lighting::Direct
    }
}

/// Project a photon through the camera and plot it in its own color.
fn draw_photon(surface: &mut dyn DrawSurface, size: i32, photon: &Photon) {
    let p = photon.location;
    if p.z <= 0.0 {
        return;
    }

    let half = size / 2;
    let x = half + (size as f32 * p.x / p.z) as i32;
    let y = half + (size as f32 * -p.y / p.z) as i32;
    if y <= size {
        let [r, g, b] = color_to_rgb(photon.energy);
        surface.set_stroke_color(r, g, b);
        surface.draw_point(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DragTarget, RasterCanvas};
    use image::{Rgba, RgbaImage};
    use photon_core::{rgb_to_u8, AssetCache, Color, SurfaceError};
    use photon_math::Vec3;
    use photon_renderer::compute_pixel_color;

    const SIZE: u32 = 512;

    fn icons() -> AssetCache {
        let mut assets = AssetCache::new();
        let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];
        for (name, color) in ICON_NAMES.into_iter().zip(colors) {
            assets.insert(name, RgbaImage::from_pixel(32, 32, Rgba(color)));
        }
        assets
    }

    fn canvas() -> RasterCanvas {
        RasterCanvas::new(SIZE, SIZE + PANEL_HEIGHT, icons())
    }

    fn app() -> App {
        App::new(AppConfig::default().with_photon_count(200).with_seed(7))
    }

    fn photon_at(x: f32, y: f32, z: f32) -> Photon {
        Photon {
            location: Vec3::new(x, y, z),
            direction: Vec3::Z,
            energy: Color::new(1.0, 0.5, 0.0),
        }
    }

    #[test]
    fn test_photon_projection_truncates_toward_zero() {
        let mut canvas = canvas();
        let size = SIZE as i32;

        draw_photon(&mut canvas, size, &photon_at(0.25, -0.1, 2.0));
        // 256 + 64, 256 + 25.6
        assert_eq!(canvas.pixel(320, 281), [255, 127, 0]);

        draw_photon(&mut canvas, size, &photon_at(-0.3, 0.0, 2.0));
        // 256 - 76.8 lands on 180, not 179
        assert_eq!(canvas.pixel(180, 256), [255, 127, 0]);
        assert_eq!(canvas.pixel(179, 256), [0, 0, 0]);
    }

    #[test]
    fn test_photon_behind_camera_is_not_drawn() {
        let mut canvas = canvas();
        draw_photon(&mut canvas, SIZE as i32, &photon_at(0.25, -0.1, 0.0));
        draw_photon(&mut canvas, SIZE as i32, &photon_at(0.25, -0.1, -2.0));
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_photon_below_image_is_culled() {
        let mut canvas = canvas();
        let size = SIZE as i32;

        // exactly on the last allowed row
        draw_photon(&mut canvas, size, &photon_at(0.0, -0.5, 1.0));
        assert_eq!(canvas.pixel(256, SIZE), [255, 127, 0]);

        // inside the panel strip, so only the cull keeps it off
        draw_photon(&mut canvas, size, &photon_at(0.0, -0.515625, 1.0));
        assert_eq!(canvas.pixel(256, SIZE + 8), [0, 0, 0]);
    }

    #[test]
    fn test_setup_emits_and_draws_panel() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut app = app();
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();

        assert_eq!(app.mode(), Mode::PhotonLitRaytrace);
        assert!(app.photons().total() > 0);
        assert_eq!(app.cursor().iteration(), 1);
        assert!(!app.is_idle());

        assert_eq!(canvas.pixel(10, SIZE + 10), [221, 221, 204]);
        // button frame and the active (second) icon in color
        assert_eq!(canvas.pixel(198, SIZE + 20), [0, 0, 0]);
        assert_eq!(canvas.pixel(246, SIZE + 12), [0, 255, 0]);
        assert_eq!(canvas.pixel(204, SIZE + 12), [85, 85, 85]);

        let labels: Vec<(&str, [u8; 3])> =
            canvas.labels().iter().map(|l| (l.text.as_str(), l.color)).collect();
        assert_eq!(
            labels,
            vec![("Ray Tracing", [0, 0, 0]), ("Photon Mapping", [0, 0, 0])]
        );
    }

    #[test]
    fn test_dragging_light_resets_render() {
        let mut app = app();
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();
        app.tick(&mut canvas);
        app.tick(&mut canvas);
        assert_ne!(app.cursor().iteration(), 1);

        let before = app.scene().light.position;
        let events = [
            InputEvent::PointerPressed { x: 256.0, y: 100.0 },
            InputEvent::PointerDragged { x: 256.0, y: 100.0 },
            InputEvent::PointerDragged { x: 266.0, y: 100.0 },
        ];
        for event in events {
            app.handle_event(event, &mut canvas).unwrap();
        }

        assert_eq!(app.controller().target(), Some(DragTarget::Light));
        let after = app.scene().light.position;
        assert!((after.x - (before.x + 10.0 / 130.0)).abs() < 1e-6);
        assert_eq!(after.y, before.y);

        assert_eq!(app.cursor().row(), 0);
        assert_eq!(app.cursor().col(), 0);
        assert_eq!(app.cursor().iteration(), 1);
        assert!(!app.cursor().is_finished());

        // drag budget while the button is held
        assert_eq!(app.tick(&mut canvas), 1024);
        app.handle_event(InputEvent::PointerReleased, &mut canvas).unwrap();
        assert!(!app.controller().is_dragging());
    }

    #[test]
    fn test_plain_raytrace_ignores_photons() {
        let mut app = app();
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();

        // press on the first button
        app.handle_event(InputEvent::PointerPressed { x: 210.0, y: 530.0 }, &mut canvas)
            .unwrap();
        assert_eq!(app.mode(), Mode::Raytrace);
        assert!(matches!(app.lighting(), Lighting::Direct));

        app.tick(&mut canvas);
        let expected = compute_pixel_color(app.scene(), Lighting::Direct, app.config(), 0.0, 0.0);
        let [r, g, b] = color_to_rgb(expected);
        assert_eq!(canvas.pixel(0, 0), rgb_to_u8(r, g, b));

        // the panel follows the mode
        assert_eq!(canvas.pixel(204, SIZE + 12), [255, 0, 0]);
        assert_eq!(canvas.pixel(246, SIZE + 12), [85, 85, 85]);
        assert_eq!(canvas.labels()[1].color, [160, 160, 160]);
    }

    #[test]
    fn test_zero_photons_render_black() {
        let mut app = App::new(AppConfig::default().with_photon_count(0).with_seed(1));
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();
        assert_eq!(app.photons().total(), 0);

        canvas.set_stroke_gray(255.0);
        canvas.set_fill_gray(255.0);
        canvas.fill_and_stroke_rect(0, 0, SIZE as i32 - 1, SIZE as i32 - 1);

        app.tick(&mut canvas);
        for (x, y) in [(0, 0), (256, 256), (100, 400), (511, 511)] {
            assert_eq!(canvas.pixel(x, y), [0, 0, 0]);
        }
    }

    #[test]
    fn test_missing_icon_aborts_interface() {
        let mut app = app();
        let mut canvas = RasterCanvas::new(SIZE, SIZE + PANEL_HEIGHT, AssetCache::new());

        let err = app.setup(&mut canvas).unwrap_err();
        assert_eq!(err, SurfaceError::UnknownAsset("gray_1_32.png".to_string()));
    }

    #[test]
    fn test_scatter_view_draws_once_per_invalidation() {
        let mut app = app();
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();

        app.handle_event(InputEvent::ModeKey('3'), &mut canvas).unwrap();
        assert_eq!(app.mode(), Mode::PhotonScatter3D);
        assert_eq!(canvas.labels()[0].color, [160, 160, 160]);

        let stored = app.tick(&mut canvas);
        assert!(stored > 0);
        assert!(app.is_idle());
        assert_eq!(app.tick(&mut canvas), 0);

        let lit = (0..SIZE)
            .flat_map(|y| (0..SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != [0, 0, 0])
            .count();
        assert!(lit > 0);

        // moving something asks for a new pass
        app.handle_event(InputEvent::PointerPressed { x: 256.0, y: 100.0 }, &mut canvas)
            .unwrap();
        app.handle_event(InputEvent::PointerDragged { x: 256.0, y: 100.0 }, &mut canvas)
            .unwrap();
        app.handle_event(InputEvent::PointerDragged { x: 250.0, y: 100.0 }, &mut canvas)
            .unwrap();
        assert!(!app.is_idle());
        assert!(app.tick(&mut canvas) > 0);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = app();
        let mut canvas = canvas();
        app.setup(&mut canvas).unwrap();

        app.handle_event(InputEvent::ModeKey('x'), &mut canvas).unwrap();
        assert_eq!(app.mode(), Mode::PhotonLitRaytrace);
        app.handle_event(InputEvent::ModeKey('1'), &mut canvas).unwrap();
        assert_eq!(app.mode(), Mode::Raytrace);
    }

    #[test]
    fn test_small_frame_completes() {
        let config = AppConfig::default()
            .with_image_size(32)
            .with_mode(Mode::Raytrace)
            .with_seed(3);
        let mut app = App::new(config);
        let mut canvas = RasterCanvas::new(32, 32 + PANEL_HEIGHT, icons());
        app.setup(&mut canvas).unwrap();

        let mut ticks = 0;
        while !app.is_idle() && ticks < 100 {
            app.tick(&mut canvas);
            ticks += 1;
        }

        assert!(app.is_idle());
        assert_eq!(app.cursor().resolution_step(), 32);
    }
}
