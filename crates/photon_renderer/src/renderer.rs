//! Per-pixel color resolution and the progressive render tick.
//!
//! Implements:
//! - Primary rays through a unit-focal-length image plane
//! - One level of mirror reflection
//! - Direct (shadow ray) or photon-gathered lighting at the visible point

use photon_core::{Color, DrawSurface, Scene};
use photon_math::{reflect, Ray, Vec3};

use crate::{direct_lighting, raytrace, surface_normal, PhotonMap, RenderCursor};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Width and height of the square image in pixels (power of two)
    pub image_size: u32,
    /// Lower bound of direct lighting intensity
    pub ambient: f32,
    /// Pixels drawn per tick while the user is dragging
    pub drag_budget: usize,
    /// Minimum pixels drawn per tick otherwise
    pub idle_budget_floor: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: 512,
            ambient: 0.1,
            drag_budget: 1024,
            idle_budget_floor: 256,
        }
    }
}

impl RenderConfig {
    /// Set the image size, rounded up to a power of two.
    pub fn with_image_size(mut self, image_size: u32) -> Self {
        self.image_size = image_size.max(2).next_power_of_two();
        self
    }
}

/// How visible points are lit.
#[derive(Debug, Clone, Copy)]
pub enum Lighting<'a> {
    /// Diffuse + ambient from the point light, with shadow rays
    Direct,
    /// Density estimate over a photon map
    Photons(&'a PhotonMap),
}

/// Camera ray through pixel (`x`, `y`); the camera sits at the origin
/// looking down +Z with a focal length of 1.
#[inline]
pub fn primary_ray(x: f32, y: f32, image_size: u32) -> Ray {
    let size = image_size as f32;
    Ray::new(Vec3::ZERO, Vec3::new(x / size - 0.5, -(y / size - 0.5), 1.0))
}

/// Color of the scene seen through pixel (`x`, `y`), channels nominally 0-1.
pub fn compute_pixel_color(
    scene: &Scene,
    lighting: Lighting<'_>,
    config: &RenderConfig,
    x: f32,
    y: f32,
) -> Color {
    let ray = primary_ray(x, y, config.image_size);
    let Some(mut hit) = raytrace(scene, &ray) else {
        return Color::ZERO;
    };

    // Mirrors are followed one bounce; a miss shades the mirror itself
    if scene.material(hit.id).mirror {
        let n = surface_normal(scene, hit.id, hit.point, ray.origin);
        let reflected = Ray::new(hit.point, reflect(ray.direction, n));
        if let Some(bounce) = raytrace(scene, &reflected) {
            hit = bounce;
        }
    }

    match lighting {
        Lighting::Photons(map) => map.gather(scene, hit.point, hit.id),
        Lighting::Direct => direct_lighting(scene, hit.id, hit.point, config.ambient),
    }
}

/// Scale a 0-1 color to the 0-255 range the drawing surface expects.
#[inline]
pub fn color_to_rgb(color: Color) -> [f32; 3] {
    let c = color * 255.0;
    [c.x, c.y, c.z]
}

/// Render one tick of the progressive frame.
///
/// Draws up to the cursor's budget of cells, each as a filled square of the
/// current cell size. Returns the number of cells drawn.
pub fn render_tick(
    cursor: &mut RenderCursor,
    scene: &Scene,
    lighting: Lighting<'_>,
    config: &RenderConfig,
    dragging: bool,
    surface: &mut dyn DrawSurface,
) -> usize {
    let mut drawn = 0;

    while drawn < cursor.tick_budget(dragging, config) {
        let Some(cell) = cursor.next_cell() else {
            break;
        };
        if !cell.needs_drawing {
            continue;
        }
        drawn += 1;

        let color = compute_pixel_color(scene, lighting, config, cell.x as f32, cell.y as f32);
        let [r, g, b] = color_to_rgb(color);

        surface.set_stroke_color(r, g, b);
        surface.set_fill_color(r, g, b);
        let edge = cell.size as i32 - 1;
        surface.fill_and_stroke_rect(cell.x as i32, cell.y as i32, edge, edge);
    }

    cursor.end_tick();
    if cursor.is_finished() {
        log::debug!("Frame finished at level {}", cursor.iteration());
    } else {
        log::trace!(
            "Tick drew {} cells, level {} row {}",
            drawn,
            cursor.iteration(),
            cursor.row()
        );
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectId, PhotonConfig};
    use photon_core::{Light, Material, Sphere, SurfaceResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Surface that only records filled rectangles and their colors.
    #[derive(Default)]
    struct RectLog {
        fill: [f32; 3],
        rects: Vec<([f32; 3], i32, i32, i32, i32)>,
    }

    impl DrawSurface for RectLog {
        fn set_stroke_color(&mut self, _r: f32, _g: f32, _b: f32) {}

        fn set_fill_color(&mut self, r: f32, g: f32, b: f32) {
            self.fill = [r, g, b];
        }

        fn fill_and_stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
            self.rects.push((self.fill, x, y, w, h));
        }

        fn draw_point(&mut self, _x: i32, _y: i32) {}

        fn draw_text(&mut self, _text: &str, _x: i32, _y: i32) {}

        fn draw_image_asset(&mut self, _id: &str, _x: i32, _y: i32) -> SurfaceResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_primary_ray_corners() {
        let center = primary_ray(256.0, 256.0, 512);
        assert_eq!(center.direction, Vec3::Z);

        let top_left = primary_ray(0.0, 0.0, 512);
        assert_eq!(top_left.direction, Vec3::new(-0.5, 0.5, 1.0));
        assert_eq!(top_left.origin, Vec3::ZERO);
    }

    #[test]
    fn test_center_pixel_sees_back_wall() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default();

        let rgb = compute_pixel_color(&scene, Lighting::Direct, &config, 256.0, 256.0);
        // white wall, lit from the front, gray
        assert!(rgb.x > config.ambient);
        assert_eq!(rgb.x, rgb.y);
        assert_eq!(rgb.y, rgb.z);
    }

    #[test]
    fn test_miss_is_black() {
        // no geometry at all
        let scene = Scene::new(vec![], vec![], Light::new(Vec3::Y));
        let config = RenderConfig::default();
        assert_eq!(
            compute_pixel_color(&scene, Lighting::Direct, &config, 10.0, 10.0),
            Color::ZERO
        );
    }

    #[test]
    fn test_mirror_shows_reflected_object() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default();

        // pixel looking straight at the mirror sphere's center
        let mirror = scene.sphere(1).unwrap().center;
        let x = (mirror.x / mirror.z + 0.5) * 512.0;
        let y = (0.5 - mirror.y / mirror.z) * 512.0;
        let ray = primary_ray(x, y, 512);
        assert_eq!(raytrace(&scene, &ray).unwrap().id, ObjectId::sphere(1));

        // reflected back past the camera, it lands on the ceiling
        let hit = raytrace(&scene, &ray).unwrap();
        let n = surface_normal(&scene, hit.id, hit.point, ray.origin);
        let reflected = Ray::new(hit.point, reflect(ray.direction, n));
        assert_eq!(raytrace(&scene, &reflected).unwrap().id, ObjectId::plane(3));

        let rgb = compute_pixel_color(&scene, Lighting::Direct, &config, x, y);
        assert!(rgb.length() > 0.0);
    }

    #[test]
    fn test_mirror_miss_shades_the_mirror() {
        // lone mirror straight ahead, light at the camera
        let scene = Scene::new(
            vec![(Sphere::new(Vec3::new(0.0, 0.0, 4.0), 1.0), Material::MIRROR)],
            vec![],
            Light::new(Vec3::ZERO),
        );
        let config = RenderConfig::default();

        // the reflection heads back out of the scene
        let ray = primary_ray(256.0, 256.0, 512);
        let hit = raytrace(&scene, &ray).unwrap();
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, 3.0));
        let n = surface_normal(&scene, hit.id, hit.point, ray.origin);
        assert!(raytrace(&scene, &Ray::new(hit.point, reflect(ray.direction, n))).is_none());

        let rgb = compute_pixel_color(&scene, Lighting::Direct, &config, 256.0, 256.0);
        let expected = direct_lighting(&scene, ObjectId::sphere(0), hit.point, config.ambient);
        assert_eq!(rgb, expected);
        assert!((rgb - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_photon_lighting_without_photons_is_black() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default();
        let map = PhotonMap::new(PhotonConfig::default());

        for (x, y) in [(0.0, 0.0), (256.0, 256.0), (100.0, 400.0), (511.0, 511.0)] {
            let rgb = compute_pixel_color(&scene, Lighting::Photons(&map), &config, x, y);
            assert_eq!(rgb, Color::ZERO);
        }
    }

    #[test]
    fn test_photon_lighting_brightens_floor() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default();
        let mut map = PhotonMap::default();
        map.emit(&scene, 2000, &mut StdRng::seed_from_u64(1), |_| {});

        // bottom center of the image looks at the floor under the light
        let rgb = compute_pixel_color(&scene, Lighting::Photons(&map), &config, 256.0, 500.0);
        assert!(rgb.x > 0.0, "{rgb:?}");
    }

    #[test]
    fn test_first_tick_draws_coarse_level() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default();
        let mut cursor = RenderCursor::new(config.image_size);
        let mut surface = RectLog::default();

        let drawn = render_tick(&mut cursor, &scene, Lighting::Direct, &config, false, &mut surface);
        assert_eq!(drawn, 256);

        // first four rects are the 2x2 level, 256 px cells
        let first: Vec<(i32, i32, i32, i32)> =
            surface.rects[..4].iter().map(|r| (r.1, r.2, r.3, r.4)).collect();
        assert_eq!(
            first,
            vec![(0, 0, 255, 255), (256, 0, 255, 255), (0, 256, 255, 255), (256, 256, 255, 255)]
        );
        for (rgb, ..) in &surface.rects {
            assert!(rgb.iter().all(|c| (0.0..=255.0).contains(c)));
        }
    }

    #[test]
    fn test_ticks_run_until_finished() {
        let scene = Scene::cornell_box();
        let config = RenderConfig::default().with_image_size(32);
        let mut cursor = RenderCursor::new(config.image_size);
        let mut surface = RectLog::default();

        let mut total = 0;
        for _ in 0..100 {
            total += render_tick(&mut cursor, &scene, Lighting::Direct, &config, false, &mut surface);
            if cursor.is_finished() {
                break;
            }
        }

        assert!(cursor.is_finished());
        assert_eq!(total, 32 * 32);
        assert_eq!(
            render_tick(&mut cursor, &scene, Lighting::Direct, &config, false, &mut surface),
            0
        );
    }
}
