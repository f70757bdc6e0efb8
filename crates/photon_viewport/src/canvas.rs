//! In-memory RGB canvas implementing [`DrawSurface`].

use image::{Rgb, RgbImage};
use photon_core::{rgb_to_u8, AssetCache, DrawSurface, SurfaceError, SurfaceResult};

/// A text draw recorded by the canvas.
///
/// The canvas has no font rasterizer; hosts that can draw text read these
/// back and render them on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: [u8; 3],
}

/// RGB framebuffer with stroke/fill state and an icon cache for blits.
pub struct RasterCanvas {
    image: RgbImage,
    stroke: [u8; 3],
    fill: [u8; 3],
    assets: AssetCache,
    labels: Vec<TextLabel>,
}

impl RasterCanvas {
    /// Black canvas of `width x height` pixels.
    pub fn new(width: u32, height: u32, assets: AssetCache) -> Self {
        Self {
            image: RgbImage::new(width, height),
            stroke: [0, 0, 0],
            fill: [255, 255, 255],
            assets,
            labels: Vec::new(),
        }
    }

    /// Pixel at (`x`, `y`); panics outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Text drawn since the last time the labels area was cleared.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Pixels packed as `0x00RRGGBB`, row-major.
    pub fn to_u32_buffer(&self, buffer: &mut Vec<u32>) {
        buffer.clear();
        buffer.extend(self.image.pixels().map(|Rgb([r, g, b])| {
            ((*r as u32) << 16) | ((*g as u32) << 8) | *b as u32
        }));
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, Rgb(color));
        }
    }

    /// Drop recorded labels anchored inside the rectangle.
    fn forget_labels(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.labels
            .retain(|label| !((x0..=x1).contains(&label.x) && (y0..=y1).contains(&label.y)));
    }
}

impl DrawSurface for RasterCanvas {
    fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) {
        self.stroke = rgb_to_u8(r, g, b);
    }

    fn set_fill_color(&mut self, r: f32, g: f32, b: f32) {
        self.fill = rgb_to_u8(r, g, b);
    }

    fn fill_and_stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w < 0 || h < 0 {
            return;
        }

        let fill = self.fill;
        for py in y..=y + h {
            for px in x..=x + w {
                self.put(px, py, fill);
            }
        }

        let stroke = self.stroke;
        for px in x..=x + w {
            self.put(px, y, stroke);
            self.put(px, y + h, stroke);
        }
        for py in y..=y + h {
            self.put(x, py, stroke);
            self.put(x + w, py, stroke);
        }

        self.forget_labels(x, y, x + w, y + h);
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        let stroke = self.stroke;
        self.put(x, y, stroke);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        log::trace!("Text {text:?} at ({x}, {y})");
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color: self.fill,
        });
    }

    fn draw_image_asset(&mut self, id: &str, x: i32, y: i32) -> SurfaceResult<()> {
        let icon = self
            .assets
            .get(id)
            .ok_or_else(|| SurfaceError::UnknownAsset(id.to_string()))?;

        let top = y - 1;
        for (ix, iy, pixel) in icon.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let (px, py) = (x + ix as i32, top + iy as i32);
            if px < 0 || py < 0 {
                continue;
            }
            let Some(&Rgb(under)) = self.image.get_pixel_checked(px as u32, py as u32) else {
                continue;
            };

            let alpha = a as f32 / 255.0;
            let blend = |src: u8, dst: u8| {
                (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
            };
            let color = [blend(r, under[0]), blend(g, under[1]), blend(b, under[2])];
            self.put(px, py, color);
        }

        Ok(())
    }
}
