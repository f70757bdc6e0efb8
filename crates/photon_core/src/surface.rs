//! Drawing-surface interface.
//!
//! The renderer never touches pixels directly. It sets stroke/fill colors and
//! issues rectangle, point, text and image commands against a [`DrawSurface`],
//! which may be a window canvas, an off-screen raster or a test double.

use thiserror::Error;

/// Errors a drawing surface can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The named image was never registered with the surface.
    #[error("Unknown image asset: {0}")]
    UnknownAsset(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A 2D surface the renderer draws into.
///
/// Color channels are real numbers on a 0-255 scale. Implementations clamp
/// them to [0, 255] and truncate to integers (see [`channel_to_u8`]).
pub trait DrawSurface {
    fn set_stroke_color(&mut self, r: f32, g: f32, b: f32);

    fn set_fill_color(&mut self, r: f32, g: f32, b: f32);

    /// Shorthand for a gray stroke.
    fn set_stroke_gray(&mut self, v: f32) {
        self.set_stroke_color(v, v, v);
    }

    /// Shorthand for a gray fill.
    fn set_fill_gray(&mut self, v: f32) {
        self.set_fill_color(v, v, v);
    }

    /// Fill the rectangle, then outline it with the stroke color.
    ///
    /// The outline runs along columns `x` and `x + w` and rows `y` and
    /// `y + h`, so the rectangle covers `(w + 1) x (h + 1)` pixels.
    fn fill_and_stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Plot a single pixel in the stroke color.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Draw a text label with its baseline at `y`, in the fill color.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Blit a registered image with its top-left corner one row above `y`.
    ///
    /// Fails with [`SurfaceError::UnknownAsset`] if `id` was never
    /// registered; nothing is drawn in that case.
    fn draw_image_asset(&mut self, id: &str, x: i32, y: i32) -> SurfaceResult<()>;
}

/// Clamp a 0-255 channel value and truncate it to a byte.
#[inline]
pub fn channel_to_u8(c: f32) -> u8 {
    if c.is_nan() {
        return 0;
    }
    c.clamp(0.0, 255.0) as u8
}

pub fn rgb_to_u8(r: f32, g: f32, b: f32) -> [u8; 3] {
    [channel_to_u8(r), channel_to_u8(g), channel_to_u8(b)]
}
