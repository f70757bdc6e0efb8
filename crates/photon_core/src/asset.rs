//! Image assets for the interface panel.
//!
//! Icons are loaded once and cached by name. Every icon is registered
//! together with a `gray_` variant used to draw inactive buttons.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Name prefix of the grayscale variant of an icon.
pub const GRAY_PREFIX: &str = "gray_";

/// Errors that can occur while loading icons.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type AssetResult<T> = Result<T, AssetError>;

/// Cache of named icons.
pub struct AssetCache {
    /// Icons by name, including the generated gray variants
    icons: HashMap<String, Arc<RgbaImage>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl AssetCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            icons: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a cache that resolves relative names against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load an icon from disk, using the cache if available.
    ///
    /// Registers both `name` and `gray_<name>`.
    pub fn load(&mut self, name: &str) -> AssetResult<Arc<RgbaImage>> {
        if let Some(icon) = self.icons.get(name) {
            return Ok(icon.clone());
        }

        let full_path = self.resolve_path(name);
        let icon = image::open(&full_path)?.to_rgba8();

        log::debug!(
            "Loaded icon: {} ({}x{})",
            full_path.display(),
            icon.width(),
            icon.height()
        );

        Ok(self.insert(name, icon))
    }

    /// Register an in-memory icon and its gray variant.
    pub fn insert(&mut self, name: &str, icon: RgbaImage) -> Arc<RgbaImage> {
        let gray = Arc::new(grayscale(&icon));
        let icon = Arc::new(icon);
        self.icons.insert(format!("{GRAY_PREFIX}{name}"), gray);
        self.icons.insert(name.to_string(), icon.clone());
        icon
    }

    /// Get a cached icon without loading.
    pub fn get(&self, name: &str) -> Option<Arc<RgbaImage>> {
        self.icons.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// Number of registered icons, gray variants included.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace RGB with the plain channel average, keeping alpha.
pub fn grayscale(icon: &RgbaImage) -> RgbaImage {
    let mut gray = icon.clone();
    for pixel in gray.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let avg = ((r as f32 + g as f32 + b as f32) / 3.0).round() as u8;
        *pixel = Rgba([avg, avg, avg, a]);
    }
    gray
}
