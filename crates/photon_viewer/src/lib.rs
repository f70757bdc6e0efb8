//! Shared startup for the viewer binaries: environment settings and icons.

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use photon_core::AssetCache;
use photon_viewport::{AppConfig, ICON_NAMES, PANEL_HEIGHT};

/// Directory the button icons are loaded from.
pub const ASSETS_ENV: &str = "PHOTON_ASSETS";

/// Fixed RNG seed for reproducible photon passes.
pub const SEED_ENV: &str = "PHOTON_SEED";

pub fn assets_dir() -> PathBuf {
    std::env::var_os(ASSETS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

/// App configuration with the environment applied.
pub fn app_config_from_env() -> AppConfig {
    let config = AppConfig::default();
    match std::env::var(SEED_ENV) {
        Ok(value) => match value.parse::<u64>() {
            Ok(seed) => {
                log::info!("Using photon seed {seed}");
                config.with_seed(seed)
            }
            Err(e) => {
                log::warn!("Ignoring {SEED_ENV}={value:?}: {e}");
                config
            }
        },
        Err(_) => config,
    }
}

/// Canvas dimensions for an image of `image_size` pixels plus the panel.
pub fn canvas_size(config: &AppConfig) -> (u32, u32) {
    let size = config.render.image_size;
    (size, size + PANEL_HEIGHT)
}

/// Load the button icons, substituting placeholders for any that are missing.
pub fn load_icons(dir: PathBuf) -> AssetCache {
    let mut cache = AssetCache::with_base_dir(&dir);

    for (index, name) in ICON_NAMES.into_iter().enumerate() {
        if let Err(e) = cache.load(name) {
            log::warn!("Icon {name} not found in {}: {e}", dir.display());
            cache.insert(name, placeholder_icon(index + 1));
        }
    }

    log::info!("{} icons ready", cache.len());
    cache
}

/// 32x32 icon with `bars` colored bars on white.
fn placeholder_icon(bars: usize) -> RgbaImage {
    const PALETTE: [[u8; 4]; 3] = [[200, 60, 40, 255], [230, 170, 30, 255], [40, 110, 200, 255]];
    let color = Rgba(PALETTE[(bars - 1) % PALETTE.len()]);

    let mut icon = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
    let width = 32 / (2 * bars as u32 + 1);
    for bar in 0..bars as u32 {
        let x0 = width * (2 * bar + 1);
        for x in x0..x0 + width {
            for y in 6..26 {
                icon.put_pixel(x, y, color);
            }
        }
    }
    icon
}
