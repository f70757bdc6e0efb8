//! Render one full frame without a window and save it as an image.
//!
//! Usage: `render_still [output.png] [mode key 1|2|3]`

use anyhow::{Context, Result};
use photon_viewer::{app_config_from_env, assets_dir, canvas_size, load_icons};
use photon_viewport::{App, Mode, RasterCanvas};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "photon_render.png".to_string());
    let mode = match args.next() {
        Some(key) => key
            .chars()
            .next()
            .and_then(Mode::from_key)
            .with_context(|| format!("unknown mode {key:?}, expected 1, 2 or 3"))?,
        None => Mode::default(),
    };

    let config = app_config_from_env().with_mode(mode);
    let (width, height) = canvas_size(&config);
    let mut canvas = RasterCanvas::new(width, height, load_icons(assets_dir()));

    let mut app = App::new(config);
    app.setup(&mut canvas).context("drawing the interface")?;

    log::info!("Rendering {}", mode.label());
    let mut ticks = 0;
    while !app.is_idle() {
        app.tick(&mut canvas);
        ticks += 1;
    }
    log::info!("Frame done after {ticks} ticks");

    canvas
        .image()
        .save(&output)
        .with_context(|| format!("writing {output}"))?;
    log::info!("Saved {output}");

    Ok(())
}
