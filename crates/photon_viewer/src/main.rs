use std::time::Duration;

use anyhow::Result;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Scale, Window, WindowOptions};
use photon_viewer::{app_config_from_env, assets_dir, canvas_size, load_icons};
use photon_viewport::{App, InputEvent, Mode, RasterCanvas};

const MODE_KEYS: [(Key, char); 3] = [(Key::Key1, '1'), (Key::Key2, '2'), (Key::Key3, '3')];

/// Turns polled mouse and key state into input events.
#[derive(Default)]
struct PointerTracker {
    down: bool,
    last_pos: Option<(f32, f32)>,
}

impl PointerTracker {
    fn poll(&mut self, window: &Window) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = MODE_KEYS
            .iter()
            .filter(|(key, _)| window.is_key_pressed(*key, KeyRepeat::No))
            .map(|(_, c)| InputEvent::ModeKey(*c))
            .collect();

        let down = window.get_mouse_down(MouseButton::Left);
        let pos = window.get_mouse_pos(MouseMode::Discard);

        match (self.down, down, pos) {
            (false, true, Some((x, y))) => events.push(InputEvent::PointerPressed { x, y }),
            (true, true, Some((x, y))) if pos != self.last_pos => {
                events.push(InputEvent::PointerDragged { x, y })
            }
            (true, false, _) => events.push(InputEvent::PointerReleased),
            _ => {}
        }

        self.down = down;
        self.last_pos = pos;
        events
    }
}

fn window_title(mode: Mode) -> String {
    format!("Photon Viewer - {}", mode.label())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Photon Viewer");

    let config = app_config_from_env();
    let (width, height) = canvas_size(&config);
    let mut canvas = RasterCanvas::new(width, height, load_icons(assets_dir()));

    let mut app = App::new(config);
    app.setup(&mut canvas)?;

    let mut window = Window::new(
        &window_title(app.mode()),
        width as usize,
        height as usize,
        WindowOptions {
            resize: false,
            scale: Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.limit_update_rate(Some(Duration::from_micros(16_600)));

    let mut pointer = PointerTracker::default();
    let mut shown_mode = app.mode();
    let mut buffer = Vec::with_capacity((width * height) as usize);

    log::info!("Running event loop");
    while window.is_open() && !window.is_key_down(Key::Escape) {
        for event in pointer.poll(&window) {
            app.handle_event(event, &mut canvas)?;
        }

        app.tick(&mut canvas);

        // minifb has no text; the mode goes in the title instead
        if app.mode() != shown_mode {
            shown_mode = app.mode();
            window.set_title(&window_title(shown_mode));
        }

        canvas.to_u32_buffer(&mut buffer);
        window.update_with_buffer(&buffer, width as usize, height as usize)?;
    }

    Ok(())
}
