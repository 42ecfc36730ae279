use sdl2::pixels::Color;
use sdl2::video::{FullscreenType, Window};
use sdl2::VideoSubsystem;
use std::time::{Duration, Instant};

mod gui;
mod input;
mod launcher;
mod render;
mod screen;
mod settings;
mod shape;
mod text;

use input::{HostEvent, InputSnapshot, SdlInput};
use launcher::IntroSequence;
use render::{AssetLoader, Renderer, SdlRenderer, TextureHandle};
use screen::{HostRequest, ScreenStack};
use settings::{
    load_or_default, AppSettings, FileSettingsStore, MemorySettingsStore, Resolution,
    SettingsStore, FALLBACK_RESOLUTIONS,
};

const WINDOW_TITLE: &str = "Menu Manager";
const ASSET_ROOT: &str = "assets";
const CURSOR_TEXTURE: &str = "Cursors/CirclePointer";

/// Opens the settings file, or keeps settings in memory when the config
/// directory is unusable
fn open_settings_store() -> Box<dyn SettingsStore> {
    let directory = FileSettingsStore::default_directory();
    match FileSettingsStore::new(&directory) {
        Ok(store) => {
            log::info!("Settings file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!(
                "Cannot use settings directory {} ({}), settings will not persist",
                directory.display(),
                e
            );
            Box::new(MemorySettingsStore::new())
        }
    }
}

/// Resolutions offered by the options menu: the display's modes, deduplicated
/// and smallest first
fn supported_resolutions(video: &VideoSubsystem) -> Vec<Resolution> {
    let count = video.num_display_modes(0).unwrap_or(0);
    let mut resolutions: Vec<Resolution> = (0..count)
        .filter_map(|index| video.display_mode(0, index).ok())
        .filter(|mode| mode.w > 0 && mode.h > 0)
        .map(|mode| Resolution::new(mode.w as u32, mode.h as u32))
        .collect();

    resolutions.sort();
    resolutions.dedup();

    if resolutions.is_empty() {
        log::warn!("No display modes reported, using fallback resolutions");
        return FALLBACK_RESOLUTIONS.to_vec();
    }
    resolutions
}

fn apply_window_mode(window: &mut Window, settings: &AppSettings) -> Result<(), String> {
    let mode = if settings.is_full_screen {
        FullscreenType::Desktop
    } else {
        FullscreenType::Off
    };
    window.set_fullscreen(mode)?;
    window
        .set_size(settings.resolution.width, settings.resolution.height)
        .map_err(|e| e.to_string())?;
    log::info!(
        "Window set to {} ({})",
        settings.resolution,
        if settings.is_full_screen { "full screen" } else { "windowed" }
    );
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut settings_store = open_settings_store();
    let mut settings = load_or_default(settings_store.as_mut());

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let mut window = video_subsystem
        .window(
            WINDOW_TITLE,
            settings.resolution.width,
            settings.resolution.height,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    if settings.is_full_screen {
        window.set_fullscreen(FullscreenType::Desktop)?;
    }

    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let mut renderer = SdlRenderer::new(canvas, &texture_creator, ASSET_ROOT);

    let mouse = sdl_context.mouse();
    mouse.show_cursor(false);

    let cursor: Option<TextureHandle> = match renderer.load(CURSOR_TEXTURE) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("Cursor unavailable: {}", e);
            None
        }
    };

    let viewport = settings.resolution.viewport();
    let mut input_backend = SdlInput::new(sdl_context.game_controller()?, viewport);
    let mut snapshot = InputSnapshot::new(viewport);
    // W/A/S/D stand in for a pad when none is connected
    snapshot.set_virtual_stick(true);

    let mut stack = ScreenStack::new(viewport, supported_resolutions(&video_subsystem));
    let mut intro = IntroSequence::new();

    let mut event_pump = sdl_context.event_pump()?;
    let mut last_frame = Instant::now();

    'running: loop {
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        for event in input_backend.poll_events(&mut event_pump) {
            match event {
                HostEvent::Quit => break 'running,
                HostEvent::FocusGained => stack.set_window_focused(true),
                HostEvent::FocusLost => stack.set_window_focused(false),
            }
        }

        snapshot.refresh(&mut input_backend, elapsed);
        input_backend.apply_mouse_warp(&mouse, renderer.window());

        // The cursor appears once the mouse moves and hides again on touch
        if snapshot.cursor_moved() {
            snapshot.set_cursor_visible(true);
        } else if !snapshot.touches().is_empty() {
            snapshot.set_cursor_visible(false);
        }

        intro.update(&mut stack, &settings);

        let requests = stack
            .update(&snapshot, elapsed, &mut settings, &mut renderer)
            .map_err(|e| e.to_string())?;

        for request in requests {
            match request {
                HostRequest::Quit => break 'running,
                HostRequest::SaveSettings => {
                    if let Err(e) = settings_store.save(&settings) {
                        log::warn!("Failed to save settings: {}", e);
                    }
                }
                HostRequest::SettingsApplied => {
                    if let Err(e) = apply_window_mode(renderer.window_mut(), &settings) {
                        log::warn!("Failed to change window mode: {}", e);
                    }
                    let viewport = settings.resolution.viewport();
                    snapshot.set_viewport(viewport);
                    input_backend.set_viewport(viewport);
                    stack.set_display_modes(supported_resolutions(&video_subsystem));
                    stack.settings_applied(&settings);
                }
            }
        }

        renderer.clear(Color::BLACK);
        stack.draw(&mut renderer)?;

        if let Some(texture) = cursor {
            if stack.wants_cursor() && snapshot.show_cursor() {
                renderer.draw_sprite(
                    texture,
                    snapshot.cursor(),
                    (0.0, 0.0),
                    settings.resolution.scale(),
                    Color::WHITE,
                )?;
            }
        }

        renderer.present();

        std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    stack.clear(&mut renderer);
    if let Some(texture) = cursor {
        renderer.unload(texture);
    }
    Ok(())
}
