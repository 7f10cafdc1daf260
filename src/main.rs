//! Fruit Slash entry point
//!
//! Headless driver: runs a paced session with the autopilot as the blade,
//! draws every frame onto a black background and logs what happens.
//!
//! Usage: `fruit-slash [settings.json] [frames]`

use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use fruit_slash::Settings;
use fruit_slash::audio::{SoundBoard, SoundEvent};
use fruit_slash::pointer::{Autopilot, PointerSource};
use fruit_slash::renderer::{FrameBuffer, NoSprites, Rgb, render_frame};
use fruit_slash::sim::{GamePhase, GameState, TickInput, tick};

/// One minute at the default tick rate
const DEFAULT_FRAMES: u64 = 30 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Fruit Slash (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let settings = Settings::load_or_default(settings_path.as_deref());
    let catalog = settings.catalog()?;
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::with_settings(&settings, seed, catalog);
    log::info!("Game initialized with seed: {}", seed);

    let mut sounds = SoundBoard::from_settings(
        &settings,
        Box::new(|event, volume| log::debug!("Playing '{event}' at {volume:.2}")),
    );
    for event in [SoundEvent::Slice, SoundEvent::Bomb] {
        sounds.bind(event, event.default_volume());
    }

    let mut pointer = Autopilot;
    let mut frame = FrameBuffer::filled(
        settings.width as usize,
        settings.height as usize,
        Rgb::BLACK,
    );
    let frame_time = Duration::from_secs_f64(1.0 / settings.ticks_per_second as f64);
    let started = Instant::now();

    for n in 0..frames {
        let tick_start = Instant::now();

        let input = TickInput {
            pointer: pointer.poll(&state),
            start: state.phase == GamePhase::Menu,
            // Leave once the run is over
            quit: state.phase == GamePhase::GameOver,
            now: started.elapsed().as_secs_f64(),
            ..TickInput::default()
        };
        if tick(&mut state, &input, &mut sounds).is_break() {
            break;
        }

        frame.fill(Rgb::BLACK);
        let hud = render_frame(&state, &mut frame, &NoSprites, &settings);

        if n % settings.ticks_per_second as u64 == 0 {
            log::debug!(
                "Frame {}: {:?}, score {}, lives {}, {} entities, {} text lines",
                n,
                state.phase,
                state.score,
                state.lives,
                state.entities.len(),
                hud.len()
            );
        }

        if let Some(rest) = frame_time.checked_sub(tick_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    log::info!(
        "Session over after {:.1}s: score {}, lives {}, phase {:?}",
        started.elapsed().as_secs_f64(),
        state.score,
        state.lives,
        state.phase
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
