/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use config::GameConfig;
use sim::event::GameEvent;
use sim::machine::Game;
use sim::scheduler::TickScheduler;
use sim::store::{self, FileStore, ScoreStore};
use ui::input::InputState;
use ui::layout::TerminalSurface;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const LOG_FILE: &str = "dotbounce.log";
const LOG_ENV: &str = "DOTBOUNCE_LOG";

fn main() {
    init_logging();

    let config = GameConfig::load();
    let scores = FileStore::open_default();
    tracing::info!(store = %scores.path().display(), "starting");

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        // init may have switched raw mode on before failing.
        let _ = renderer.cleanup();
        tracing::error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let surface = TerminalSurface::detect(&config.layout);
    let scheduler = TickScheduler::new(
        Duration::from_millis(config.timing.tick_interval_ms),
        config.timing.max_catch_up,
    );
    let mut game = Game::new(&surface, config.tuning.clone(), scheduler, scores, Instant::now());

    let result = game_loop(&mut game, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        tracing::error!("game loop failed: {e}");
        eprintln!("Game error: {e}");
    }

    let best = game.store().get(store::HIGHEST_SCORE).unwrap_or(0);
    tracing::info!(best, "exiting");
    println!();
    println!("Thanks for playing dotbounce!");
    println!("Best score: {best}");
}

/// Log to a file in the data directory; the terminal belongs to the game.
/// Filter comes from `DOTBOUNCE_LOG` (e.g. `debug`), default `info`.
fn init_logging() {
    let path = store::data_dir().join(LOG_FILE);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn game_loop<St: ScoreStore>(
    game: &mut Game<St>,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = InputState::new();
    let frame = Duration::from_millis(config.timing.frame_ms);

    loop {
        // Re-read every frame so resizes take effect immediately.
        let surface = TerminalSurface::detect(&config.layout);

        input.drain_events(&surface);
        if input.quit_requested() {
            break;
        }

        let now = Instant::now();
        let mut events = Vec::new();
        for ev in input.take_events() {
            events.extend(game.handle(ev, &surface, now));
        }
        events.extend(game.update(now, &surface));

        process_sound_events(sound, &events);

        renderer.render(&game.state, game.best_display(), &surface)?;

        std::thread::sleep(frame);
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::Hit { score, .. } => sfx.play_hit(*score),
            GameEvent::Miss { .. } => sfx.play_miss(),
            GameEvent::WallBounce => sfx.play_wall(),
            GameEvent::GameOver { .. } => sfx.play_over(),
            _ => {}
        }
    }
}
