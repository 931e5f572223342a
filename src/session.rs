use std::io::Stdout;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::components::Direction;
use crate::config::Settings;
use crate::error::GameResult;
use crate::game::Game;
use crate::level::Layout;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Steer(Direction),
    Restart,
    Quit,
}

/// Maps a key to a game input. Anything unrecognised is dropped here so the
/// simulation only ever sees the four headings.
pub fn input_for(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Steer(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Steer(Direction::Down)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Runs the game until the player quits. Expects the terminal to already be
/// in raw mode on the alternate screen.
pub fn run(stdout: &mut Stdout, settings: &Settings) -> GameResult<()> {
    let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(
        seed,
        tick_ms = settings.tick_ms,
        render_fps = settings.render_fps,
        reroll_chance = settings.reroll_chance,
        "session starting"
    );

    let mut game = Game::new(Layout::classic(), settings.reroll_chance, &mut rng)?;
    let mut renderer = Renderer::new(game.maze().width(), game.maze().height());
    let tick_every = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key)
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                {
                    match input_for(key.code) {
                        Some(Input::Quit) => {
                            tracing::info!(status = ?game.status(), "player quit");
                            return Ok(());
                        }
                        Some(Input::Steer(dir)) => game.steer(dir),
                        Some(Input::Restart) if game.status().is_over() => {
                            game.restart(&mut rng)?;
                            renderer.invalidate();
                            last_tick = Instant::now();
                        }
                        _ => {}
                    }
                }
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_every {
            last_tick = Instant::now();
            game.tick(&mut rng);
        }
        renderer.render(stdout, &game.snapshot(), terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
